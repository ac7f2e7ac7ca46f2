//! Normalization of raw REST responses into canonical outcomes.

use serde_json::Value;

use fieldbook_core::Outcome;

/// Fold a status/body pair into exactly one [`Outcome`] variant. Total over
/// every status code the backend can produce; unrecognized codes land in
/// `Failure`.
pub fn normalize(status: u16, body: &str, action: &str) -> Outcome {
    match status {
        200 | 201 => match serde_json::from_str::<Value>(body) {
            Ok(value) => Outcome::ok_json(value),
            Err(_) => Outcome::ok_text(body),
        },
        204 => Outcome::completed(action),
        404 => Outcome::NotFound,
        400 => match serde_json::from_str::<Value>(body) {
            Ok(details) => Outcome::Invalid(details),
            Err(_) => Outcome::invalid_text(body),
        },
        other => Outcome::Failure { code: Some(other), message: body.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use fieldbook_core::{Outcome, Payload};

    use super::normalize;

    #[test]
    fn ok_statuses_parse_the_body() {
        assert_eq!(normalize(200, r#"{"id": 1}"#, "get customer"), Outcome::ok_json(json!({"id": 1})));
        assert_eq!(normalize(201, r#"[1, 2]"#, "create item"), Outcome::ok_json(json!([1, 2])));
    }

    #[test]
    fn no_content_is_annotated_with_the_action() {
        let outcome = normalize(204, "", "delete customer");
        assert_eq!(outcome, Outcome::Ok(Payload::Completed { action: "delete customer".to_string() }));
    }

    #[test]
    fn not_found_ignores_the_body() {
        assert_eq!(normalize(404, "", "get serial"), Outcome::NotFound);
        assert_eq!(normalize(404, r#"{"detail": "Not found."}"#, "get serial"), Outcome::NotFound);
        assert_eq!(normalize(404, "<html>gone</html>", "get serial"), Outcome::NotFound);
    }

    #[test]
    fn bad_request_keeps_structured_details() {
        let outcome = normalize(400, r#"{"field":["required"]}"#, "create invoice");
        let Outcome::Invalid(details) = outcome else {
            panic!("400 must normalize to Invalid");
        };
        assert!(details.to_string().contains("required"));
    }

    #[test]
    fn bad_request_with_unparseable_body_falls_back_to_raw_text() {
        let outcome = normalize(400, "plain refusal", "create invoice");
        assert_eq!(outcome, Outcome::invalid_text("plain refusal"));
    }

    #[test]
    fn unrecognized_codes_become_failures() {
        for status in [301u16, 403, 418, 500, 503] {
            let outcome = normalize(status, "boom", "list services");
            assert_eq!(
                outcome,
                Outcome::Failure { code: Some(status), message: "boom".to_string() }
            );
        }
    }
}
