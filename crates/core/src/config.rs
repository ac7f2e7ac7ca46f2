use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Validated application configuration. Built once at process start and
/// passed down by reference; nothing re-reads the environment afterwards.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub crawl: CrawlConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// The records REST backend this process fronts.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// The search/scrape collaborator. The API key is optional at load time;
/// the web-search tool reports a configuration failure when it is missing.
#[derive(Clone, Debug)]
pub struct CrawlConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<SecretString>,
    pub endpoint: Option<String>,
    pub deployment: String,
    pub api_version: String,
    pub timeout_secs: u64,
    pub max_turns: u32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub backend_base_url: Option<String>,
    pub log_level: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_endpoint: Option<String>,
    pub llm_deployment: Option<String>,
    pub crawl_api_key: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_secs: 30,
            },
            crawl: CrawlConfig {
                api_key: None,
                base_url: "https://api.firecrawl.dev".to_string(),
                timeout_secs: 30,
            },
            llm: LlmConfig {
                api_key: None,
                endpoint: None,
                deployment: "gpt-4o".to_string(),
                api_version: "2024-02-15-preview".to_string(),
                timeout_secs: 60,
                max_turns: 8,
            },
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 5000 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl LlmConfig {
    /// The agent surfaces need full LLM credentials; the MCP surface does
    /// not, so this is checked by the server bootstrap rather than `load`.
    pub fn ensure_complete(&self) -> Result<(), ConfigError> {
        let missing_key = self
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().trim().is_empty())
            .unwrap_or(true);
        if missing_key {
            return Err(ConfigError::Validation(
                "llm.api_key is required for the query agent".to_string(),
            ));
        }
        let missing_endpoint =
            self.endpoint.as_ref().map(|url| url.trim().is_empty()).unwrap_or(true);
        if missing_endpoint {
            return Err(ConfigError::Validation(
                "llm.endpoint is required for the query agent".to_string(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from("fieldbook.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(backend) = patch.backend {
            if let Some(base_url) = backend.base_url {
                self.backend.base_url = base_url;
            }
            if let Some(timeout_secs) = backend.timeout_secs {
                self.backend.timeout_secs = timeout_secs;
            }
        }

        if let Some(crawl) = patch.crawl {
            if let Some(api_key) = crawl.api_key {
                self.crawl.api_key = Some(api_key.into());
            }
            if let Some(base_url) = crawl.base_url {
                self.crawl.base_url = base_url;
            }
            if let Some(timeout_secs) = crawl.timeout_secs {
                self.crawl.timeout_secs = timeout_secs;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(api_key) = llm.api_key {
                self.llm.api_key = Some(api_key.into());
            }
            if let Some(endpoint) = llm.endpoint {
                self.llm.endpoint = Some(endpoint);
            }
            if let Some(deployment) = llm.deployment {
                self.llm.deployment = deployment;
            }
            if let Some(api_version) = llm.api_version {
                self.llm.api_version = api_version;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
            if let Some(max_turns) = llm.max_turns {
                self.llm.max_turns = max_turns;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("FIELDBOOK_BACKEND_BASE_URL") {
            self.backend.base_url = value;
        }
        if let Some(value) = read_env("FIELDBOOK_BACKEND_TIMEOUT_SECS") {
            self.backend.timeout_secs = parse_u64("FIELDBOOK_BACKEND_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("FIELDBOOK_CRAWL_API_KEY") {
            self.crawl.api_key = Some(value.into());
        }
        if let Some(value) = read_env("FIELDBOOK_CRAWL_BASE_URL") {
            self.crawl.base_url = value;
        }
        if let Some(value) = read_env("FIELDBOOK_CRAWL_TIMEOUT_SECS") {
            self.crawl.timeout_secs = parse_u64("FIELDBOOK_CRAWL_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("FIELDBOOK_LLM_API_KEY") {
            self.llm.api_key = Some(value.into());
        }
        if let Some(value) = read_env("FIELDBOOK_LLM_ENDPOINT") {
            self.llm.endpoint = Some(value);
        }
        if let Some(value) = read_env("FIELDBOOK_LLM_DEPLOYMENT") {
            self.llm.deployment = value;
        }
        if let Some(value) = read_env("FIELDBOOK_LLM_API_VERSION") {
            self.llm.api_version = value;
        }
        if let Some(value) = read_env("FIELDBOOK_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("FIELDBOOK_LLM_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("FIELDBOOK_LLM_MAX_TURNS") {
            self.llm.max_turns = parse_u32("FIELDBOOK_LLM_MAX_TURNS", &value)?;
        }

        if let Some(value) = read_env("FIELDBOOK_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("FIELDBOOK_SERVER_PORT") {
            self.server.port = parse_u16("FIELDBOOK_SERVER_PORT", &value)?;
        }

        let log_level =
            read_env("FIELDBOOK_LOGGING_LEVEL").or_else(|| read_env("FIELDBOOK_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("FIELDBOOK_LOGGING_FORMAT").or_else(|| read_env("FIELDBOOK_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(base_url) = overrides.backend_base_url {
            self.backend.base_url = base_url;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(api_key) = overrides.llm_api_key {
            self.llm.api_key = Some(api_key.into());
        }
        if let Some(endpoint) = overrides.llm_endpoint {
            self.llm.endpoint = Some(endpoint);
        }
        if let Some(deployment) = overrides.llm_deployment {
            self.llm.deployment = deployment;
        }
        if let Some(api_key) = overrides.crawl_api_key {
            self.crawl.api_key = Some(api_key.into());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("backend.base_url", &self.backend.base_url)?;
        validate_http_url("crawl.base_url", &self.crawl.base_url)?;
        if let Some(endpoint) = &self.llm.endpoint {
            validate_http_url("llm.endpoint", endpoint)?;
        }

        validate_timeout("backend.timeout_secs", self.backend.timeout_secs)?;
        validate_timeout("crawl.timeout_secs", self.crawl.timeout_secs)?;
        validate_timeout("llm.timeout_secs", self.llm.timeout_secs)?;

        if self.llm.api_version.trim().is_empty() {
            return Err(ConfigError::Validation(
                "llm.api_version must not be empty".to_string(),
            ));
        }
        if self.llm.max_turns == 0 {
            return Err(ConfigError::Validation(
                "llm.max_turns must be greater than zero".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be greater than zero".to_string(),
            ));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::Validation(
                "logging.level must be one of trace|debug|info|warn|error".to_string(),
            )),
        }
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("fieldbook.toml"), PathBuf::from("config/fieldbook.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{key} must start with http:// or https://")))
    }
}

fn validate_timeout(key: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 || value > 300 {
        return Err(ConfigError::Validation(format!("{key} must be in range 1..=300")));
    }
    Ok(())
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    backend: Option<BackendPatch>,
    crawl: Option<CrawlPatch>,
    llm: Option<LlmPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct BackendPatch {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CrawlPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    api_key: Option<String>,
    endpoint: Option<String>,
    deployment: Option<String>,
    api_version: Option<String>,
    timeout_secs: Option<u64>,
    max_turns: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    #[test]
    fn defaults_validate_without_file_or_env() {
        let _guard = env_lock().lock().expect("env lock");
        let config = AppConfig::load(LoadOptions::default()).expect("defaults are valid");

        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.server.port, 5000);
        assert!(config.crawl.api_key.is_none());
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn precedence_is_defaults_then_file_then_env_then_overrides() {
        let _guard = env_lock().lock().expect("env lock");
        env::set_var("FIELDBOOK_LLM_DEPLOYMENT", "gpt-from-env");

        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("fieldbook.toml");
        fs::write(
            &path,
            r#"
[backend]
base_url = "http://from-file:8000"

[llm]
deployment = "gpt-from-file"

[logging]
level = "warn"
"#,
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(path),
            overrides: ConfigOverrides {
                backend_base_url: Some("http://from-override:8000".to_string()),
                log_level: Some("debug".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("config load");

        clear_vars(&["FIELDBOOK_LLM_DEPLOYMENT"]);

        assert_eq!(config.backend.base_url, "http://from-override:8000");
        assert_eq!(config.llm.deployment, "gpt-from-env");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_backend_url_fails_validation() {
        let _guard = env_lock().lock().expect("env lock");
        env::set_var("FIELDBOOK_BACKEND_BASE_URL", "localhost:8000");

        let result = AppConfig::load(LoadOptions::default());
        clear_vars(&["FIELDBOOK_BACKEND_BASE_URL"]);

        let error = result.expect_err("scheme-less url should fail");
        assert!(matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("backend.base_url")
        ));
    }

    #[test]
    fn missing_required_file_is_reported() {
        let _guard = env_lock().lock().expect("env lock");
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("absent.toml");

        let result = AppConfig::load(LoadOptions {
            config_path: Some(path.clone()),
            require_file: true,
            ..LoadOptions::default()
        });

        assert!(matches!(result, Err(ConfigError::MissingConfigFile(p)) if p == path));
    }

    #[test]
    fn llm_credentials_are_optional_at_load_but_checked_for_agents() {
        let _guard = env_lock().lock().expect("env lock");
        let config = AppConfig::load(LoadOptions::default()).expect("load");

        let error = config.llm.ensure_complete().expect_err("no credentials configured");
        assert!(error.to_string().contains("llm.api_key"));

        let complete = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                llm_api_key: Some("key".to_string()),
                llm_endpoint: Some("https://example.openai.azure.com".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("load");
        complete.llm.ensure_complete().expect("credentials present");
    }

    #[test]
    fn secrets_do_not_leak_through_debug() {
        let _guard = env_lock().lock().expect("env lock");
        env::set_var("FIELDBOOK_CRAWL_API_KEY", "fc-secret-value");

        let config = AppConfig::load(LoadOptions::default()).expect("load");
        clear_vars(&["FIELDBOOK_CRAWL_API_KEY"]);

        let debug = format!("{config:?}");
        assert!(!debug.contains("fc-secret-value"));
        assert_eq!(
            config.crawl.api_key.as_ref().map(|key| key.expose_secret().to_string()),
            Some("fc-secret-value".to_string())
        );
    }
}
