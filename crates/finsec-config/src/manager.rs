//! Configuration manager implementation

use std::net::SocketAddr;
use std::path::PathBuf;

use config::{Config, Environment, File};
use url::Url;

use crate::{
    error::{ConfigError, Result},
    types::DashboardConfig,
};

const ENV_PREFIX: &str = "FINSEC";

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Whether a missing file is an error
    required: bool,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Use the default config path; the file is optional
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            required: false,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use an explicit config file, which must exist
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            required: true,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Get default config path
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("finsec")
            .join("config.toml")
    }

    /// Load file and environment layers, then validate.
    pub fn load_config(&self) -> Result<DashboardConfig> {
        let builder = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(self.required))
            .add_source(Environment::with_prefix(&self.env_prefix));

        let config: DashboardConfig = builder.build()?.try_deserialize()?;
        self.validate_config(&config)?;

        tracing::debug!(
            path = %self.config_path.display(),
            remote = config.remote_endpoint().is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn validate_config(&self, config: &DashboardConfig) -> Result<()> {
        if config.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "bind_addr '{}' is not a socket address",
                config.bind_addr
            )));
        }
        if config.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if config.preview_rows == 0 {
            return Err(ConfigError::Validation(
                "preview_rows must be greater than 0".to_string(),
            ));
        }
        if config.max_upload_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        if config.session_idle_secs == 0 {
            return Err(ConfigError::Validation(
                "session_idle_secs must be greater than 0".to_string(),
            ));
        }
        if let Some(api_url) = config.api_url.as_deref().filter(|u| !u.is_empty()) {
            let url = Url::parse(api_url)
                .map_err(|e| ConfigError::Validation(format!("api_url is invalid: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(format!(
                    "api_url must use http or https, got '{}'",
                    url.scheme()
                )));
            }
        }
        if config.api_url.is_some() != config.api_key.is_some() {
            tracing::warn!("only one of api_url/api_key is set; remote detection disabled");
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for key in [
            "FINSEC_API_URL",
            "FINSEC_API_KEY",
            "FINSEC_TIMEOUT_SECS",
            "FINSEC_BIND_ADDR",
            "FINSEC_SESSION_IDLE_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_missing_optional_file_yields_defaults() {
        clear_env();
        let manager = ConfigManager {
            config_path: PathBuf::from("/nonexistent/finsec/config.toml"),
            required: false,
            env_prefix: ENV_PREFIX.to_string(),
        };

        let config = manager.load_config().unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_fails() {
        clear_env();
        let manager = ConfigManager::with_path(PathBuf::from("/nonexistent/finsec.toml"));
        assert!(matches!(manager.load_config(), Err(ConfigError::Load(_))));
    }

    #[test]
    #[serial]
    fn test_file_values_loaded() {
        clear_env();
        let file = write_config(
            r#"
bind_addr = "0.0.0.0:9000"
api_url = "https://detect.example.com/detect"
api_key = "file-key"
preview_rows = 3
"#,
        );

        let config = ConfigManager::with_path(file.path().to_path_buf())
            .load_config()
            .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.preview_rows, 3);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(
            config.remote_endpoint().map(|e| e.api_key),
            Some("file-key")
        );
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        clear_env();
        let file = write_config("api_url = \"https://file.example.com\"\napi_key = \"file-key\"\n");
        std::env::set_var("FINSEC_API_URL", "https://env.example.com/detect");
        std::env::set_var("FINSEC_API_KEY", "env-key");
        std::env::set_var("FINSEC_TIMEOUT_SECS", "3");

        let result = ConfigManager::with_path(file.path().to_path_buf()).load_config();
        clear_env();
        let config = result.unwrap();

        assert_eq!(config.api_url.as_deref(), Some("https://env.example.com/detect"));
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    #[serial]
    fn test_numeric_looking_api_key_stays_verbatim() {
        clear_env();
        std::env::set_var("FINSEC_API_URL", "https://env.example.com/detect");
        std::env::set_var("FINSEC_API_KEY", "00123");
        std::env::set_var("FINSEC_SESSION_IDLE_SECS", "60");

        let manager = ConfigManager {
            config_path: PathBuf::from("/nonexistent/finsec/config.toml"),
            required: false,
            env_prefix: ENV_PREFIX.to_string(),
        };
        let result = manager.load_config();
        clear_env();
        let config = result.unwrap();

        assert_eq!(config.api_key.as_deref(), Some("00123"));
        assert_eq!(
            config.remote_endpoint().map(|e| e.api_key),
            Some("00123")
        );
        assert_eq!(config.session_idle_secs, 60);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let manager = ConfigManager::new();

        let bad_bind = DashboardConfig {
            bind_addr: "localhost".into(),
            ..Default::default()
        };
        assert!(matches!(
            manager.validate_config(&bad_bind),
            Err(ConfigError::Validation(_))
        ));

        let zero_timeout = DashboardConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(manager.validate_config(&zero_timeout).is_err());

        let zero_idle = DashboardConfig {
            session_idle_secs: 0,
            ..Default::default()
        };
        assert!(manager.validate_config(&zero_idle).is_err());

        let ftp = DashboardConfig {
            api_url: Some("ftp://detect.example.com".into()),
            api_key: Some("k".into()),
            ..Default::default()
        };
        assert!(manager.validate_config(&ftp).is_err());
    }
}
