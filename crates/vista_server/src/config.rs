//! Server configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`vista.toml` shipped with the crate)
//! 2. `~/.config/vista/vista.toml`
//! 3. `./vista.toml`
//! 4. An explicit file passed on the command line
//! 5. Environment variables such as `VISTA__PROVIDER__KIND=vertex`
//!
//! The loaded configuration is validated once and then treated as immutable.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use vista_error::{ConfigError, VistaResult};
use vista_models::ProviderConfig;
use vista_rate_limit::RateLimitConfig;

const DEFAULT_CONFIG: &str = include_str!("../../../vista.toml");

/// Listener and per-call limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Default per-call deadline in seconds; 0 disables it
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes
    pub max_request_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50051,
            request_timeout_secs: 60,
            max_request_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default per-call deadline, if enabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VistaConfig {
    /// Listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Admission control
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Analysis backend
    #[serde(default = "ProviderConfig::mock")]
    pub provider: ProviderConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for VistaConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            rate_limit: RateLimitConfig::default(),
            provider: ProviderConfig::mock(),
            logging: LoggingConfig::default(),
        }
    }
}

impl VistaConfig {
    /// Load configuration from a single file, without defaults or overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> VistaResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the layered configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vista_server::VistaConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = VistaConfig::load(None)?;
    /// println!("listening on {}", config.server.address());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(override_path: Option<&Path>) -> VistaResult<Self> {
        Self::load_with_env(
            override_path,
            Environment::with_prefix("VISTA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Load the layered configuration with an explicit environment source.
    #[instrument(skip(env))]
    pub fn load_with_env(override_path: Option<&Path>, env: Environment) -> VistaResult<Self> {
        debug!("Loading configuration with precedence: env > --config > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/vista/vista.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("vista").required(false));

        if let Some(path) = override_path {
            builder = builder.add_source(File::from(path));
        }

        let config: Self = builder
            .add_source(env)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        debug!(provider = %config.provider.kind, address = %config.server.address(), "Configuration loaded");
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::new("server.host must not be empty"));
        }
        if self.server.max_request_bytes == 0 {
            return Err(ConfigError::new("server.max_request_bytes must be greater than zero"));
        }
        self.rate_limit
            .validate()
            .map_err(|e| ConfigError::new(format!("rate_limit: {}", e)))?;
        self.provider.validate()
    }
}
