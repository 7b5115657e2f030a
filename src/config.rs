use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pm-radar.toml";

/// Prefix for environment overrides, e.g. `PM_RADAR_BIND_ADDR`.
pub const ENV_PREFIX: &str = "PM_RADAR";

/// Runtime configuration.
///
/// Layered, lowest precedence first: built-in defaults, an optional TOML
/// file, then `PM_RADAR_*` environment variables (see [`AppConfig::environment`]).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Socket address the HTTP server listens on.
    pub bind_addr: String,
    /// Load the bundled fixture data at start-up.
    pub seed_demo_data: bool,
    /// Built single-page client to serve for non-API paths.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Allow any origin, for a client dev server running elsewhere.
    pub cors_permissive: bool,
}

impl AppConfig {
    /// Builder pre-loaded with the defaults.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("bind_addr", "127.0.0.1:5000")?
            .set_default("seed_demo_data", true)?
            .set_default("cors_permissive", false)
    }

    /// Load from defaults, `file` (or `pm-radar.toml` if present) and the environment.
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::defaults()?
            .add_source(file_source)
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// The `PM_RADAR_*` layer. Values such as `"false"` parse into typed fields.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).try_parsing(true)
    }
}
