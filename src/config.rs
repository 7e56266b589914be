// Settings for the privilege tooling

//! # Configuration
//!
//! Settings are layered with the `config` crate, later layers overriding
//! earlier ones:
//!
//! 1. built-in defaults
//! 2. a TOML file: the one passed explicitly, or `yawl-privileges.toml` in
//!    the working directory if present
//! 3. environment variables prefixed `YAWL_PRIVILEGES_`, with `__` between
//!    nested keys (`YAWL_PRIVILEGES_DECODE__STRICT=true`)
//!
//! ```toml
//! directory_path = "directory.json"
//!
//! [decode]
//! strict = false
//!
//! [logging]
//! level = "info"
//!
//! [output]
//! json = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::engine::DecodeMode;
use crate::Result;

const DEFAULT_FILE: &str = "yawl-privileges";
const ENV_PREFIX: &str = "YAWL_PRIVILEGES";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// JSON participant directory used to resolve ids and expand roles
    #[serde(default)]
    pub directory_path: Option<PathBuf>,

    #[serde(default)]
    pub decode: DecodeSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecodeSettings {
    /// Resolve `<participant>` ids through the directory, dropping unknown ones
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub json: bool,
}

impl Settings {
    /// Load settings from defaults, a TOML file and the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_FILE).required(false),
        };

        let settings = ::config::Config::builder()
            .set_default("decode.strict", false)?
            .set_default("logging.level", default_log_level())?
            .set_default("output.json", false)?
            .add_source(file)
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn decode_mode(&self) -> DecodeMode {
        if self.decode.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        }
    }
}
