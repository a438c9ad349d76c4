//! Configuration for meaxure text reconstruction.
//!
//! Settings come from three layers, later ones winning:
//!
//!     1. `defaults/meaxure.default.toml`, compiled into the crate
//!     2. an optional user TOML file (`--config`)
//!     3. command-line flags, applied as single-key overrides
//!
//! [`Loader`] stacks the layers and deserializes the result into [`MeaxureConfig`].
//! The library itself never reads configuration; binaries convert the loaded
//! value into engine options.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/meaxure.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct MeaxureConfig {
    pub markup: MarkupConfig,
    pub mapping: MappingConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

/// How render output is scanned for text runs.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkupConfig {
    pub run_tags: Vec<String>,
}

/// Knobs for pairing fragments with rendered lines.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingConfig {
    pub line_break: char,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub single_line_shortcut: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Stacks the configuration layers.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the compiled-in defaults.
    pub fn new() -> Self {
        Loader {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a user TOML file. The file must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        let file = File::from(path.as_ref()).format(FileFormat::Toml);
        Loader {
            builder: self.builder.add_source(file),
        }
    }

    /// Force the log filter, whatever the files say.
    pub fn with_log_level(self, level: &str) -> Result<Self, ConfigError> {
        self.set("logging.level", level)
    }

    /// Always render, even blocks that fit on one line.
    pub fn without_single_line_shortcut(self) -> Result<Self, ConfigError> {
        self.set("layout.single_line_shortcut", false)
    }

    fn set(self, key: &str, value: impl Into<ValueKind>) -> Result<Self, ConfigError> {
        Ok(Loader {
            builder: self.builder.set_override(key, value)?,
        })
    }

    pub fn build(self) -> Result<MeaxureConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}

/// The compiled-in defaults alone.
pub fn load_defaults() -> Result<MeaxureConfig, ConfigError> {
    Loader::new().build()
}
