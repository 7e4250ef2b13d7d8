//! Configuration loader for atlas.
//!
//! `defaults/atlas.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Applications layer user files on top of those
//! defaults via [`Loader`] before deserializing into [`AtlasConfig`].

use atlas_babel::{ConvertOptions, JsonStyle};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/atlas.default.toml");

/// Name of the optional project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "atlas.toml";

/// Top-level configuration consumed by atlas applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AtlasConfig {
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
}

/// Conversion knobs applied after encoding.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// 0 disables the cap
    pub max_output_chars: usize,
    pub adf: AdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdfConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// A `tracing` filter directive, e.g. `warn` or `atlas_babel=debug`
    pub level: String,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            json_style: if config.adf.pretty {
                JsonStyle::Pretty
            } else {
                JsonStyle::Compact
            },
            max_output_chars: (config.max_output_chars > 0).then_some(config.max_output_chars),
        }
    }
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(config: ConvertConfig) -> Self {
        ConvertOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AtlasConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn load_from(contents: &str) -> AtlasConfig {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.toml");
        fs::write(&path, contents).unwrap();
        Loader::new().with_file(&path).build().expect("config to build")
    }

    #[test]
    fn loads_default_config() {
        let config = Loader::new().build().expect("defaults to deserialize");
        assert_eq!(config.convert.max_output_chars, 0);
        assert!(!config.convert.adf.pretty);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn later_files_win() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("atlas.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&local, "[convert.adf]\npretty = true\n[logging]\nlevel = \"info\"\n").unwrap();
        fs::write(&explicit, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Loader::new()
            .with_optional_file(&local)
            .with_file(&explicit)
            .build()
            .expect("config to build");
        assert!(config.convert.adf.pretty);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn layers_user_file_over_defaults() {
        let config = load_from("[convert]\nmax_output_chars = 32760\n");
        assert_eq!(config.convert.max_output_chars, 32760);
        // Untouched keys keep their defaults
        assert!(!config.convert.adf.pretty);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Loader::new().with_file(dir.path().join("absent.toml")).build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .expect("config to build");
        assert_eq!(config.convert.max_output_chars, 0);
    }

    #[test]
    fn convert_config_maps_to_convert_options() {
        let config = load_from("[convert]\nmax_output_chars = 100\n[convert.adf]\npretty = true\n");
        let options = ConvertOptions::from(&config.convert);
        assert_eq!(options.json_style, JsonStyle::Pretty);
        assert_eq!(options.max_output_chars, Some(100));

        let defaults: ConvertOptions = Loader::new().build().unwrap().convert.into();
        assert_eq!(defaults, ConvertOptions::default());
    }
}
