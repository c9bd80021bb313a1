use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use hydrostruct::core::hydraulics::friction::FrictionType;
use hydrostruct::engine::config::{ImportConfig, ImportConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Import settings as written in a config file; every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialImportConfig {
    default_friction_type: Option<FrictionType>,
    default_friction_value: Option<f64>,
    fallback_cross_section_width: Option<f64>,
    fallback_cross_section_offset: Option<f64>,
    composite_name_suffix: Option<String>,
}

impl PartialImportConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading import configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// The file named by `--config`, or an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Command-line overrides win over the file, the file wins over the defaults.
    pub fn merge_with_cli(self, args: &ImportArgs) -> Result<ImportConfig> {
        let defaults = ImportConfig::default();

        let friction_type = args
            .friction_type
            .or(self.default_friction_type)
            .unwrap_or(defaults.default_friction_type);
        let friction_value = args
            .friction_value
            .or(self.default_friction_value)
            .unwrap_or(defaults.default_friction_value);
        let suffix = args
            .composite_suffix
            .as_deref()
            .or(self.composite_name_suffix.as_deref())
            .unwrap_or(&defaults.composite_name_suffix);

        ImportConfigBuilder::new()
            .default_friction(friction_type, friction_value)
            .fallback_cross_section(
                self.fallback_cross_section_width
                    .unwrap_or(defaults.fallback_cross_section_width),
                self.fallback_cross_section_offset
                    .unwrap_or(defaults.fallback_cross_section_offset),
            )
            .composite_name_suffix(suffix)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}
