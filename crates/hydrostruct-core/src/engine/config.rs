use crate::core::hydraulics::friction::FrictionType;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Policy constants of an import pass.
///
/// The defaults reproduce the documented behaviour; a TOML file may override any of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ImportConfig {
    /// Friction type assigned to bridges and culverts without usable friction data.
    pub default_friction_type: FrictionType,
    /// Friction value assigned together with `default_friction_type`.
    pub default_friction_value: f64,
    /// Cross-section width assumed for the weir offset heuristic on branches without cross-sections.
    pub fallback_cross_section_width: f64,
    /// Left offset assumed together with `fallback_cross_section_width`.
    pub fallback_cross_section_offset: f64,
    /// Appended to a location id to name its composite.
    pub composite_name_suffix: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_friction_type: FrictionType::Chezy,
            default_friction_value: 45.0,
            fallback_cross_section_width: 300.0,
            fallback_cross_section_offset: 100.0,
            composite_name_suffix: " [compound]".to_string(),
        }
    }
}

impl ImportConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_friction_value.is_finite() || self.default_friction_value < 0.0 {
            return Err(ConfigError::Invalid {
                field: "default-friction-value",
                reason: format!(
                    "must be a finite, non-negative number, got {}",
                    self.default_friction_value
                ),
            });
        }
        if !self.fallback_cross_section_width.is_finite()
            || self.fallback_cross_section_width <= 0.0
        {
            return Err(ConfigError::Invalid {
                field: "fallback-cross-section-width",
                reason: format!(
                    "must be a finite, positive number, got {}",
                    self.fallback_cross_section_width
                ),
            });
        }
        if !self.fallback_cross_section_offset.is_finite() {
            return Err(ConfigError::Invalid {
                field: "fallback-cross-section-offset",
                reason: "must be finite".to_string(),
            });
        }
        if self.composite_name_suffix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "composite-name-suffix",
                reason: "must not be empty, composite names would collide with structure names"
                    .to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ImportConfigBuilder {
    default_friction_type: Option<FrictionType>,
    default_friction_value: Option<f64>,
    fallback_cross_section_width: Option<f64>,
    fallback_cross_section_offset: Option<f64>,
    composite_name_suffix: Option<String>,
}

impl ImportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_friction(mut self, friction_type: FrictionType, value: f64) -> Self {
        self.default_friction_type = Some(friction_type);
        self.default_friction_value = Some(value);
        self
    }
    pub fn fallback_cross_section(mut self, width: f64, offset: f64) -> Self {
        self.fallback_cross_section_width = Some(width);
        self.fallback_cross_section_offset = Some(offset);
        self
    }
    pub fn composite_name_suffix(mut self, suffix: &str) -> Self {
        self.composite_name_suffix = Some(suffix.to_string());
        self
    }

    pub fn build(self) -> Result<ImportConfig, ConfigError> {
        let defaults = ImportConfig::default();
        let config = ImportConfig {
            default_friction_type: self
                .default_friction_type
                .unwrap_or(defaults.default_friction_type),
            default_friction_value: self
                .default_friction_value
                .unwrap_or(defaults.default_friction_value),
            fallback_cross_section_width: self
                .fallback_cross_section_width
                .unwrap_or(defaults.fallback_cross_section_width),
            fallback_cross_section_offset: self
                .fallback_cross_section_offset
                .unwrap_or(defaults.fallback_cross_section_offset),
            composite_name_suffix: self
                .composite_name_suffix
                .unwrap_or(defaults.composite_name_suffix),
        };
        config.validate()?;
        Ok(config)
    }
}
