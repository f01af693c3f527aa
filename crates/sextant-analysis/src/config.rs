use std::path::Path;

use serde::{Deserialize, Serialize};
use sextant_types::PrimitiveType;

use crate::error::ConfigError;

/// Knobs of the analysis, usually read from a TOML table:
///
/// ```toml
/// integer_fallback = "i64"
/// float_fallback = "f32"
/// trait_methods = true
/// detect_declaration_cycles = true
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Type of an integer literal without suffix
    pub integer_fallback: PrimitiveType,

    /// Type of a float literal without suffix
    pub float_fallback: PrimitiveType,

    /// Whether method calls may resolve to methods of trait impls
    pub trait_methods: bool,

    /// Cut re-entrant typing of a declaration (e.g. `type A = B; type B = A;`)
    /// short with `Unknown`. With this off such code does not terminate.
    pub detect_declaration_cycles: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            integer_fallback: PrimitiveType::I32,
            float_fallback: PrimitiveType::F64,
            trait_methods: true,
            detect_declaration_cycles: true,
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!("loading analysis configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.integer_fallback.is_integer() {
            return Err(ConfigError::InvalidFallback {
                key: "integer_fallback",
                expected: "integer",
                found: self.integer_fallback.to_string(),
            });
        }
        if !self.float_fallback.is_float() {
            return Err(ConfigError::InvalidFallback {
                key: "float_fallback",
                expected: "float",
                found: self.float_fallback.to_string(),
            });
        }
        Ok(())
    }
}
