use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use sextant_syntax::SyntaxError;
use thiserror::Error;

/// Defects in the analysis itself.
///
/// None of these describe a problem with the analysed program: incomplete or
/// wrong code yields `Type::Unknown` or `ResolveResult::Unresolved` instead.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A reference anchor that is not a direct child of its element.
    #[error("Reference anchor `{anchor_text}` is not a direct child of `{element_kind}` `{element_text}`\n{location}")]
    #[diagnostic(
        code(sextant_analysis::detached_anchor),
        help("the anchor of a reference must be an immediate child of the referencing node")
    )]
    DetachedAnchor {
        element_kind: String,
        element_text: String,
        anchor_text: String,
        /// `path:line:column` of the element
        location: String,
        #[label("anchor")]
        span: SourceSpan,
    },

    /// A computing visitor finished without a result.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unhandled(#[from] SyntaxError),
}

/// Errors loading an [`AnalysisConfig`](crate::AnalysisConfig).
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Error reading analysis configuration {path}: {message}")]
    #[diagnostic(
        code(sextant_analysis::config_io),
        help("Check file permissions and ensure the file is not corrupted")
    )]
    Io { path: PathBuf, message: String },

    #[error("Invalid analysis configuration: {0}")]
    #[diagnostic(
        code(sextant_analysis::config_parse),
        help("Check the TOML syntax and the names of the keys")
    )]
    Parse(String),

    #[error("`{key}` must name a {expected} type, found `{found}`")]
    #[diagnostic(code(sextant_analysis::invalid_fallback))]
    InvalidFallback {
        key: &'static str,
        expected: &'static str,
        found: String,
    },
}

// Conversion from toml::de::Error to ConfigError
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
