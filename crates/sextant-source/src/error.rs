use std::path::PathBuf;
use thiserror::Error;
use miette::Diagnostic;

/// Errors that can occur when loading a source file
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The file could not be read from disk
    #[error("Could not read source file {path}: {message}")]
    #[diagnostic(
        code(sextant_source::io),
        help("Make sure the path exists and has proper permissions")
    )]
    Io {
        path: PathBuf,
        message: String,
    },

    /// The file exists but is not valid UTF-8
    #[error("Source file {0} is not valid UTF-8")]
    #[diagnostic(code(sextant_source::encoding))]
    InvalidEncoding(PathBuf),
}
