//! Source file management for Sextant.
//!
//! This crate owns the text the syntax tree is parsed from. It provides:
//! - [`SourceFile`]: an immutable `(path, text)` pair with a line index
//! - [`TextRange`]: half-open byte ranges into a source file
//! - [`Location`]: 1-based `line:column` positions for diagnostics
//!
//! Nothing here is cached across edits; a new snapshot of a file is a new
//! [`SourceFile`].

mod error;
mod file;
mod range;

pub use error::SourceError;
pub use file::{Location, SourceFile};
pub use range::TextRange;
