//! Reference resolution and typification.
//!
//! The two halves call each other: resolving `recv.method()` needs the type of
//! `recv`, and typing a path needs the declaration it resolves to. Both live
//! in this crate and recurse through plain function calls; every hop either
//! moves to a strictly smaller node or goes through a declaration, and
//! declarations are guarded against re-entry (see [`AnalysisConfig`]).
//!
//! Everything is computed on demand from one [`SyntaxTree`] snapshot through
//! an [`Analysis`] context. Nothing is cached between calls.
//!
//! [`SyntaxTree`]: sextant_syntax::SyntaxTree

pub mod config;
pub mod db;
pub mod error;
pub mod resolve;
pub mod typify;

pub use config::AnalysisConfig;
pub use db::Analysis;
pub use error::{AnalysisError, ConfigError};
pub use resolve::scope::{LexicalScopes, NameLookup, Namespace};
pub use resolve::{Reference, ReferenceKind, ResolveReference, ResolveResult};
pub use typify::{resolved_type, typify, typify_expr, typify_item, typify_type, try_typify_expr};
