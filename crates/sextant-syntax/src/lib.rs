//! Syntax layer of the Sextant semantic core.
//!
//! Parsing is delegated to tree-sitter and the published Rust grammar. The
//! analysis never mutates the tree; it reads nodes through [`SyntaxTree`],
//! classifies them with [`SyntaxKind`] and walks them with [`Visitor`].

pub mod common;
pub mod error;
pub mod kind;
pub mod visitor;

use std::path::PathBuf;
use std::sync::Arc;

pub use error::SyntaxError;
pub use kind::SyntaxKind;
pub use visitor::{accept, walk_children, ComputingVisitor, Visitor};
pub use tree_sitter::Node;

use sextant_source::{Location, SourceFile, TextRange};
use tree_sitter::{Parser, Tree};

pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    /// Create a new parser for Rust source
    pub fn new() -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();
        let language = tree_sitter_rust::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| SyntaxError::ParserInitError(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse a source file into an immutable syntax tree snapshot
    pub fn parse(&mut self, file: Arc<SourceFile>) -> Result<SyntaxTree, SyntaxError> {
        let tree = self
            .parser
            .parse(file.text(), None)
            .ok_or_else(|| SyntaxError::ParseError {
                message: "Failed to parse source code".to_string(),
                span: None,
            })?;
        let snapshot = SyntaxTree { file, tree };
        let errors = snapshot.errors();
        if !errors.is_empty() {
            log::debug!(
                "{}: {} syntax error(s), continuing with a partial tree",
                snapshot.file.path().display(),
                errors.len()
            );
        }
        Ok(snapshot)
    }
}

/// A parsed source file.
///
/// Nodes borrowed from a `SyntaxTree` carry its lifetime, so nothing computed
/// from them can outlive the snapshot.
pub struct SyntaxTree {
    file: Arc<SourceFile>,
    tree: Tree,
}

impl SyntaxTree {
    pub fn parse(file: SourceFile) -> Result<Self, SyntaxError> {
        RustParser::new()?.parse(Arc::new(file))
    }

    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, SyntaxError> {
        Self::parse(SourceFile::new(path, text))
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn source(&self) -> &str {
        self.file.text()
    }

    pub fn text(&self, node: Node) -> &str {
        common::node_text(&node, self.file.text())
    }

    pub fn range(&self, node: Node) -> TextRange {
        common::text_range(&node)
    }

    pub fn location(&self, node: Node) -> Location {
        self.file.location(node.start_byte())
    }

    /// `path:line:column` of the node start
    pub fn describe(&self, node: Node) -> String {
        self.file.describe(node.start_byte())
    }

    /// Smallest named node covering the character at `offset`
    pub fn node_at(&self, offset: usize) -> Option<Node<'_>> {
        if offset >= self.file.text().len() {
            return None;
        }
        self.root().named_descendant_for_byte_range(offset, offset + 1)
    }

    /// `ERROR` and `MISSING` nodes of the tree, as diagnostics.
    ///
    /// Analysis runs on the partial tree regardless; these are informational.
    pub fn errors(&self) -> Vec<SyntaxError> {
        let mut errors = Vec::new();
        if self.root().has_error() {
            collect_ts_errors(&self.root(), self.file.text(), &mut errors);
        }
        errors
    }
}

/// Helper function to recursively collect tree-sitter errors
fn collect_ts_errors(node: &Node, source: &str, errors: &mut Vec<SyntaxError>) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxError::SyntaxError {
            message: format!(
                "unexpected {} near \"{}\"",
                if node.is_missing() { "MISSING" } else { "token" },
                node.utf8_text(source.as_bytes()).unwrap_or("[invalid UTF-8]")
            ),
            span: Some(common::create_span(node)),
            expected: if node.is_missing() { Some(node.kind().to_string()) } else { None },
            found: if node.is_error() { Some(node.kind().to_string()) } else { None },
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            collect_ts_errors(&child, source, errors);
        }
    }
}
