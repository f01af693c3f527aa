use thiserror::Error;
use miette::{Diagnostic, SourceSpan};

#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Parser initialization error: {0}")]
    #[diagnostic(code(sextant_syntax::parser_init))]
    ParserInitError(String),

    #[error("Parse error: {message}")]
    #[diagnostic(code(sextant_syntax::parse_error))]
    ParseError {
        message: String,
        #[label("error occurred here")]
        span: Option<SourceSpan>,
    },

    /// An `ERROR` or `MISSING` node in an otherwise usable tree.
    #[error("Syntax error: {message}")]
    #[diagnostic(code(sextant_syntax::syntax_error))]
    SyntaxError {
        message: String,
        #[label("error occurred here")]
        span: Option<SourceSpan>,
        #[help("expected: {expected:?}")]
        expected: Option<String>,
        #[help("found: {found:?}")]
        found: Option<String>,
    },

    /// A computing visitor finished without producing a result.
    ///
    /// This is a defect in the visitor, not a property of the input program.
    #[error("Element `{kind}` was unhandled\n{location}\n{text}")]
    #[diagnostic(
        code(sextant_syntax::unhandled_node),
        help("every dispatch path of a computing visitor must call `go`")
    )]
    UnhandledNode {
        kind: String,
        text: String,
        /// `path:line:column` of the node start.
        location: String,
        #[label("no result for this node")]
        span: SourceSpan,
    },
}
