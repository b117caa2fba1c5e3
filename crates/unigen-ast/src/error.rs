//! Error types for the AST template engine
//!
//! Covers both ingress (parsing source text) and structural edits
//! (locating and splicing nodes).

/// Errors raised while parsing or mutating a [`SourceTree`](crate::SourceTree)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    /// Grammar could not be loaded into the parser
    #[error("parser initialization failed: {0}")]
    ParserInit(String),

    /// Parser returned no tree
    #[error("parse failed")]
    ParseFailed,

    /// Source (or the result of an edit) is not valid TypeScript
    #[error("syntax error at {line}:{column}")]
    Syntax { line: usize, column: usize },

    /// No top-level import matched the selector
    #[error("import not found: {0}")]
    ImportNotFound(String),

    /// Named declaration is absent
    #[error("target declaration not found: {0}")]
    DeclarationNotFound(String),

    /// A "sole declaration" edit found zero or several candidates
    #[error("expected exactly one top-level declaration, found {0}")]
    AmbiguousDeclaration(usize),

    /// Object literal lacks the requested property
    #[error("property not found: {0}")]
    PropertyNotFound(String),

    /// Tree does not have the shape an edit requires
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),
}

impl AstError {
    /// Create structural mismatch error
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::StructuralMismatch(message.into())
    }
}
