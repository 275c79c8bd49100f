//! Structured parser diagnostics.
//!
//! The parser never prints; it records [`Diagnostic`]s into an
//! [`ErrorReporter`] owned by the caller.  Recoverable problems (a misplaced
//! `break`, a function defined in a for-loop init block) are recorded and
//! parsing continues; fatal problems are recorded and additionally surface
//! as a [`SolenoidError::FatalParse`] that unwinds the parse.

use crate::error::SolenoidError;
use crate::parser::scanner::Span;

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostic
// ─────────────────────────────────────────────────────────────────────────────

/// The severity class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A recoverable violation; an AST is still produced.
    SyntaxError,
    /// A fatal violation; the parse is abandoned.
    ParserError,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::SyntaxError => "SyntaxError",
            DiagnosticKind::ParserError => "ParserError",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic message with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// ErrorReporter
// ─────────────────────────────────────────────────────────────────────────────

/// Accumulating sink for parser diagnostics.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recoverable syntax error; the parse continues.
    pub fn syntax_error(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::SyntaxError,
            span,
            message: message.into(),
        });
    }

    /// Record a fatal parser error and return the error value the parser
    /// propagates to abandon the parse.
    pub fn fatal_parser_error(&mut self, span: Span, message: impl Into<String>) -> SolenoidError {
        let message = message.into();
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::ParserError,
            span,
            message: message.clone(),
        });
        SolenoidError::FatalParse(message)
    }

    /// All diagnostics recorded so far, in emission order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_accumulates() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.has_errors());
        reporter.syntax_error(Span::default(), "first");
        reporter.syntax_error(Span::default(), "second");
        assert_eq!(reporter.errors().len(), 2);
        assert_eq!(reporter.errors()[0].kind, DiagnosticKind::SyntaxError);
        assert_eq!(reporter.errors()[1].message, "second");
    }

    #[test]
    fn test_fatal_records_and_returns_error() {
        let mut reporter = ErrorReporter::new();
        let err = reporter.fatal_parser_error(Span::default(), "boom");
        assert_eq!(err, SolenoidError::FatalParse("boom".to_string()));
        assert_eq!(reporter.errors().len(), 1);
        assert_eq!(reporter.errors()[0].kind, DiagnosticKind::ParserError);
    }
}
