//! Ash Error Handling - Unified Encapsulated API
//!
//! Every failure the crate reports to a caller is an [`AshError`]: what went wrong
//! ([`ErrorKind`]), where ([`SourceInfo`]) and how to help ([`DiagnosticInfo`]).
//! Errors are built through an [`ErrorReporting`] context, never by hand.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// The text an error points into, with a display name.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// A sentence handed to the parser directly.
    pub fn from_input(content: impl Into<String>) -> Self {
        Self {
            name: "sentence".to_string(),
            content: content.into(),
        }
    }

    /// A sentence read from a file, named after the file and line.
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a fallback when real source is unavailable
    pub fn fallback(context: &str) -> Self {
        Self {
            name: "fallback".to_string(),
            content: format!("// {}", context),
        }
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::fallback("default context")
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single error type - no wrapper, no variants, just essential data
#[derive(Debug)]
pub struct AshError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened
    pub source_info: SourceInfo,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// All error types as a clean enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// No alternative matched at the furthest position reached.
    #[error("Syntax error at line {line}, column {column}: expected {}", expected_list(.expected))]
    Syntax {
        position: usize,
        line: usize,
        column: usize,
        expected: Vec<String>,
        found: Option<char>,
    },

    /// A sentence matched, but input remained after it.
    #[error("Syntax error at line {line}, column {column}: unexpected input after the sentence")]
    TrailingInput {
        position: usize,
        line: usize,
        column: usize,
        expected: Vec<String>,
        found: Option<char>,
    },

    /// A canonical tree did not have the shape of a sentence.
    #[error("Malformed tree: {message}")]
    MalformedTree { message: String },

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },
}

fn expected_list(expected: &[String]) -> String {
    match expected {
        [] => "a sentence".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
}

#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Internal,
    Io,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax { .. } | Self::TrailingInput { .. } => ErrorCategory::Parse,
            Self::MalformedTree { .. } => ErrorCategory::Internal,
            Self::Io { .. } => ErrorCategory::Io,
        }
    }

    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "syntax",
            Self::TrailingInput { .. } => "trailing_input",
            Self::MalformedTree { .. } => "malformed_tree",
            Self::Io { .. } => "io",
        }
    }
}

impl AshError {
    /// Byte offset of the furthest position the parser reached, for syntax failures.
    pub fn position(&self) -> Option<usize> {
        match &self.kind {
            ErrorKind::Syntax { position, .. } | ErrorKind::TrailingInput { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }

    /// Rules attempted at the furthest position, in the order the parser tried them.
    pub fn expected(&self) -> &[String] {
        match &self.kind {
            ErrorKind::Syntax { expected, .. } | ErrorKind::TrailingInput { expected, .. } => {
                expected
            }
            _ => &[],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Renames the source shown in diagnostics, e.g. to `file.ash:3`.
    pub fn with_source_name(mut self, name: impl AsRef<str>) -> Self {
        let content = self.source_info.source.inner().clone();
        self.source_info.source = Arc::new(NamedSource::new(name, content));
        self
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::Syntax { found: Some(ch), .. } => format!("unexpected '{}'", ch),
            ErrorKind::Syntax { found: None, .. } => "sentence ends here".into(),
            ErrorKind::TrailingInput { .. } => "not part of the sentence".into(),
            ErrorKind::MalformedTree { .. } => "malformed tree".into(),
            ErrorKind::Io { .. } => "unreadable".into(),
        }
    }
}

impl std::error::Error for AshError {}

impl fmt::Display for AshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Diagnostic for AshError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

// ============================================================================
// ERROR CONSTRUCTION
// ============================================================================

/// Context-aware error creation
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> AshError;

    fn malformed_tree(&self, message: &str) -> AshError {
        self.report(
            ErrorKind::MalformedTree {
                message: message.into(),
            },
            unspanned(),
        )
    }

    fn io_error(&self, path: &str, message: &str) -> AshError {
        self.report(
            ErrorKind::Io {
                path: path.into(),
                message: message.into(),
            },
            unspanned(),
        )
    }
}

/// Creates errors for one source text during one phase (`parse`, `typed`, `cli`).
pub struct ParseContext {
    pub source: SourceContext,
    pub phase: String,
}

impl ParseContext {
    pub fn new(source: SourceContext, phase: impl Into<String>) -> Self {
        Self {
            source,
            phase: phase.into(),
        }
    }
}

impl ErrorReporting for ParseContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> AshError {
        let error_code = format!("ash::{}::{}", self.phase, kind.code_suffix());
        let help = match &kind {
            ErrorKind::Syntax {
                line,
                column,
                expected,
                ..
            }
            | ErrorKind::TrailingInput {
                line,
                column,
                expected,
                ..
            } => Some(attempt_tree(*line, *column, expected)),
            ErrorKind::MalformedTree { .. } => {
                Some("This is an internal parser error. Please report this as a bug.".into())
            }
            ErrorKind::Io { .. } => None,
        };

        AshError {
            kind,
            source_info: SourceInfo {
                source: self.source.to_named_source(),
                primary_span: span,
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }
}

/// Renders the attempted rules as a small tree under the failure position.
pub fn attempt_tree(line: usize, column: usize, expected: &[String]) -> String {
    let mut out = format!("at line {}, column {}, the parser tried:", line, column);
    if expected.is_empty() {
        out.push_str("\n└── (no named rule)");
    }
    for (index, name) in expected.iter().enumerate() {
        let branch = if index + 1 == expected.len() {
            "└──"
        } else {
            "├──"
        };
        out.push_str(&format!("\n{} {}", branch, name));
    }
    out
}

/// Creates a placeholder span for errors not tied to a specific source location.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints an AshError with full miette diagnostics
pub fn print_error(error: AshError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_list_joins_with_or() {
        let names = vec!["noun".to_string(), "verb".to_string(), "question".to_string()];
        assert_eq!(expected_list(&names), "noun, verb or question");
        assert_eq!(expected_list(&names[..1]), "noun");
        assert_eq!(expected_list(&[]), "a sentence");
    }

    #[test]
    fn attempt_tree_draws_branches() {
        let tree = attempt_tree(1, 10, &["object".into(), "end of input".into()]);
        assert_eq!(
            tree,
            "at line 1, column 10, the parser tried:\n├── object\n└── end of input"
        );
    }

    #[test]
    fn report_sets_code_and_category() {
        let ctx = ParseContext::new(SourceContext::from_input("shi"), "parse");
        let error = ctx.report(
            ErrorKind::Syntax {
                position: 3,
                line: 1,
                column: 4,
                expected: vec!["verb phrase".into()],
                found: None,
            },
            SourceSpan::from(3..3),
        );
        assert_eq!(error.diagnostic_info.error_code, "ash::parse::syntax");
        assert_eq!(error.category(), ErrorCategory::Parse);
        assert_eq!(error.position(), Some(3));
        assert_eq!(
            error.to_string(),
            "Syntax error at line 1, column 4: expected verb phrase"
        );
    }

    #[test]
    fn io_errors_have_no_position() {
        let ctx = ParseContext::new(SourceContext::default(), "cli");
        let error = ctx.io_error("missing.ash", "not found");
        assert_eq!(error.category(), ErrorCategory::Io);
        assert_eq!(error.position(), None);
        assert!(error.expected().is_empty());
    }
}
