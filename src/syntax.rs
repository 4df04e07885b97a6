//! Syntax module for the Ash language
//!
//! The grammar lives in `syntax/grammar.pest`; [`parser`] drives it and
//! [`capture`] turns the engine's output into the raw capture tree.

pub mod capture;
pub mod parser;

/// Represents a span in the source code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}
