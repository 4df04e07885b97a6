//! Ash Parser
//!
//! Anchors the sentence grammar against the whole input, builds the raw capture
//! tree and hands it to the normalizer. This parser is purely syntactic: token
//! tags are recognised but never decoded.

use miette::SourceSpan;
use pest::error::{Error, ErrorVariant, InputLocation, LineColLocation};
use pest::Parser;
use pest_derive::Parser;
use tracing::debug;

use crate::ast::{normalize, Sentence, Tree};
use crate::errors::{AshError, ErrorKind, ErrorReporting, ParseContext, SourceContext};
use crate::syntax::capture::{Capture, Labels};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub struct AshParser;

impl Rule {
    /// Human-readable name used in diagnostics.
    #[allow(unreachable_patterns)]
    pub fn describe(self) -> &'static str {
        match self {
            Rule::noun => "noun",
            Rule::adjective => "adjective",
            Rule::verb => "verb",
            Rule::adjectives => "adjectives",
            Rule::head => "noun phrase",
            Rule::possessor => "possessor (ko ...)",
            Rule::possessors => "possessors",
            Rule::subject => "subject",
            Rule::object => "object",
            Rule::indirect_object => "indirect object (kun ...)",
            Rule::target => "noun phrase",
            Rule::temporal_marker => "temporal marker (time, timet, timem)",
            Rule::instrumental_marker => "instrumental marker (tem, temna)",
            Rule::causal_marker => "causal marker (tozem, tozet)",
            Rule::temporal => "temporal adjunct",
            Rule::instrumental => "instrumental adjunct",
            Rule::causal => "causal adjunct",
            Rule::reason => "clause",
            Rule::adjunct => "adjunct",
            Rule::adjuncts => "adjuncts",
            Rule::verb_phrase => "verb phrase",
            Rule::statement => "statement",
            Rule::command => "command",
            Rule::question => "question (ka ...)",
            Rule::sentence => "sentence",
            Rule::EOI => "end of input",
            _ => "input",
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// The Ash rule set together with its capture labels.
///
/// Build it once and share it: it holds no per-call state, so one `Grammar` can
/// serve any number of parse calls, from any number of threads.
#[derive(Debug, Clone)]
pub struct Grammar {
    labels: Labels,
    root: Rule,
}

impl Grammar {
    pub fn new() -> Self {
        Self {
            labels: Labels::new(),
            root: Rule::sentence,
        }
    }

    /// Parse a sentence into its canonical tree.
    pub fn parse(&self, input: &str) -> Result<Tree, AshError> {
        let raw = self.parse_raw(input)?;
        Ok(normalize(&raw))
    }

    /// Parse a sentence into the raw capture tree, before normalization.
    pub fn parse_raw<'i>(&self, input: &'i str) -> Result<Capture<'i>, AshError> {
        debug!(len = input.len(), "parsing sentence");
        let context = ParseContext::new(SourceContext::from_input(input), "parse");

        let mut pairs = AshParser::parse(self.root, input)
            .map_err(|error| convert_parse_error(error, input, &context))?;

        let root = pairs
            .next()
            .ok_or_else(|| context.malformed_tree("the sentence rule produced no match"))?;

        self.labels
            .capture(root)
            .ok_or_else(|| context.malformed_tree("the sentence rule has no capture label"))
    }

    /// Parse a sentence into the typed view.
    pub fn parse_sentence(&self, input: &str) -> Result<Sentence, AshError> {
        let tree = self.parse(input)?;
        Sentence::from_tree(&tree)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a sentence with an explicitly provided grammar.
pub fn parse(grammar: &Grammar, input: &str) -> Result<Tree, AshError> {
    grammar.parse(input)
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(error: Error<Rule>, input: &str, context: &ParseContext) -> AshError {
    let position = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let (line, column) = match error.line_col {
        LineColLocation::Pos(line_col) => line_col,
        LineColLocation::Span(line_col, _) => line_col,
    };
    let attempts = match &error.variant {
        ErrorVariant::ParsingError { positives, .. } => positives.clone(),
        ErrorVariant::CustomError { .. } => Vec::new(),
    };

    let found = input.get(position..).and_then(|rest| rest.chars().next());
    let span = match found {
        Some(ch) => SourceSpan::from(position..position + ch.len_utf8()),
        None => last_char_span(input, position),
    };

    let mut expected: Vec<String> = Vec::with_capacity(attempts.len());
    for rule in &attempts {
        let name = rule.describe().to_string();
        if !expected.contains(&name) {
            expected.push(name);
        }
    }

    debug!(position, ?attempts, "sentence rejected");

    let kind = if attempts.contains(&Rule::EOI) {
        ErrorKind::TrailingInput {
            position,
            line,
            column,
            expected,
            found,
        }
    } else {
        ErrorKind::Syntax {
            position,
            line,
            column,
            expected,
            found,
        }
    };
    context.report(kind, span)
}

/// Points at the character before `position`. miette drops labels on an
/// empty span at the end of the source.
fn last_char_span(input: &str, position: usize) -> SourceSpan {
    match input.get(..position).and_then(|before| before.chars().next_back()) {
        Some(ch) => SourceSpan::from(position - ch.len_utf8()..position),
        None => SourceSpan::from(position..position),
    }
}
