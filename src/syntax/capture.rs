//! Raw capture tree.
//!
//! pest hands back a tree of rule pairs with no notion of field names or lists. The
//! capture layer reads that tree through a fixed table of labels and turns each
//! labelled rule into one of three raw shapes: a matched slice, a keyed node, or a
//! sequence. Rules without a label (such as `EOI`) are structural and are dropped.

use std::collections::HashMap;

use pest::iterators::Pair;
use tracing::trace;

use crate::syntax::{parser::Rule, Span};

/// How a labelled rule contributes to the raw tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The matched text, verbatim (trailing whitespace included).
    Text,
    /// One entry per labelled child, keyed by the child's label, in match order.
    Node,
    /// One element per labelled child, in match order. Child keys are dropped.
    Sequence,
}

/// The key and shape a rule is captured under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub key: &'static str,
    pub shape: Shape,
}

const LABELS: &[(Rule, &str, Shape)] = &[
    // tokens
    (Rule::noun, "noun", Shape::Text),
    (Rule::adjective, "adjective", Shape::Text),
    (Rule::verb, "verb", Shape::Text),
    (Rule::temporal_marker, "marker", Shape::Text),
    (Rule::instrumental_marker, "marker", Shape::Text),
    (Rule::causal_marker, "marker", Shape::Text),
    // noun phrases
    (Rule::adjectives, "adjectives", Shape::Sequence),
    (Rule::head, "head", Shape::Node),
    // keyed for lookups, but list items lose their key: possessors hold bare head groups
    (Rule::possessor, "possessor", Shape::Node),
    (Rule::possessors, "possessors", Shape::Sequence),
    (Rule::subject, "subject", Shape::Node),
    (Rule::object, "object", Shape::Node),
    (Rule::indirect_object, "indirect_object", Shape::Node),
    (Rule::target, "target", Shape::Node),
    // adjuncts
    (Rule::temporal, "temporal", Shape::Node),
    (Rule::instrumental, "instrumental", Shape::Node),
    (Rule::causal, "causal", Shape::Node),
    (Rule::reason, "reason", Shape::Node),
    (Rule::adjunct, "adjunct", Shape::Node),
    (Rule::adjuncts, "adjuncts", Shape::Sequence),
    // clauses
    (Rule::verb_phrase, "verb_phrase", Shape::Node),
    (Rule::statement, "statement", Shape::Node),
    (Rule::command, "command", Shape::Node),
    (Rule::question, "question", Shape::Node),
    (Rule::sentence, "sentence", Shape::Node),
];

/// A node of the raw capture tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Capture<'i> {
    Slice { text: &'i str, span: Span },
    Node(Vec<(&'i str, Capture<'i>)>),
    Sequence(Vec<Capture<'i>>),
}

impl<'i> Capture<'i> {
    /// Looks up a keyed child of a node. Returns `None` for slices and sequences.
    pub fn get(&self, key: &str) -> Option<&Capture<'i>> {
        match self {
            Capture::Node(entries) => entries
                .iter()
                .find(|(entry_key, _)| *entry_key == key)
                .map(|(_, child)| child),
            _ => None,
        }
    }

    /// The matched text of a slice.
    pub fn text(&self) -> Option<&'i str> {
        match self {
            Capture::Slice { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// The label table, indexed by rule.
#[derive(Debug, Clone)]
pub struct Labels {
    by_rule: HashMap<Rule, Label>,
}

impl Labels {
    pub fn new() -> Self {
        let by_rule = LABELS
            .iter()
            .map(|&(rule, key, shape)| (rule, Label { key, shape }))
            .collect();
        Self { by_rule }
    }

    pub fn get(&self, rule: Rule) -> Option<Label> {
        self.by_rule.get(&rule).copied()
    }

    /// Builds the raw capture of a pair, or `None` if its rule is unlabelled.
    pub fn capture<'i>(&self, pair: Pair<'i, Rule>) -> Option<Capture<'i>> {
        let label = self.get(pair.as_rule())?;
        trace!(rule = ?pair.as_rule(), key = label.key, "capture");

        let capture = match label.shape {
            Shape::Text => {
                let span = pair.as_span();
                Capture::Slice {
                    text: span.as_str(),
                    span: Span {
                        start: span.start(),
                        end: span.end(),
                    },
                }
            }
            Shape::Node => Capture::Node(
                pair.into_inner()
                    .filter_map(|child| {
                        let key = self.get(child.as_rule())?.key;
                        self.capture(child).map(|node| (key, node))
                    })
                    .collect(),
            ),
            Shape::Sequence => Capture::Sequence(
                pair.into_inner()
                    .filter_map(|child| self.capture(child))
                    .collect(),
            ),
        };
        Some(capture)
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parser::AshParser;
    use pest::Parser;

    fn raw(input: &str) -> Capture<'_> {
        let mut pairs = AshParser::parse(Rule::sentence, input).unwrap();
        Labels::new().capture(pairs.next().unwrap()).unwrap()
    }

    #[test]
    fn every_label_is_unique_per_rule() {
        let labels = Labels::new();
        assert_eq!(labels.by_rule.len(), LABELS.len());
    }

    #[test]
    fn slices_keep_trailing_whitespace() {
        let tree = raw("shi vene");
        let noun = tree
            .get("statement")
            .and_then(|s| s.get("subject"))
            .and_then(|s| s.get("head"))
            .and_then(|h| h.get("noun"))
            .unwrap();
        assert_eq!(noun.text(), Some("shi "));
        assert!(matches!(noun, Capture::Slice { span, .. } if span.start == 0 && span.end == 4));
    }

    #[test]
    fn end_of_input_is_not_captured() {
        let tree = raw("vese ses");
        match tree {
            Capture::Node(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].0, "command");
            }
            other => panic!("expected a node, got {:?}", other),
        }
    }

    #[test]
    fn empty_repetitions_are_empty_sequences() {
        let tree = raw("shi vene");
        let head = tree
            .get("statement")
            .and_then(|s| s.get("subject"))
            .and_then(|s| s.get("head"))
            .unwrap();
        assert_eq!(head.get("adjectives"), Some(&Capture::Sequence(vec![])));
    }
}
