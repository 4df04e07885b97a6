//! AST module for Ash sentences
//!
//! The canonical tree ([`Tree`]) is what callers consume: string-keyed maps that keep
//! insertion order, ordered lists, and trimmed leaf text. [`normalize`] is the one
//! place the raw capture tree turns into it. The typed view in [`sentence`] is built
//! on top of the canonical tree.

pub mod sentence;

use serde_json::{Map, Value};

use crate::syntax::capture::Capture;
use crate::syntax::Span;

pub use sentence::{
    Adjunct, CausalMarker, Clause, HeadGroup, InstrumentalMarker, NounPhrase, Sentence,
    TemporalMarker, VerbPhrase,
};

/// Canonical sentence tree: only strings, arrays and objects ever appear in it.
pub type Tree = Value;

/// Collapses a raw capture tree into its canonical form.
///
/// Slices become trimmed strings, nodes become maps with the same keys in the same
/// order, and sequences become lists of the same length and order.
pub fn normalize(raw: &Capture<'_>) -> Tree {
    match raw {
        Capture::Slice { text, .. } => Tree::String(text.trim().to_string()),
        Capture::Node(entries) => Tree::Object(
            entries
                .iter()
                .map(|(key, child)| (key.to_string(), normalize(child)))
                .collect::<Map<String, Value>>(),
        ),
        Capture::Sequence(items) => Tree::Array(items.iter().map(normalize).collect()),
    }
}

/// Normalizes an existing canonical tree again.
///
/// # Panics
///
/// Panics if the tree holds anything other than strings, arrays and objects. Such a
/// value can only come from code that built a tree by hand, never from the grammar.
pub fn renormalize(tree: &Tree) -> Tree {
    normalize(&lift(tree, &mut Vec::new()))
}

fn lift<'t>(tree: &'t Tree, path: &mut Vec<String>) -> Capture<'t> {
    match tree {
        Value::String(text) => Capture::Slice {
            text: text.as_str(),
            span: Span::default(),
        },
        Value::Array(items) => Capture::Sequence(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    path.push(index.to_string());
                    let lifted = lift(item, path);
                    path.pop();
                    lifted
                })
                .collect(),
        ),
        Value::Object(entries) => Capture::Node(
            entries
                .iter()
                .map(|(key, child)| {
                    path.push(key.clone());
                    let lifted = lift(child, path);
                    path.pop();
                    (key.as_str(), lifted)
                })
                .collect(),
        ),
        other => panic!(
            "normalization defect: {} at /{} is not a leaf, list or map",
            other,
            path.join("/")
        ),
    }
}
