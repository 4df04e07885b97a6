//! Typed view of a parsed sentence.
//!
//! These types mirror the canonical tree one to one, so a tree deserializes into them
//! without any reshaping. Tokens stay opaque strings, tag and negation prefix included.
//! `Display` renders a sentence back into Ash text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::Tree;
use crate::errors::{AshError, ErrorReporting, ParseContext, SourceContext};

pub const POSSESSIVE_PARTICLE: &str = "ko";
pub const INDIRECT_OBJECT_PARTICLE: &str = "kun";
pub const QUESTION_PARTICLE: &str = "ka";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentence {
    Statement(Clause),
    Command(VerbPhrase),
    Question(Clause),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub subject: NounPhrase,
    pub verb_phrase: VerbPhrase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbPhrase {
    pub verb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<NounPhrase>,
    /// Only ever set together with `object`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirect_object: Option<NounPhrase>,
    pub adjuncts: Vec<Adjunct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounPhrase {
    pub head: HeadGroup,
    pub possessors: Vec<HeadGroup>,
}

/// A noun and the adjectives that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadGroup {
    pub noun: String,
    pub adjectives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjunct {
    Temporal {
        marker: TemporalMarker,
        target: NounPhrase,
    },
    Instrumental {
        marker: InstrumentalMarker,
        target: NounPhrase,
    },
    Causal {
        marker: CausalMarker,
        reason: Box<Clause>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemporalMarker {
    /// at, on, during
    #[serde(rename = "time")]
    At,
    #[serde(rename = "timet")]
    Before,
    #[serde(rename = "timem")]
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentalMarker {
    #[serde(rename = "tem")]
    With,
    #[serde(rename = "temna")]
    Without,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CausalMarker {
    #[serde(rename = "tozem")]
    Because,
    #[serde(rename = "tozet")]
    SoThat,
}

impl Sentence {
    /// Builds the typed view of a canonical tree.
    pub fn from_tree(tree: &Tree) -> Result<Self, AshError> {
        serde_json::from_value(tree.clone()).map_err(|error| {
            ParseContext::new(SourceContext::from_file("tree", tree.to_string()), "typed")
                .malformed_tree(&error.to_string())
        })
    }

    /// The canonical tree this sentence parses to.
    pub fn to_tree(&self) -> Tree {
        serde_json::to_value(self).expect("sentence types have string keys and unit enums")
    }

    pub fn clause(&self) -> Option<&Clause> {
        match self {
            Sentence::Statement(clause) | Sentence::Question(clause) => Some(clause),
            Sentence::Command(_) => None,
        }
    }

    pub fn verb_phrase(&self) -> &VerbPhrase {
        match self {
            Sentence::Statement(clause) | Sentence::Question(clause) => &clause.verb_phrase,
            Sentence::Command(verb_phrase) => verb_phrase,
        }
    }
}

impl TemporalMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalMarker::At => "time",
            TemporalMarker::Before => "timet",
            TemporalMarker::After => "timem",
        }
    }
}

impl InstrumentalMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentalMarker::With => "tem",
            InstrumentalMarker::Without => "temna",
        }
    }
}

impl CausalMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            CausalMarker::Because => "tozem",
            CausalMarker::SoThat => "tozet",
        }
    }
}

// ============================================================================
// UNPARSING
// ============================================================================

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentence::Statement(clause) => write!(f, "{}", clause),
            Sentence::Command(verb_phrase) => write!(f, "{}", verb_phrase),
            Sentence::Question(clause) => write!(f, "{} {}", QUESTION_PARTICLE, clause),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.verb_phrase)
    }
}

impl fmt::Display for VerbPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        if let Some(object) = &self.object {
            write!(f, " {}", object)?;
            if let Some(indirect_object) = &self.indirect_object {
                write!(f, " {} {}", INDIRECT_OBJECT_PARTICLE, indirect_object)?;
            }
        }
        for adjunct in &self.adjuncts {
            write!(f, " {}", adjunct)?;
        }
        Ok(())
    }
}

impl fmt::Display for NounPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for possessor in &self.possessors {
            write!(f, " {} {}", POSSESSIVE_PARTICLE, possessor)?;
        }
        Ok(())
    }
}

impl fmt::Display for HeadGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.noun)?;
        for adjective in &self.adjectives {
            write!(f, " {}", adjective)?;
        }
        Ok(())
    }
}

impl fmt::Display for Adjunct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjunct::Temporal { marker, target } => write!(f, "{} {}", marker.as_str(), target),
            Adjunct::Instrumental { marker, target } => {
                write!(f, "{} {}", marker.as_str(), target)
            }
            Adjunct::Causal { marker, reason } => write!(f, "{} {}", marker.as_str(), reason),
        }
    }
}
