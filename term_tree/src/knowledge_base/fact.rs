//! Fact definitions - the records stored in the term tree.

use serde::{Deserialize, Serialize};

/// A fact is a statement about a term, weighted by how confident we are in it.
///
/// Facts have no identity beyond their term; the tree uses the term as the
/// ordering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// The term this fact describes (ordering key).
    pub term: String,

    /// Human-readable statement about the term.
    pub sentence: String,

    /// Confidence in the statement. Never lowered by [`Fact::merge`].
    pub confidence_score: f64,
}

impl Fact {
    /// Create a new fact.
    pub fn new(term: impl Into<String>, sentence: impl Into<String>, confidence_score: f64) -> Self {
        Self {
            term: term.into(),
            sentence: sentence.into(),
            confidence_score,
        }
    }

    /// Merge an incoming statement into this fact.
    ///
    /// The sentence is always replaced. The score is only replaced when the
    /// incoming score is at least the current one, so the stored score is the
    /// maximum ever submitted. Returns `true` if the score was taken.
    pub fn merge(&mut self, sentence: impl Into<String>, confidence_score: f64) -> bool {
        self.sentence = sentence.into();
        if confidence_score >= self.confidence_score {
            self.confidence_score = confidence_score;
            true
        } else {
            false
        }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Confidence score: {})",
            self.sentence, self.confidence_score
        )
    }
}
