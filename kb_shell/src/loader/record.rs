//! Record parsing - one tab-delimited line into a fact triple.

use std::num::ParseFloatError;

use term_tree::Fact;
use thiserror::Error;

/// Number of tab-separated fields in a record.
pub const FIELD_COUNT: usize = 3;

/// A parsed input line: `term<TAB>sentence<TAB>confidence_score`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number in the source.
    pub line: usize,
    /// First field, the ordering key.
    pub term: String,
    /// Second field, may be empty.
    pub sentence: String,
    /// Third field, always finite.
    pub confidence_score: f64,
}

impl Record {
    /// Convert into a fact, dropping the line number.
    pub fn into_fact(self) -> Fact {
        Fact::new(self.term, self.sentence, self.confidence_score)
    }
}

/// Why a line could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordParseError {
    #[error("line {line}: missing {field} field")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: expected 3 tab-separated fields, found {found}")]
    ExtraField { line: usize, found: usize },

    #[error("line {line}: term is empty")]
    EmptyTerm { line: usize },

    #[error("line {line}: confidence score {value:?} is not a number")]
    InvalidScore {
        line: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: confidence score {value} is not finite")]
    NonFiniteScore { line: usize, value: f64 },

    #[error("line {line}: not valid UTF-8")]
    InvalidUtf8 { line: usize },
}

impl RecordParseError {
    /// The 1-based line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            RecordParseError::MissingField { line, .. }
            | RecordParseError::ExtraField { line, .. }
            | RecordParseError::EmptyTerm { line }
            | RecordParseError::InvalidScore { line, .. }
            | RecordParseError::NonFiniteScore { line, .. }
            | RecordParseError::InvalidUtf8 { line } => *line,
        }
    }
}

/// Parse one line of input.
///
/// Line terminators are stripped and each field is trimmed of surrounding
/// whitespace. Embedded tabs are not escaped, so exactly three fields are
/// required.
pub fn parse_record(line: &str, line_no: usize) -> Result<Record, RecordParseError> {
    let mut fields = line.trim_end_matches(['\r', '\n']).split('\t').map(str::trim);

    let term = fields.next().unwrap_or_default();
    let sentence = fields.next().ok_or(RecordParseError::MissingField {
        line: line_no,
        field: "sentence",
    })?;
    let score = fields.next().ok_or(RecordParseError::MissingField {
        line: line_no,
        field: "confidence_score",
    })?;

    let extra = fields.count();
    if extra > 0 {
        return Err(RecordParseError::ExtraField {
            line: line_no,
            found: FIELD_COUNT + extra,
        });
    }

    if term.is_empty() {
        return Err(RecordParseError::EmptyTerm { line: line_no });
    }

    let confidence_score: f64 = score
        .parse()
        .map_err(|source| RecordParseError::InvalidScore {
            line: line_no,
            value: score.to_string(),
            source,
        })?;

    if !confidence_score.is_finite() {
        return Err(RecordParseError::NonFiniteScore {
            line: line_no,
            value: confidence_score,
        });
    }

    Ok(Record {
        line: line_no,
        term: term.to_string(),
        sentence: sentence.to_string(),
        confidence_score,
    })
}
