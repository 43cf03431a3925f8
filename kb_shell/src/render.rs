//! Result rendering for the command-line shell.
//!
//! The tree hands back plain facts; this module turns them into either human
//! text or JSON, depending on [`OutputFormat`].

use serde_json::json;
use term_tree::{Fact, InsertOutcome};

use crate::config::OutputFormat;
use crate::loader::LoadReport;

/// Render an exact lookup together with its partial matches.
pub fn lookup(term: &str, exact: Option<&Fact>, similar: &[&Fact], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!({
            "term": term,
            "found": exact,
            "partial_matches": similar,
        })
        .to_string(),
        OutputFormat::Text => {
            let mut out = match exact {
                Some(fact) => format!("Statement found: {fact}."),
                None => format!("No statement found for term: {term}."),
            };
            if !similar.is_empty() {
                out.push_str("\nPartial matches are:");
                for fact in similar {
                    out.push_str(&format!("\nTerm: {}. Statement: {fact}.", fact.term));
                }
            }
            out
        }
    }
}

/// Render a term-and-sentence lookup.
pub fn statement(term: &str, sentence: &str, found: Option<&Fact>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!({
            "term": term,
            "sentence": sentence,
            "found": found,
        })
        .to_string(),
        OutputFormat::Text => match found {
            Some(fact) => format!(
                "The statement was found and has a confidence score of {}.",
                fact.confidence_score
            ),
            None => "The term or statement was not found.".to_string(),
        },
    }
}

/// Render the result of a single insert-or-update.
pub fn added(outcome: InsertOutcome, fact: Option<&Fact>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let (kind, score_raised) = match outcome {
                InsertOutcome::Inserted => ("inserted", None),
                InsertOutcome::Merged { score_raised } => ("merged", Some(score_raised)),
            };
            json!({
                "outcome": kind,
                "score_raised": score_raised,
                "fact": fact,
            })
            .to_string()
        }
        OutputFormat::Text => {
            let term = fact.map(|f| f.term.as_str()).unwrap_or_default();
            let mut out = match outcome {
                InsertOutcome::Inserted => {
                    format!("New node with the term {term} added to the knowledge base.")
                }
                InsertOutcome::Merged { .. } => format!("Statement for term {term} has been updated."),
            };
            if let Some(fact) = fact {
                out.push_str(&format!("\n{fact}"));
            }
            out
        }
    }
}

/// Render tree statistics and the load summary.
pub fn stats(facts: usize, height: usize, report: &LoadReport, format: OutputFormat) -> String {
    let skipped: Vec<String> = report.skipped.iter().map(ToString::to_string).collect();
    match format {
        OutputFormat::Json => json!({
            "facts": facts,
            "height": height,
            "lines_read": report.lines_read,
            "inserted": report.inserted,
            "merged": report.merged,
            "skipped": skipped,
        })
        .to_string(),
        OutputFormat::Text => {
            let mut out = format!(
                "Facts: {facts}\nHeight: {height}\nLines read: {}\nInserted: {}\nMerged: {}\nSkipped: {}",
                report.lines_read,
                report.inserted,
                report.merged,
                skipped.len()
            );
            for reason in &skipped {
                out.push_str(&format!("\n  {reason}"));
            }
            out
        }
    }
}
