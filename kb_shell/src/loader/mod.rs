//! Loader - bulk-loads tab-delimited fact records into a term tree.
//!
//! Records are applied in file order, one `insert_or_update` per line, so a
//! repeated term merges into the fact created by its first occurrence.
//! Malformed lines never touch the tree. Under [`LoadPolicy::Skip`] they are
//! collected in the [`LoadReport`]; under [`LoadPolicy::Abort`] the load stops
//! and everything inserted so far stays in place.

mod record;

pub use record::*;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use term_tree::{InsertOutcome, TermTree};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{LoadPolicy, LoaderConfig};

/// Summary of a completed (or aborted) load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Lines read from the source, including blank and malformed ones.
    pub lines_read: usize,
    /// Records that created a new node.
    pub inserted: usize,
    /// Records that merged into an existing node.
    pub merged: usize,
    /// Lines rejected by the parser.
    pub skipped: Vec<RecordParseError>,
}

impl LoadReport {
    /// Number of records applied to the tree.
    pub fn applied(&self) -> usize {
        self.inserted + self.merged
    }
}

/// Errors that end a load early.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("load aborted: {source}")]
    Record {
        #[source]
        source: RecordParseError,
        /// What had been applied before the bad line.
        report: LoadReport,
    },
}

/// Feeds parsed records into a [`TermTree`].
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with the given settings.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load every record from a file.
    pub fn load_path(&self, path: &Path, tree: &mut TermTree) -> Result<LoadReport, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), policy = ?self.config.policy, "loading knowledge base");
        self.load_reader(BufReader::new(file), tree)
    }

    /// Load records from an in-memory string.
    pub fn load_str(&self, content: &str, tree: &mut TermTree) -> Result<LoadReport, LoadError> {
        self.load_reader(content.as_bytes(), tree)
    }

    /// Load every record from a buffered reader.
    ///
    /// A line that is not valid UTF-8 is treated as a malformed record, so it
    /// follows the same skip or abort policy as a parse failure.
    pub fn load_reader<R: BufRead>(
        &self,
        mut reader: R,
        tree: &mut TermTree,
    ) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| LoadError::Read {
                    line: line_no + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;
            report.lines_read += 1;

            let parsed = match std::str::from_utf8(&buf) {
                Ok(line) if self.config.skip_blank_lines && line.trim().is_empty() => continue,
                Ok(line) => parse_record(line, line_no),
                Err(_) => Err(RecordParseError::InvalidUtf8 { line: line_no }),
            };

            let record = match parsed {
                Ok(record) => record,
                Err(err) => match self.config.policy {
                    LoadPolicy::Skip => {
                        warn!(line = line_no, error = %err, "skipping malformed record");
                        report.skipped.push(err);
                        continue;
                    }
                    LoadPolicy::Abort => {
                        warn!(line = line_no, error = %err, "aborting load on malformed record");
                        return Err(LoadError::Record {
                            source: err,
                            report,
                        });
                    }
                },
            };

            let line = record.line;
            match tree.insert_fact(record.into_fact()) {
                InsertOutcome::Inserted => report.inserted += 1,
                InsertOutcome::Merged { score_raised } => {
                    debug!(line, score_raised, "merged repeated term");
                    report.merged += 1;
                }
            }
        }

        info!(
            lines = report.lines_read,
            inserted = report.inserted,
            merged = report.merged,
            skipped = report.skipped.len(),
            "knowledge base loaded"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Cat\tCats meow\t0.9\n\
                          Black cat\tBlack cats are lucky\t0.6\n\
                          Category\tA class of things\t0.7\n\
                          Cat\tCats purr\t0.5\n";

    fn abort_loader() -> Loader {
        Loader::new(LoaderConfig {
            policy: LoadPolicy::Abort,
            ..LoaderConfig::default()
        })
    }

    #[test]
    fn test_load_applies_records_in_order() {
        let mut tree = TermTree::new();

        let report = Loader::default().load_str(SAMPLE, &mut tree).unwrap();

        assert_eq!(report.lines_read, 4);
        assert_eq!(report.inserted, 3);
        assert_eq!(report.merged, 1);
        assert!(report.skipped.is_empty());
        assert_eq!(tree.len(), 3);

        let cat = tree.find("cat").unwrap();
        assert_eq!(cat.sentence, "Cats purr");
        assert!((cat.confidence_score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_skip_policy_reports_bad_lines() {
        let mut tree = TermTree::new();
        let input = "Cat\tCats meow\t0.9\nbroken line\nDog\tDogs bark\tloud\nDog\tDogs bark\t0.8\n";

        let report = Loader::default().load_str(input, &mut tree).unwrap();

        assert_eq!(report.applied(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line(), 2);
        assert_eq!(report.skipped[1].line(), 3);
        assert!(tree.find("Dog").is_some());
    }

    #[test]
    fn test_abort_policy_keeps_earlier_facts() {
        let mut tree = TermTree::new();
        let input = "Cat\tCats meow\t0.9\nDog\tDogs bark\n Emu\tEmus run\t0.4\n";

        let err = abort_loader().load_str(input, &mut tree).unwrap_err();

        match err {
            LoadError::Record { source, report } => {
                assert_eq!(source.line(), 2);
                assert_eq!(report.inserted, 1);
                assert_eq!(report.lines_read, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(tree.find("Cat").is_some());
        assert!(tree.find("Emu").is_none());
    }

    #[test]
    fn test_blank_lines() {
        let input = "Cat\tCats meow\t0.9\n\n   \nDog\tDogs bark\t0.8\n";

        let mut tree = TermTree::new();
        let report = Loader::default().load_str(input, &mut tree).unwrap();
        assert_eq!(report.lines_read, 4);
        assert!(report.skipped.is_empty());

        let strict = Loader::new(LoaderConfig {
            skip_blank_lines: false,
            ..LoaderConfig::default()
        });
        let mut tree = TermTree::new();
        let report = strict.load_str(input, &mut tree).unwrap();
        assert_eq!(report.skipped.len(), 2);
        assert!(matches!(
            report.skipped[0],
            RecordParseError::MissingField { line: 2, .. }
        ));
    }

    #[test]
    fn test_crlf_input() {
        let mut tree = TermTree::new();
        let report = Loader::default()
            .load_str("Cat\tCats meow\t0.9\r\nDog\tDogs bark\t0.8\r\n", &mut tree)
            .unwrap();

        assert_eq!(report.inserted, 2);
        assert!((tree.find("Dog").unwrap().confidence_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_load_into_existing_tree_merges() {
        let mut tree = TermTree::new();
        tree.insert_or_update("Cat", "Cats hunt", 0.95);

        let report = Loader::default().load_str(SAMPLE, &mut tree).unwrap();

        assert_eq!(report.merged, 2);
        let cat = tree.find("Cat").unwrap();
        assert_eq!(cat.sentence, "Cats purr");
        assert!((cat.confidence_score - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let input: &[u8] = b"Cat\tCats meow\t0.9\nBad\xff\tsentence\t0.5\nDog\tDogs bark\t0.8\n";
        let mut tree = TermTree::new();

        let report = Loader::default().load_reader(input, &mut tree).unwrap();

        assert_eq!(report.lines_read, 3);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, vec![RecordParseError::InvalidUtf8 { line: 2 }]);
        assert!(tree.find("Cat").is_some());
        assert!(tree.find("Dog").is_some());
    }

    #[test]
    fn test_invalid_utf8_line_aborts_under_abort_policy() {
        let input: &[u8] = b"Cat\tCats meow\t0.9\nBad\xff\tsentence\t0.5\nDog\tDogs bark\t0.8\n";
        let mut tree = TermTree::new();

        let err = abort_loader().load_reader(input, &mut tree).unwrap_err();

        assert!(matches!(
            err,
            LoadError::Record {
                source: RecordParseError::InvalidUtf8 { line: 2 },
                ..
            }
        ));
        assert!(tree.find("Cat").is_some());
        assert!(tree.find("Dog").is_none());
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut tree = TermTree::new();
        let report = Loader::default()
            .load_str("Cat\tCats meow\t0.9\nDog\tDogs bark\t0.8", &mut tree)
            .unwrap();

        assert_eq!(report.lines_read, 2);
        assert_eq!(report.inserted, 2);
    }

    #[test]
    fn test_missing_file() {
        let mut tree = TermTree::new();
        let err = Loader::default()
            .load_path(Path::new("/no/such/facts.txt"), &mut tree)
            .unwrap_err();

        assert!(matches!(err, LoadError::Open { .. }));
        assert!(tree.is_empty());
    }
}
