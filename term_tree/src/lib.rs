//! # Term Tree
//!
//! In-memory knowledge base of `(term, sentence, confidence score)` facts,
//! stored in an ordered tree keyed by term.
//!
//! ## Core Operations
//!
//! - **insert_or_update**: create a fact, or merge into an existing one
//! - **find**: exact lookup, ignoring case
//! - **find_similar**: facts whose term has the query as one of its words
//!
//! ## Merge Policy
//!
//! - **Latest wins on text**: a merge always replaces the sentence
//! - **Best wins on confidence**: the score never decreases
//!
//! The crate does no I/O. Loading records from files lives in `kb_shell`.

pub mod knowledge_base;

pub use knowledge_base::*;
