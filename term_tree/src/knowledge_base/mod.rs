//! Knowledge Base module - facts stored in an ordered term tree.
//!
//! The knowledge base consists of:
//! - **Facts**: a term, a sentence about it, and a confidence score
//! - **Term tree**: an unbalanced binary search tree keyed by term
//! - **Matching**: the case rules used for placement, lookup, and token matches

mod fact;
pub mod matching;
mod tree;

pub use fact::*;
pub use tree::*;
