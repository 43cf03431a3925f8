//! # KB Shell
//!
//! The collaborators around the term tree:
//!
//! - **loader**: parses `term<TAB>sentence<TAB>score` lines and applies them in order
//! - **config**: TOML settings for the loader and output
//! - **render**: text and JSON rendering of lookup results
//!
//! The `kb` binary wires these together into one-shot commands.

pub mod config;
pub mod loader;
pub mod render;

pub use config::*;
pub use loader::*;
