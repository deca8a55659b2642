//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts what the two
//! binaries share: argument parsing and the headless trace driver.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod trace;
