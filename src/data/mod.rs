//! Input tables for the analysis.
//!
//! Loading real source files is left to the caller; the CLI works from a
//! seeded synthetic outbreak (`sample`).

pub mod sample;

pub use sample::*;
