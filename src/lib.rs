//! `covid-trends` library crate.
//!
//! Exponential growth fits, weekly summaries and charts for daily case-count
//! series. The binary (`ctrend`) is a thin wrapper around this library so that:
//!
//! - the analysis is testable without spawning processes
//! - callers with their own data loaders can use the modules directly

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod render;
pub mod report;
pub mod timeline;
