//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the daily case-count row (`TimeSeriesRow`) and column selector (`Series`)
//! - the fitted growth model (`ExponentialModel`)
//! - report outputs (`GrowthStats`, `WeekStats`)
//! - chart parameters (`DateWindow`, `TraceStyle`)

pub mod types;

pub use types::*;
