//! Bomwerk: BOM extraction, enrichment, and verification for CAD tool output
//!
//! A Unix-style toolkit that recovers bill-of-materials records from the
//! console output of a CAD rendering run, enriches them against a parts
//! catalog into a production-ready report, and gates regressions by
//! comparing BOM snapshots with numeric tolerance.

pub mod cli;
pub mod core;
pub mod export;
