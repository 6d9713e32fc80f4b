//! Batch lookup driver.
//!
//! Runs the query sequence through a [`crate::VariantLookup`] sequentially,
//! preserving input order and absorbing per-record failures into
//! Error-status rows so one bad record never loses the batch.

mod processor;

pub use processor::{BatchConfig, BatchOutcome, BatchProcessor, BatchProgress, BatchSummary};
