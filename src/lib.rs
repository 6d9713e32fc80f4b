// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! clinvar-batch: batch ClinVar variant annotation
//!
//! Reads gene/variant pairs from a tabular file, resolves each one against
//! ClinVar through the NCBI E-utilities endpoints, and writes one annotated
//! row per input row to a new file.
//!
//! # Example
//!
//! ```
//! use clinvar_batch::{BatchProcessor, MockLookup, VariantQuery};
//!
//! let mut lookup = MockLookup::new();
//! lookup.add_found("CHD8", "p.Arg1580Trp", "1929445");
//!
//! let processor = BatchProcessor::new(lookup);
//! let queries = vec![VariantQuery::new("CHD8", "p.Arg1580Trp")];
//! let outcome = processor.run(&queries);
//! assert_eq!(outcome.results.len(), 1);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod eutils;
pub mod input;
pub mod output;
pub mod record;

// Re-export commonly used types
pub use batch::{BatchConfig, BatchProcessor, BatchProgress, BatchSummary};
pub use config::ClientConfig;
pub use error::ClinVarError;
pub use eutils::{EutilsClient, MockLookup, VariantLookup};
pub use input::read_queries;
pub use output::write_results;
pub use record::{LookupStatus, VariantQuery, VariantResult};

/// Result type alias for clinvar-batch operations
pub type Result<T> = std::result::Result<T, ClinVarError>;
