//! NCBI E-utilities lookup client for ClinVar.
//!
//! Two endpoints are used per query: `esearch.fcgi` resolves a gene/variant
//! search term to a ClinVar Variation ID, and `esummary.fcgi` returns the
//! structured record for that ID. The [`VariantLookup`] trait is the seam
//! between the batch driver and the transport, so tests run against
//! [`MockLookup`] instead of the network.
//!
//! # References
//!
//! - [E-utilities](https://www.ncbi.nlm.nih.gov/books/NBK25501/)
//! - [ClinVar API](https://www.ncbi.nlm.nih.gov/clinvar/docs/maintenance_use/)

mod client;
mod mock;
mod types;

pub use client::{EutilsClient, VariantLookup};
pub use mock::MockLookup;
pub use types::{EsearchResponse, EsummaryResponse, GeneEntry, VariantSummary};
