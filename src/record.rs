//! Pipeline record types.
//!
//! A [`VariantQuery`] is one input row; the lookup client turns each one into
//! exactly one [`VariantResult`], so output row count and order always match
//! the input.

use std::fmt;
use std::str::FromStr;

/// One gene/variant pair read from the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantQuery {
    /// Gene symbol (e.g., "CHD8").
    pub gene: String,
    /// Variant descriptor in any notation ClinVar indexes (e.g., "p.Arg1580Trp").
    pub variant: String,
}

impl VariantQuery {
    /// Create a new query.
    pub fn new(gene: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            gene: gene.into(),
            variant: variant.into(),
        }
    }
}

impl fmt::Display for VariantQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.gene, self.variant)
    }
}

/// Terminal outcome of a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStatus {
    /// The search resolved to a ClinVar record.
    Found,
    /// The search returned zero hits. Not an error.
    #[default]
    NotFound,
    /// A network or parse failure prevented resolution.
    Error,
}

impl LookupStatus {
    /// Status column string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found => "Found",
            Self::NotFound => "NotFound",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LookupStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Found" => Ok(Self::Found),
            "NotFound" => Ok(Self::NotFound),
            "Error" => Ok(Self::Error),
            other => Err(format!("unknown lookup status: {other}")),
        }
    }
}

/// Annotation fields resolved for one input row.
///
/// Detail fields default to empty strings; a missing field in the remote
/// response never fails the record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantResult {
    /// ClinVar Variation ID (e.g., "1929445").
    pub variation_id: String,
    /// ClinVar accession (e.g., "VCV001929445").
    pub accession: String,
    /// Canonical SPDI (e.g., "NC_000014.9:21400059:G:A").
    pub canonical_spdi: String,
    /// Gene symbol(s) from the ClinVar record, comma-joined.
    pub gene_symbol: String,
    /// Chromosome (e.g., "14").
    pub chromosome: String,
    /// ACMG classification (germline classification description).
    pub acmg_classification: String,
    /// Molecular consequence(s), comma-joined.
    pub molecular_consequence: String,
    /// Lookup outcome.
    pub status: LookupStatus,
    /// Explanatory text for NotFound/Error rows.
    pub note: String,
}

impl VariantResult {
    /// Result for a query with zero search hits.
    pub fn not_found(query: &VariantQuery) -> Self {
        Self {
            status: LookupStatus::NotFound,
            note: format!("No ClinVar hit for {}", query),
            ..Default::default()
        }
    }

    /// Result for a query that failed with a recoverable error.
    pub fn error(query: &VariantQuery, msg: impl fmt::Display) -> Self {
        Self {
            status: LookupStatus::Error,
            note: format!("Lookup failed for {}: {}", query, msg),
            ..Default::default()
        }
    }
}
