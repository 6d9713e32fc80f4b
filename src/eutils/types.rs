//! Typed schema for E-utilities JSON responses.
//!
//! Every field defaults when absent; a ClinVar record missing one attribute
//! must never fail the whole lookup.

use serde::Deserialize;

use crate::record::{LookupStatus, VariantResult};

/// Envelope of an `esearch.fcgi?retmode=json` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsearchResponse {
    #[serde(default, rename = "esearchresult")]
    pub esearch_result: EsearchResult,
}

/// Body of an esearch response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsearchResult {
    /// Matching UIDs, in the order the server returned them. The first entry
    /// is authoritative for tie-breaking.
    #[serde(default, rename = "idlist")]
    pub id_list: Vec<String>,
}

/// Envelope of an `esummary.fcgi?retmode=json` response.
///
/// The `result` object holds a `uids` array plus one entry per UID, so it is
/// kept as a raw map and individual summaries are deserialized on demand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsummaryResponse {
    #[serde(default)]
    pub result: serde_json::Map<String, serde_json::Value>,
}

impl EsummaryResponse {
    /// Deserialize the summary for one variation ID, if present.
    pub fn summary_for(&self, id: &str) -> Option<VariantSummary> {
        self.result
            .get(id)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// One ClinVar variant summary from esummary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantSummary {
    /// ClinVar accession (e.g., "VCV001929445").
    #[serde(default)]
    pub accession: String,
    /// Record title.
    #[serde(default)]
    pub title: String,
    /// Chromosome sort key (e.g., "14").
    #[serde(default)]
    pub chr_sort: String,
    /// Genes associated with the record.
    #[serde(default)]
    pub genes: Vec<GeneEntry>,
    /// Variation set; the first entry carries the canonical SPDI.
    #[serde(default)]
    pub variation_set: Vec<VariationSetEntry>,
    /// Germline classification block.
    #[serde(default)]
    pub germline_classification: Classification,
    /// Molecular consequences.
    #[serde(default)]
    pub molecular_consequence_list: Vec<String>,
}

/// A gene entry in a summary. Older records carry bare symbol strings where
/// newer ones carry objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GeneEntry {
    Detailed {
        #[serde(default)]
        symbol: String,
    },
    Symbol(String),
}

impl GeneEntry {
    /// The gene symbol regardless of representation.
    pub fn symbol(&self) -> &str {
        match self {
            GeneEntry::Detailed { symbol } => symbol,
            GeneEntry::Symbol(s) => s,
        }
    }
}

/// One member of the variation set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariationSetEntry {
    #[serde(default)]
    pub canonical_spdi: String,
}

/// Classification block with the ACMG description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub description: String,
}

impl VariantSummary {
    /// Comma-joined gene symbols.
    pub fn gene_symbols(&self) -> String {
        self.genes
            .iter()
            .map(GeneEntry::symbol)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Canonical SPDI from the first variation set entry, if any.
    pub fn canonical_spdi(&self) -> &str {
        self.variation_set
            .first()
            .map(|v| v.canonical_spdi.as_str())
            .unwrap_or("")
    }

    /// Chromosome with the sort-key zero padding removed.
    pub fn chromosome(&self) -> String {
        let trimmed = self.chr_sort.trim();
        let stripped = trimmed.trim_start_matches('0');
        if stripped.is_empty() && !trimmed.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    }

    /// Build the pipeline result for this summary, resolved as `id`.
    pub fn into_result(self, id: &str) -> VariantResult {
        let canonical_spdi = self.canonical_spdi().to_string();
        let gene_symbol = self.gene_symbols();
        let chromosome = self.chromosome();
        VariantResult {
            variation_id: id.to_string(),
            accession: self.accession,
            canonical_spdi,
            gene_symbol,
            chromosome,
            acmg_classification: self.germline_classification.description,
            molecular_consequence: self.molecular_consequence_list.join(", "),
            status: LookupStatus::Found,
            note: String::new(),
        }
    }
}
