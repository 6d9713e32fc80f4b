//! In-memory lookup for tests.

use std::collections::HashMap;

use crate::error::ClinVarError;
use crate::record::{LookupStatus, VariantQuery, VariantResult};
use crate::Result;

use super::client::VariantLookup;

/// What the mock does for a registered query.
#[derive(Debug, Clone)]
enum MockBehavior {
    Respond(VariantResult),
    Fail(String),
}

/// Canned [`VariantLookup`] implementation keyed by gene/variant pair.
///
/// Unregistered queries resolve to NotFound, matching a zero-hit search.
///
/// # Example
///
/// ```
/// use clinvar_batch::{MockLookup, VariantLookup, VariantQuery};
///
/// let mut lookup = MockLookup::new();
/// lookup.add_found("CHD8", "p.Arg1580Trp", "1929445");
///
/// let result = lookup.lookup(&VariantQuery::new("CHD8", "p.Arg1580Trp")).unwrap();
/// assert_eq!(result.variation_id, "1929445");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockLookup {
    behaviors: HashMap<(String, String), MockBehavior>,
}

impl MockLookup {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(gene: &str, variant: &str) -> (String, String) {
        (gene.to_uppercase(), variant.to_string())
    }

    /// Register a full result for a query.
    pub fn add_result(&mut self, gene: &str, variant: &str, result: VariantResult) {
        self.behaviors
            .insert(Self::key(gene, variant), MockBehavior::Respond(result));
    }

    /// Register a minimal Found result with the given variation ID.
    pub fn add_found(&mut self, gene: &str, variant: &str, variation_id: &str) {
        self.add_result(
            gene,
            variant,
            VariantResult {
                variation_id: variation_id.to_string(),
                gene_symbol: gene.to_string(),
                status: LookupStatus::Found,
                ..Default::default()
            },
        );
    }

    /// Register a query that fails with a network error.
    pub fn add_network_error(&mut self, gene: &str, variant: &str, msg: &str) {
        self.behaviors
            .insert(Self::key(gene, variant), MockBehavior::Fail(msg.to_string()));
    }

    /// Number of registered behaviors.
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Check if no behaviors are registered.
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl VariantLookup for MockLookup {
    fn lookup(&self, query: &VariantQuery) -> Result<VariantResult> {
        match self.behaviors.get(&Self::key(&query.gene, &query.variant)) {
            Some(MockBehavior::Respond(result)) => Ok(result.clone()),
            Some(MockBehavior::Fail(msg)) => Err(ClinVarError::Network { msg: msg.clone() }),
            None => Ok(VariantResult::not_found(query)),
        }
    }
}
