//! Batch processor implementation.

use std::time::{Duration, Instant};

use crate::eutils::VariantLookup;
use crate::record::{LookupStatus, VariantQuery, VariantResult};

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Callback frequency (call progress callback every N items). Lookups are
    /// HTTP-bound, so the default reports after every record.
    pub progress_interval: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            progress_interval: 1,
        }
    }
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress callback interval.
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }
}

/// Progress information for batch operations.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Total items to process.
    pub total: usize,
    /// Items processed so far.
    pub processed: usize,
    /// Found rows so far.
    pub found: usize,
    /// NotFound rows so far.
    pub not_found: usize,
    /// Error rows so far.
    pub errors: usize,
    /// Time elapsed since start.
    pub elapsed: Duration,
}

impl BatchProgress {
    /// Calculate completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Tally of outcomes for a finished batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows resolved to a ClinVar record.
    pub found: usize,
    /// Rows with zero search hits.
    pub not_found: usize,
    /// Rows lost to network/parse failures.
    pub errors: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} found, {} not found, {} errors",
            self.found, self.not_found, self.errors
        )
    }
}

/// Result of a batch run: one output row per input query, in input order.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Per-query results, index-aligned with the input.
    pub results: Vec<VariantResult>,
    /// Total processing time.
    pub duration: Duration,
}

impl BatchOutcome {
    /// Total number of rows.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    fn count(&self, status: LookupStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Tally of outcomes.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            found: self.count(LookupStatus::Found),
            not_found: self.count(LookupStatus::NotFound),
            errors: self.count(LookupStatus::Error),
        }
    }
}

/// Sequential batch driver over a [`VariantLookup`].
pub struct BatchProcessor<L: VariantLookup> {
    lookup: L,
    config: BatchConfig,
}

impl<L: VariantLookup> BatchProcessor<L> {
    /// Create a new batch processor.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            config: BatchConfig::default(),
        }
    }

    /// Create a new batch processor with configuration.
    pub fn with_config(lookup: L, config: BatchConfig) -> Self {
        Self { lookup, config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run all queries, in order.
    pub fn run(&self, queries: &[VariantQuery]) -> BatchOutcome {
        self.run_with_progress(queries, |_| {})
    }

    /// Run all queries with a progress callback.
    pub fn run_with_progress<F>(&self, queries: &[VariantQuery], mut progress_fn: F) -> BatchOutcome
    where
        F: FnMut(BatchProgress),
    {
        let start = Instant::now();
        let total = queries.len();
        let mut results = Vec::with_capacity(total);
        let mut found = 0;
        let mut not_found = 0;
        let mut errors = 0;

        for (i, query) in queries.iter().enumerate() {
            let result = match self.lookup.lookup(query) {
                Ok(result) => result,
                Err(error) => {
                    tracing::warn!(query = %query, error = %error, "lookup failed");
                    VariantResult::error(query, error)
                }
            };

            match result.status {
                LookupStatus::Found => found += 1,
                LookupStatus::NotFound => not_found += 1,
                LookupStatus::Error => errors += 1,
            }
            results.push(result);

            // Progress callback
            if (i + 1) % self.config.progress_interval == 0 || i + 1 == total {
                progress_fn(BatchProgress {
                    total,
                    processed: i + 1,
                    found,
                    not_found,
                    errors,
                    elapsed: start.elapsed(),
                });
            }
        }

        BatchOutcome {
            results,
            duration: start.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eutils::MockLookup;

    fn queries(pairs: &[(&str, &str)]) -> Vec<VariantQuery> {
        pairs.iter().map(|(g, v)| VariantQuery::new(*g, *v)).collect()
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert_eq!(config.progress_interval, 1);
    }

    #[test]
    fn test_batch_config_interval_never_zero() {
        let config = BatchConfig::new().progress_interval(0);
        assert_eq!(config.progress_interval, 1);
    }

    #[test]
    fn test_one_result_per_query_in_order() {
        let mut lookup = MockLookup::new();
        lookup.add_found("CHD8", "p.Arg1580Trp", "1929445");
        lookup.add_found("TP53", "c.743G>A", "12356");

        let processor = BatchProcessor::new(lookup);
        let input = queries(&[
            ("TP53", "c.743G>A"),
            ("NOPE1", "c.1A>G"),
            ("CHD8", "p.Arg1580Trp"),
        ]);
        let outcome = processor.run(&input);

        assert_eq!(outcome.total(), 3);
        assert_eq!(outcome.results[0].variation_id, "12356");
        assert_eq!(outcome.results[1].status, LookupStatus::NotFound);
        assert_eq!(outcome.results[2].variation_id, "1929445");
    }

    #[test]
    fn test_lookup_error_does_not_abort_batch() {
        let mut lookup = MockLookup::new();
        lookup.add_network_error("BAD1", "c.1A>G", "connection reset");
        lookup.add_found("CHD8", "p.Arg1580Trp", "1929445");

        let processor = BatchProcessor::new(lookup);
        let input = queries(&[("BAD1", "c.1A>G"), ("CHD8", "p.Arg1580Trp")]);
        let outcome = processor.run(&input);

        assert_eq!(outcome.total(), 2);
        assert_eq!(outcome.results[0].status, LookupStatus::Error);
        assert!(outcome.results[0].note.contains("connection reset"));
        assert_eq!(outcome.results[1].status, LookupStatus::Found);
    }

    #[test]
    fn test_summary_counts() {
        let mut lookup = MockLookup::new();
        lookup.add_found("CHD8", "p.Arg1580Trp", "1929445");
        lookup.add_network_error("BAD1", "c.1A>G", "timeout");

        let processor = BatchProcessor::new(lookup);
        let input = queries(&[
            ("CHD8", "p.Arg1580Trp"),
            ("BAD1", "c.1A>G"),
            ("NOPE1", "c.2A>G"),
        ]);
        let summary = processor.run(&input).summary();

        assert_eq!(
            summary,
            BatchSummary {
                found: 1,
                not_found: 1,
                errors: 1,
            }
        );
        assert_eq!(summary.to_string(), "1 found, 1 not found, 1 errors");
    }

    #[test]
    fn test_progress_callback_each_record() {
        let processor = BatchProcessor::new(MockLookup::new());
        let input = queries(&[("A1", "c.1A>G"), ("B1", "c.2A>G")]);

        let mut seen = Vec::new();
        processor.run_with_progress(&input, |p| seen.push(p.processed));

        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_progress_interval_batches_callbacks() {
        let processor = BatchProcessor::with_config(
            MockLookup::new(),
            BatchConfig::new().progress_interval(2),
        );
        let input = queries(&[("A1", "c.1A>G"), ("B1", "c.2A>G"), ("C1", "c.3A>G")]);

        let mut seen = Vec::new();
        processor.run_with_progress(&input, |p| seen.push(p.processed));

        // Every 2nd record plus the final one.
        assert_eq!(seen, vec![2, 3]);
    }

    #[test]
    fn test_empty_batch() {
        let processor = BatchProcessor::new(MockLookup::new());
        let outcome = processor.run(&[]);

        assert_eq!(outcome.total(), 0);
        assert_eq!(outcome.summary().found, 0);
    }

    #[test]
    fn test_progress_percent() {
        let progress = BatchProgress {
            total: 4,
            processed: 2,
            found: 1,
            not_found: 1,
            errors: 0,
            elapsed: Duration::from_secs(1),
        };
        assert!((progress.percent() - 50.0).abs() < 0.01);

        let empty = BatchProgress {
            total: 0,
            processed: 0,
            found: 0,
            not_found: 0,
            errors: 0,
            elapsed: Duration::ZERO,
        };
        assert!((empty.percent() - 100.0).abs() < 0.01);
    }
}
