//! E-utilities HTTP client.

use std::cell::Cell;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;

use crate::config::ClientConfig;
use crate::error::ClinVarError;
use crate::record::{VariantQuery, VariantResult};
use crate::Result;

use super::types::{EsearchResponse, EsummaryResponse};

/// Resolves one query to one result.
///
/// The batch driver is generic over this trait; production code uses
/// [`EutilsClient`], tests use [`super::MockLookup`].
pub trait VariantLookup {
    /// Look up a single gene/variant pair.
    ///
    /// `Ok` covers both Found and NotFound outcomes; `Err` is a recoverable
    /// network/parse failure the caller turns into an Error-status row.
    fn lookup(&self, query: &VariantQuery) -> Result<VariantResult>;
}

/// Outcome of a single HTTP attempt, classified for the retry loop.
enum Attempt<T> {
    /// Final outcome, success or non-retryable failure.
    Done(Result<T>),
    /// Transient failure (5xx, timeout, connect) worth one retry.
    Transient(ClinVarError),
}

/// Whether an HTTP status code is worth a retry.
fn is_transient_status(status: u16) -> bool {
    (500..600).contains(&status)
}

/// Run `op`, retrying exactly once after `backoff` on a transient failure.
fn with_one_retry<T>(backoff: Duration, mut op: impl FnMut() -> Attempt<T>) -> Result<T> {
    match op() {
        Attempt::Done(result) => result,
        Attempt::Transient(first_err) => {
            tracing::warn!(error = %first_err, "transient failure, retrying once");
            std::thread::sleep(backoff);
            match op() {
                Attempt::Done(result) => result,
                Attempt::Transient(err) => Err(err),
            }
        }
    }
}

/// Blocking client for the ClinVar esearch/esummary endpoints.
///
/// # Example
///
/// ```no_run
/// use clinvar_batch::{ClientConfig, EutilsClient, VariantLookup, VariantQuery};
///
/// let client = EutilsClient::new(ClientConfig::from_env()).unwrap();
/// let result = client.lookup(&VariantQuery::new("CHD8", "p.Arg1580Trp")).unwrap();
/// println!("{}: {}", result.variation_id, result.acmg_classification);
/// ```
pub struct EutilsClient {
    client: Client,
    config: ClientConfig,
    /// Time of the last request, for inter-request throttling. The pipeline
    /// is sequential, so interior mutability on one thread is enough.
    last_request: Cell<Option<Instant>>,
}

impl EutilsClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClinVarError::Network {
                msg: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            config,
            last_request: Cell::new(None),
        })
    }

    /// esearch URL for a query.
    fn esearch_url(&self, query: &VariantQuery) -> String {
        let term = format!("{}[gene] AND {}[Variation Name]", query.gene, query.variant);
        format!(
            "{}esearch.fcgi?db=clinvar&term={}&retmode=json{}",
            self.config.base_url,
            urlencoding::encode(&term),
            self.api_key_suffix()
        )
    }

    /// esummary URL for a variation ID.
    fn esummary_url(&self, id: &str) -> String {
        format!(
            "{}esummary.fcgi?db=clinvar&id={}&retmode=json{}",
            self.config.base_url,
            urlencoding::encode(id),
            self.api_key_suffix()
        )
    }

    fn api_key_suffix(&self) -> String {
        match &self.config.api_key {
            Some(key) => format!("&api_key={}", urlencoding::encode(key)),
            None => String::new(),
        }
    }

    /// Sleep until the configured inter-request delay has passed.
    fn throttle(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < self.config.rate_limit {
                std::thread::sleep(self.config.rate_limit - elapsed);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }

    /// GET `url`, with throttling and one retry on transient failures.
    fn get_text(&self, url: &str) -> Result<String> {
        with_one_retry(self.config.retry_backoff, || {
            self.throttle();
            match self.client.get(url).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        Attempt::Done(response.text().map_err(|e| ClinVarError::Network {
                            msg: format!("Failed to read response body: {}", e),
                        }))
                    } else {
                        let err = ClinVarError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        };
                        if is_transient_status(status.as_u16()) {
                            Attempt::Transient(err)
                        } else {
                            Attempt::Done(Err(err))
                        }
                    }
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    Attempt::Transient(e.into())
                }
                Err(e) => Attempt::Done(Err(e.into())),
            }
        })
    }

    /// Search ClinVar, returning the matching IDs in server order.
    pub fn esearch(&self, query: &VariantQuery) -> Result<Vec<String>> {
        let body = self.get_text(&self.esearch_url(query))?;
        let response: EsearchResponse =
            serde_json::from_str(&body).map_err(|e| ClinVarError::Parse {
                msg: format!("esearch response for {}: {}", query, e),
            })?;
        Ok(response.esearch_result.id_list)
    }

    /// Fetch the summary for a variation ID.
    pub fn esummary(&self, id: &str) -> Result<VariantResult> {
        let body = self.get_text(&self.esummary_url(id))?;
        let response: EsummaryResponse =
            serde_json::from_str(&body).map_err(|e| ClinVarError::Parse {
                msg: format!("esummary response for {}: {}", id, e),
            })?;
        let summary = response.summary_for(id).ok_or_else(|| ClinVarError::Parse {
            msg: format!("esummary response has no entry for {}", id),
        })?;
        Ok(summary.into_result(id))
    }
}

impl VariantLookup for EutilsClient {
    fn lookup(&self, query: &VariantQuery) -> Result<VariantResult> {
        let ids = self.esearch(query)?;
        // First-returned ID is authoritative; no secondary ranking.
        match ids.first() {
            Some(id) => self.esummary(id),
            None => Ok(VariantResult::not_found(query)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_status_classification() {
        assert!(is_transient_status(500));
        assert!(is_transient_status(503));
        assert!(is_transient_status(599));
        assert!(!is_transient_status(404));
        assert!(!is_transient_status(400));
        assert!(!is_transient_status(200));
    }

    #[test]
    fn test_retry_not_taken_on_success() {
        let mut calls = 0;
        let result = with_one_retry(Duration::ZERO, || {
            calls += 1;
            Attempt::Done(Ok(42))
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_transient_then_success_recovers() {
        let mut calls = 0;
        let result = with_one_retry(Duration::ZERO, || {
            calls += 1;
            if calls == 1 {
                Attempt::Transient(ClinVarError::HttpStatus {
                    status: 503,
                    url: "test".to_string(),
                })
            } else {
                Attempt::Done(Ok("recovered"))
            }
        });
        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_only_one_retry() {
        let mut calls = 0;
        let result: Result<()> = with_one_retry(Duration::ZERO, || {
            calls += 1;
            Attempt::Transient(ClinVarError::HttpStatus {
                status: 503,
                url: "test".to_string(),
            })
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_client_error_not_retried() {
        let mut calls = 0;
        let result: Result<()> = with_one_retry(Duration::ZERO, || {
            calls += 1;
            Attempt::Done(Err(ClinVarError::HttpStatus {
                status: 404,
                url: "test".to_string(),
            }))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_esearch_url_encodes_term() {
        let client = EutilsClient::new(
            ClientConfig::default().with_base_url("http://localhost:9999/eutils"),
        )
        .unwrap();
        let url = client.esearch_url(&VariantQuery::new("CHD8", "p.Arg1580Trp"));

        assert!(url.starts_with("http://localhost:9999/eutils/esearch.fcgi?db=clinvar&term="));
        assert!(url.contains("CHD8%5Bgene%5D%20AND%20p.Arg1580Trp%5BVariation%20Name%5D"));
        assert!(url.ends_with("&retmode=json"));
    }

    #[test]
    fn test_esummary_url() {
        let client = EutilsClient::new(
            ClientConfig::default().with_base_url("http://localhost:9999/eutils"),
        )
        .unwrap();
        let url = client.esummary_url("1929445");
        assert_eq!(
            url,
            "http://localhost:9999/eutils/esummary.fcgi?db=clinvar&id=1929445&retmode=json"
        );
    }

    #[test]
    fn test_api_key_appended() {
        let client = EutilsClient::new(
            ClientConfig::default()
                .with_base_url("http://localhost:9999/eutils")
                .with_api_key("secret"),
        )
        .unwrap();
        assert!(client.esearch_url(&VariantQuery::new("TP53", "c.1A>G")).ends_with("&api_key=secret"));
    }
}
