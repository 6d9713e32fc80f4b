//! Error types for clinvar-batch.
//!
//! Two of these are fatal and abort a run (`Io`, `FileFormat`); the rest are
//! recovered per record by the batch driver, which turns them into an
//! `Error`-status output row so one bad record cannot lose the batch.

use thiserror::Error;

/// Main error type for clinvar-batch operations.
#[derive(Error, Debug)]
pub enum ClinVarError {
    /// File open/create failure. Fatal.
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// Input file is missing a required column. Fatal.
    #[error("Input format error: missing required column '{column}' (found: {found})")]
    FileFormat { column: String, found: String },

    /// HTTP transport failure talking to the remote database.
    #[error("Network error: {msg}")]
    Network { msg: String },

    /// Remote response could not be decoded.
    #[error("Parse error: {msg}")]
    Parse { msg: String },

    /// Remote endpoint answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },
}

impl ClinVarError {
    /// True for errors that must abort the whole run rather than a single record.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClinVarError::Io { .. } | ClinVarError::FileFormat { .. })
    }
}

impl From<std::io::Error> for ClinVarError {
    fn from(err: std::io::Error) -> Self {
        ClinVarError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<csv::Error> for ClinVarError {
    fn from(err: csv::Error) -> Self {
        // csv wraps the underlying IO error; keep the fatal classification.
        ClinVarError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClinVarError {
    fn from(err: serde_json::Error) -> Self {
        ClinVarError::Parse {
            msg: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClinVarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClinVarError::Parse {
                msg: err.to_string(),
            }
        } else {
            ClinVarError::Network {
                msg: err.to_string(),
            }
        }
    }
}
