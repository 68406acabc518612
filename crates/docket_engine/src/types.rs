use std::path::PathBuf;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// One case record as the search endpoint serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessRecord {
    #[serde(deserialize_with = "stringly")]
    pub number: String,
    pub client: String,
    pub area: String,
    pub service: String,
    #[serde(deserialize_with = "stringly")]
    pub year: String,
    pub reference: String,
    pub path: String,
}

/// The identifier and year fields arrive as either JSON strings or bare
/// integers depending on how the archive was indexed.
fn stringly<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stringly {
        Text(String),
        Int(i64),
    }

    Ok(match Stringly::deserialize(deserializer)? {
        Stringly::Text(text) => text,
        Stringly::Int(value) => value.to_string(),
    })
}

/// Search filter parameters, serialized to the query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub client: String,
    pub number_start: String,
    pub number_end: String,
    pub year: String,
    pub area: String,
    pub service: String,
    pub reference: String,
}

impl SearchQuery {
    /// Query pairs; unset fields are left out entirely.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("client", self.client.as_str()),
            ("number_start", self.number_start.as_str()),
            ("number_end", self.number_end.as_str()),
            ("year", self.year.as_str()),
            ("area", self.area.as_str()),
            ("service", self.service.as_str()),
            ("reference", self.reference.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

/// One file of a batch; the bytes are read from `path` at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub path: PathBuf,
}

/// A full submit-batch request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchRequest {
    /// Number of the process the files are filed under.
    pub target: String,
    pub kind: String,
    pub expense_label: String,
    pub expense_due_date: String,
    pub files: Vec<UploadFile>,
    pub force_rename: bool,
}

/// Upload outcomes that are not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The server stored every file.
    Accepted { message: String },
    /// The server found name collisions and stored nothing.
    Exists { files: Vec<String> },
}

/// Completion events reported by the api worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    SearchCompleted {
        seq: u64,
        result: Result<Vec<ProcessRecord>, ApiError>,
    },
    ClientsFetched {
        result: Result<Vec<String>, ApiError>,
    },
    FolderOpened {
        result: Result<(), ApiError>,
    },
    BatchCompleted {
        result: Result<BatchOutcome, ApiError>,
    },
}

/// Failure taxonomy for one API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("malformed response: {0}")]
    InvalidResponse(String),
    /// The server answered with its own error message.
    #[error("{0}")]
    Server(String),
    /// A queued file vanished or is unreadable; detected before any bytes
    /// go on the wire.
    #[error("cannot read {name}: {message}")]
    UnreadableFile { name: String, message: String },
}
