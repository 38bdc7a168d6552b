// src/error.rs
use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

/// Why the standings page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("request to {url} timed out after {}s", .timeout.as_secs())]
    TimedOut { url: String, timeout: Duration },

    #[error("HTTP error {status} from {url}")]
    HttpError { url: String, status: u16 },

    #[error("request to {url} failed: {reason}")]
    Other { url: String, reason: String },
}

/// Fatal outcomes of reading the standings table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no tables found on page")]
    NoTableFound,

    #[error("table has insufficient rows ({rows}, need a header and at least one data row)")]
    InsufficientRows { rows: usize },

    #[error("no valid standings data extracted")]
    NoValidRecords,
}

/// Anything that stops a run. Each variant exits nonzero.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write snapshot {}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Commit/push trouble. Logged, never fatal.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("could not resolve {path} against the repository: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not run `git {step}`: {source}")]
    Spawn {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("`git {step}` exited with {status}: {stderr}")]
    Git {
        step: &'static str,
        status: String,
        stderr: String,
    },
}

/// Bad command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("invalid value for {flag}: {value:?}")]
    InvalidValue { flag: &'static str, value: String },

    #[error("unknown arg: {0}")]
    UnknownArg(String),
}
