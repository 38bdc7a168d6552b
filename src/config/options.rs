// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub snapshot: SnapshotOptions,
    pub publish: PublishOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub url: String,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: s!(SOURCE_URL),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }
}

/// Where the snapshot lives and what goes into its metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub path: PathBuf,
    pub schema_version: String,
    pub source_name: String,
    pub table_kind: String,
    pub season_length: u32,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(SNAPSHOT_FILE),
            schema_version: s!(SCHEMA_VERSION),
            source_name: s!(SOURCE_NAME),
            table_kind: s!(TABLE_KIND),
            season_length: SEASON_LENGTH_GAMES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishOptions {
    pub enabled: bool,
    /// Working directory for git; `None` means the current directory.
    pub repo_dir: Option<PathBuf>,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self { enabled: true, repo_dir: None }
    }
}
