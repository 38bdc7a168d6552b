// src/store.rs
//
// The persisted snapshot: one JSON document holding metadata and the full
// record list. A save always replaces the whole file.

use std::{fs, io, path::Path};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::config::options::{FetchOptions, SnapshotOptions};
use crate::model::TeamRecord;
use crate::season::season_label;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema_version: String,
    pub captured_at: String,
    pub season: String,
    pub source_name: String,
    pub table_kind: String,
    pub source_location: String,
    pub season_length_games: u32,
    pub record_count: usize,
    pub records: Vec<TeamRecord>,
}

impl Snapshot {
    pub fn new(
        records: &[TeamRecord],
        snap: &SnapshotOptions,
        fetch: &FetchOptions,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            schema_version: snap.schema_version.clone(),
            captured_at: now.to_rfc3339(),
            season: season_label(now.date_naive()),
            source_name: snap.source_name.clone(),
            table_kind: snap.table_kind.clone(),
            source_location: fetch.url.clone(),
            season_length_games: snap.season_length,
            record_count: records.len(),
            records: records.to_vec(),
        }
    }
}

/// Read the prior snapshot's records.
///
/// Missing file and malformed file both come back as `None`; only the
/// latter is worth a warning. Derived fields are recomputed from the stored
/// counters rather than trusted.
pub fn load(path: &Path) -> Option<Vec<TeamRecord>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            logw!("Could not read existing file {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str::<Snapshot>(&text) {
        Ok(snap) => {
            let len = snap.season_length_games;
            logd!("Loaded {} records from {}", snap.records.len(), path.display());
            Some(snap.records.into_iter().map(|r| r.rederive(len)).collect())
        }
        Err(e) => {
            logw!("Ignoring malformed snapshot {}: {e}", path.display());
            None
        }
    }
}

/// Write a fresh snapshot for `records`, stamped with the current time.
pub fn save(
    records: &[TeamRecord],
    path: &Path,
    snap: &SnapshotOptions,
    fetch: &FetchOptions,
) -> io::Result<()> {
    save_snapshot(&Snapshot::new(records, snap, fetch, Local::now()), path)
}

pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> io::Result<()> {
    let mut body = serde_json::to_string_pretty(snapshot)?;
    body.push('\n');
    atomic_write(path, body.as_bytes())?;
    logf!("Saved {} standings to {}", snapshot.record_count, path.display());
    Ok(())
}

/// Temp file beside the target, then rename over it.
fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "snapshot path has no file name"))?;
    let tmp = path.with_file_name(join!(".", &file_name.to_string_lossy(), ".tmp"));

    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
