// src/runner.rs
//
// One pass of the pipeline:
//   load prior → fetch → parse → compare → save → publish
//
// Fetch, parse and save failures end the run with an error and leave the
// stored snapshot as it was. Publish failures are only logged.

use std::path::PathBuf;

use crate::{
    config::options::AppOptions,
    core::net::Source,
    diff::{self, ChangeReport},
    error::RunError,
    publish::Publisher,
    specs, store,
};

/// What a successful run did.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// No prior snapshot; wrote the first one.
    Created { path: PathBuf, teams: usize },
    /// Data matches the stored snapshot; nothing written.
    Unchanged,
    /// Snapshot rewritten; `published` is false when publishing was off or failed.
    Updated { path: PathBuf, report: ChangeReport, published: bool },
}

pub fn run(
    opts: &AppOptions,
    source: &dyn Source,
    publisher: Option<&dyn Publisher>,
) -> Result<Outcome, RunError> {
    let path = &opts.snapshot.path;

    let existing = store::load(path);

    let html = source.fetch(&opts.fetch.url)?;
    let standings = specs::standings::parse_with_season(&html, opts.snapshot.season_length)?;

    let report = match &existing {
        Some(old) => {
            let report = diff::compare(old, &standings);
            if !report.has_changes() {
                logf!("No changes detected - {} not modified", path.display());
                return Ok(Outcome::Unchanged);
            }
            logf!("{} change(s) detected", report.len());
            for msg in report.messages() {
                logf!("  - {msg}");
            }
            Some(report)
        }
        None => {
            logf!("No existing {} - creating new file", path.display());
            None
        }
    };

    store::save(&standings, path, &opts.snapshot, &opts.fetch)
        .map_err(|source| RunError::Save { path: path.clone(), source })?;

    let Some(report) = report else {
        return Ok(Outcome::Created { path: path.clone(), teams: standings.len() });
    };

    let published = match publisher {
        Some(p) => match p.publish(path, &report) {
            Ok(()) => true,
            Err(e) => {
                logw!("Git operation failed: {e}");
                false
            }
        },
        None => {
            logd!("Publishing disabled; leaving {} uncommitted", path.display());
            false
        }
    };

    Ok(Outcome::Updated { path: path.clone(), report, published })
}
