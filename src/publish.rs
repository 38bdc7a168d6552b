// src/publish.rs
//
// Hand a changed snapshot to git: add, commit with a one-line summary, push.
// Nothing here can fail a run; the runner logs a PublishError and moves on.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::diff::ChangeReport;
use crate::error::PublishError;

pub trait Publisher {
    fn publish(&self, snapshot: &Path, report: &ChangeReport) -> Result<(), PublishError>;
}

/// Short commit subject for a set of changes.
///
/// - exactly one change: that change
/// - otherwise, position changes win: the one, or "N pos changes"
/// - otherwise "N teams updated"
pub fn commit_message(report: &ChangeReport) -> String {
    if report.len() == 1 {
        return report.changes[0].to_string();
    }

    let pos: Vec<_> = report.changes.iter().filter(|c| c.is_position()).collect();
    match pos.as_slice() {
        [] => format!("{} teams updated", report.len()),
        [one] => one.to_string(),
        many => format!("{} pos changes", many.len()),
    }
}

pub struct GitPublisher {
    repo_dir: Option<PathBuf>,
}

impl GitPublisher {
    pub fn new(repo_dir: Option<PathBuf>) -> Self {
        Self { repo_dir }
    }

    fn git(&self, step: &'static str, args: &[&str]) -> Result<(), PublishError> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }

        let out = cmd.output().map_err(|source| PublishError::Spawn { step, source })?;
        if !out.status.success() {
            return Err(PublishError::Git {
                step,
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        logd!("git {step} ok");
        Ok(())
    }

    /// The snapshot as git should see it. Git runs inside `repo_dir`, while
    /// `snapshot` is relative to our own working directory.
    fn pathspec(&self, snapshot: &Path) -> Result<PathBuf, PublishError> {
        let Some(dir) = &self.repo_dir else {
            return Ok(snapshot.to_path_buf());
        };
        let resolve = |p: &Path| {
            fs::canonicalize(p).map_err(|source| PublishError::Resolve { path: p.to_path_buf(), source })
        };

        let file = resolve(snapshot)?;
        let repo = resolve(dir)?;
        Ok(file.strip_prefix(&repo).map(Path::to_path_buf).unwrap_or(file))
    }
}

impl Publisher for GitPublisher {
    fn publish(&self, snapshot: &Path, report: &ChangeReport) -> Result<(), PublishError> {
        let msg = commit_message(report);
        let spec = self.pathspec(snapshot)?;
        let file = spec.to_string_lossy();

        self.git("add", &["add", "--", &*file])?;
        self.git("commit", &["commit", "-m", msg.as_str()])?;
        self.git("push", &["push"])?;

        logf!("Pushed to remote: {msg}");
        Ok(())
    }
}
