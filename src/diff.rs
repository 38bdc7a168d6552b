// src/diff.rs
//
// Snapshot comparison.
//
// Rules run in order and stop at the first group that fires:
//   1. different team count          → one message, done
//   2. different set of team names    → added and/or removed, done
//   3. per team (new order)           → position change, then raw-stat change
//
// Derived fields are never compared; they follow from the counters.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::model::{StatField, TeamRecord};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDelta {
    pub field: StatField,
    pub old: i64,
    pub new: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    TeamCount { old: usize, new: usize },
    TeamsAdded(Vec<String>),
    TeamsRemoved(Vec<String>),
    Position { team: String, old: u32, new: u32 },
    Stats { team: String, deltas: Vec<FieldDelta> },
}

impl Change {
    pub fn is_position(&self) -> bool {
        matches!(self, Change::Position { .. })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::TeamCount { old, new } => write!(f, "Team count changed: {old} → {new}"),
            Change::TeamsAdded(names) => write!(f, "New teams: {}", names.join(", ")),
            Change::TeamsRemoved(names) => write!(f, "Removed teams: {}", names.join(", ")),
            Change::Position { team, old, new } => write!(f, "{team}: pos {old} → {new}"),
            Change::Stats { team, deltas } => {
                write!(f, "{team}: ")?;
                for (i, d) in deltas.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{} {}→{}", d.field, d.old, d.new)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeReport {
    pub changes: Vec<Change>,
}

impl ChangeReport {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Human-readable lines, one per change, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.changes.iter().map(ToString::to_string).collect()
    }
}

pub fn compare(old: &[TeamRecord], new: &[TeamRecord]) -> ChangeReport {
    let mut changes = Vec::new();

    if old.len() != new.len() {
        changes.push(Change::TeamCount { old: old.len(), new: new.len() });
        return ChangeReport { changes };
    }

    let old_by_team: HashMap<&str, &TeamRecord> = old.iter().map(|r| (r.team.as_str(), r)).collect();
    let new_names: HashSet<&str> = new.iter().map(|r| r.team.as_str()).collect();

    let added: Vec<String> = new.iter()
        .filter(|r| !old_by_team.contains_key(r.team.as_str()))
        .map(|r| r.team.clone())
        .collect();
    let removed: Vec<String> = old.iter()
        .filter(|r| !new_names.contains(r.team.as_str()))
        .map(|r| r.team.clone())
        .collect();

    if !added.is_empty() || !removed.is_empty() {
        if !added.is_empty() { changes.push(Change::TeamsAdded(added)); }
        if !removed.is_empty() { changes.push(Change::TeamsRemoved(removed)); }
        return ChangeReport { changes };
    }

    for cur in new {
        // Same name sets, so every new team has an old counterpart.
        let Some(prev) = old_by_team.get(cur.team.as_str()) else { continue };

        if prev.position != cur.position {
            changes.push(Change::Position {
                team: cur.team.clone(),
                old: prev.position,
                new: cur.position,
            });
        }

        let deltas: Vec<FieldDelta> = StatField::ALL.iter()
            .filter_map(|&field| {
                let (o, n) = (prev.stat(field), cur.stat(field));
                (o != n).then_some(FieldDelta { field, old: o, new: n })
            })
            .collect();
        if !deltas.is_empty() {
            changes.push(Change::Stats { team: cur.team.clone(), deltas });
        }
    }

    ChangeReport { changes }
}
