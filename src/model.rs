// src/model.rs
//
// Typed standings rows.
//
// A TeamRecord is what one <tr> of the Total table becomes. Raw counters are
// scraped; derived numbers are always recomputed from them and the season
// length, so they never drift from the counters they describe.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The ten scraped counters, in table column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatField {
    GamesPlayed,
    Wins,
    Ties,
    Losses,
    OtWins,
    OtLosses,
    GoalsFor,
    GoalsAgainst,
    GoalDiff,
    Points,
}

impl StatField {
    pub const ALL: [StatField; 10] = [
        StatField::GamesPlayed,
        StatField::Wins,
        StatField::Ties,
        StatField::Losses,
        StatField::OtWins,
        StatField::OtLosses,
        StatField::GoalsFor,
        StatField::GoalsAgainst,
        StatField::GoalDiff,
        StatField::Points,
    ];

    /// Key used in the snapshot document and in change messages.
    pub fn name(self) -> &'static str {
        match self {
            StatField::GamesPlayed => "games_played",
            StatField::Wins => "wins",
            StatField::Ties => "ties",
            StatField::Losses => "losses",
            StatField::OtWins => "ot_wins",
            StatField::OtLosses => "ot_losses",
            StatField::GoalsFor => "goals_for",
            StatField::GoalsAgainst => "goals_against",
            StatField::GoalDiff => "goal_diff",
            StatField::Points => "points",
        }
    }

    /// Cell index in a standings row. Column 0 is the team name.
    pub fn column(self) -> usize {
        match self {
            StatField::GamesPlayed => 1,
            StatField::Wins => 2,
            StatField::Ties => 3,
            StatField::Losses => 4,
            StatField::OtWins => 5,
            StatField::OtLosses => 6,
            StatField::GoalsFor => 7,
            StatField::GoalsAgainst => 8,
            StatField::GoalDiff => 9,
            StatField::Points => 10,
        }
    }

    /// Only goal difference may go below zero.
    pub fn signed(self) -> bool {
        matches!(self, StatField::GoalDiff)
    }

    pub fn get(self, c: &RawCounts) -> i64 {
        match self {
            StatField::GamesPlayed => c.games_played.into(),
            StatField::Wins => c.wins.into(),
            StatField::Ties => c.ties.into(),
            StatField::Losses => c.losses.into(),
            StatField::OtWins => c.ot_wins.into(),
            StatField::OtLosses => c.ot_losses.into(),
            StatField::GoalsFor => c.goals_for.into(),
            StatField::GoalsAgainst => c.goals_against.into(),
            StatField::GoalDiff => c.goal_diff.into(),
            StatField::Points => c.points.into(),
        }
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column 0 of every data row.
pub const TEAM_COLUMN: usize = 0;

/// Minimum cells a data row needs: team name plus every counter.
pub const ROW_CELLS: usize = 1 + StatField::ALL.len();

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCounts {
    pub games_played: u32,
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    pub ot_wins: u32,
    pub ot_losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
    pub points: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Derived {
    pub win_percentage: f64,
    pub points_per_game: f64,
    pub goals_per_game: f64,
    pub games_remaining: i64,
}

impl Derived {
    pub fn compute(c: &RawCounts, season_length: u32) -> Self {
        let gp = c.games_played;
        Self {
            win_percentage: round2(ratio(c.wins, gp) * 100.0),
            points_per_game: round2(ratio(c.points, gp)),
            goals_per_game: round2(ratio(c.goals_for, gp)),
            games_remaining: i64::from(season_length) - i64::from(gp),
        }
    }
}

fn ratio(num: u32, games: u32) -> f64 {
    if games == 0 { 0.0 } else { f64::from(num) / f64::from(games) }
}

/// Half away from zero, two decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// One team's line in the Total table. Serializes as a flat object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub position: u32,
    pub team: String,
    #[serde(flatten)]
    pub stats: RawCounts,
    #[serde(flatten)]
    pub derived: Derived,
}

impl TeamRecord {
    pub fn new(position: u32, team: impl Into<String>, stats: RawCounts, season_length: u32) -> Self {
        Self {
            position,
            team: team.into(),
            derived: Derived::compute(&stats, season_length),
            stats,
        }
    }

    /// Recompute derived fields; used after loading a stored snapshot.
    pub fn rederive(mut self, season_length: u32) -> Self {
        self.derived = Derived::compute(&self.stats, season_length);
        self
    }

    pub fn stat(&self, field: StatField) -> i64 {
        field.get(&self.stats)
    }
}
