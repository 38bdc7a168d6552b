// src/season.rs
// SHL seasons run September to April and are named after both calendar years.

use chrono::{Datelike, NaiveDate};

use crate::config::consts::SEASON_START_MONTH;

/// `2024-2025` for any date from Sep 2024 through Aug 2025.
pub fn season_label(date: NaiveDate) -> String {
    let year = date.year();
    if date.month() >= SEASON_START_MONTH {
        format!("{}-{}", year, year + 1)
    } else {
        format!("{}-{}", year - 1, year)
    }
}
