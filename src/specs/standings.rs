// src/specs/standings.rs
//! Scraping *spec* for the SHL Total standings table.
//!
//! Purpose:
//! - Read the **first** `<table>` on the standings page. The site lists the
//!   Total table first, followed by Home and Away; nothing in the markup
//!   labels them, so document order is the only identification.
//! - Skip the header row, map each data row's `<td>` cells onto `TeamRecord`
//!   through the `StatField` column table.
//!
//! Tolerance:
//! - Short rows and rows with non-numeric counters are logged and skipped.
//!   Positions are handed out to surviving rows only, so they stay gapless.
//! - A repeated or empty team name is skipped too; names key the comparison
//!   later.
//! - A first table missing its `</table>` is read to the end of the page.
//!
//! Non-Responsibilities:
//! - **No fetching, no caching, no diffing.**

use std::collections::HashSet;

use crate::config::consts::SEASON_LENGTH_GAMES;
use crate::core::html::{cell_text, find_tag_ci, next_tag_block_ci, tag_blocks_ci};
use crate::core::sanitize::ascii_minus;
use crate::error::ParseError;
use crate::model::{RawCounts, StatField, TeamRecord, ROW_CELLS, TEAM_COLUMN};

/// Parse with the default SHL season length.
pub fn parse(markup: &str) -> Result<Vec<TeamRecord>, ParseError> {
    parse_with_season(markup, SEASON_LENGTH_GAMES)
}

pub fn parse_with_season(markup: &str, season_length: u32) -> Result<Vec<TeamRecord>, ParseError> {
    let t = std::time::Instant::now();

    let table = match next_tag_block_ci(markup, "table", 0) {
        Some((tb_s, tb_e)) => &markup[tb_s..tb_e],
        None => {
            // Truncated page: read whatever rows made it.
            let tb_s = find_tag_ci(markup, "table", 0).ok_or(ParseError::NoTableFound)?;
            logw!("Standings table is not closed; reading to end of page");
            &markup[tb_s..]
        }
    };

    let rows = tag_blocks_ci(table, "tr");
    if rows.len() < 2 {
        return Err(ParseError::InsufficientRows { rows: rows.len() });
    }

    let mut out: Vec<TeamRecord> = Vec::with_capacity(rows.len() - 1);
    let mut seen: HashSet<String> = HashSet::new();

    for (row_no, tr) in rows.iter().enumerate().skip(1) {
        let cells: Vec<String> = tag_blocks_ci(tr, "td").into_iter().map(cell_text).collect();

        if cells.len() < ROW_CELLS {
            logw!("Skipping row {row_no} with {} cells (expected {ROW_CELLS})", cells.len());
            continue;
        }

        let stats = match read_counts(&cells) {
            Ok(stats) => stats,
            Err(msg) => {
                logw!("Skipping row {row_no}: {msg}");
                continue;
            }
        };

        let team = &cells[TEAM_COLUMN];
        if team.is_empty() {
            logw!("Skipping row {row_no}: empty team name");
            continue;
        }
        if !seen.insert(team.clone()) {
            logw!("Skipping row {row_no}: duplicate team {team:?}");
            continue;
        }

        let position = out.len() as u32 + 1;
        out.push(TeamRecord::new(position, team.as_str(), stats, season_length));
    }

    if out.is_empty() {
        return Err(ParseError::NoValidRecords);
    }

    logf!("Found {} teams in {} standings table", out.len(), crate::config::consts::TABLE_KIND);
    logd!("Standings: parse in {:?}", t.elapsed());
    Ok(out)
}

fn read_counts(cells: &[String]) -> Result<RawCounts, String> {
    let u = |f: StatField| -> Result<u32, String> {
        let raw = &cells[f.column()];
        raw.parse::<u32>().map_err(|_| format!("{} is not a count: {raw:?}", f.name()))
    };
    let i = |f: StatField| -> Result<i32, String> {
        debug_assert!(f.signed());
        let raw = ascii_minus(&cells[f.column()]);
        raw.parse::<i32>().map_err(|_| format!("{} is not a number: {raw:?}", f.name()))
    };

    Ok(RawCounts {
        games_played: u(StatField::GamesPlayed)?,
        wins: u(StatField::Wins)?,
        ties: u(StatField::Ties)?,
        losses: u(StatField::Losses)?,
        ot_wins: u(StatField::OtWins)?,
        ot_losses: u(StatField::OtLosses)?,
        goals_for: u(StatField::GoalsFor)?,
        goals_against: u(StatField::GoalsAgainst)?,
        goal_diff: i(StatField::GoalDiff)?,
        points: u(StatField::Points)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct LogBuf(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuf {
        type Writer = LogBuf;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` under a WARN-level subscriber and return what it logged.
    fn warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buf = LogBuf::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(buf.clone())
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        (out, text)
    }

    const HEADER: &str = "<tr><th>Lag</th><th>GP</th><th>V</th><th>O</th><th>F</th><th>ÖV</th>\
        <th>ÖF</th><th>GM</th><th>IM</th><th>+/-</th><th>P</th></tr>";

    fn row(team: &str, nums: [&str; 10]) -> String {
        let mut s = format!("<tr>\n  <td class=\"team\"><a href=\"#\">{team}</a></td>");
        for n in nums {
            s.push_str(&format!("<td> {n} </td>"));
        }
        s.push_str("</tr>\n");
        s
    }

    fn team_row(team: &str, gp: u32, wins: u32, points: u32) -> String {
        let (gp, w, p) = (gp.to_string(), wins.to_string(), points.to_string());
        row(team, [gp.as_str(), w.as_str(), "0", "2", "1", "1", "30", "20", "+10", p.as_str()])
    }

    fn table(rows: &[String]) -> String {
        format!("<table class=\"standings\"><thead>{HEADER}</thead><tbody>{}</tbody></table>", rows.concat())
    }

    #[test]
    fn parses_rows_in_order_with_derived_fields() {
        let doc = format!(
            "<html><body><h2>Total</h2>{}</body></html>",
            table(&[team_row("Luleå HF", 10, 6, 19), team_row("Frölunda HC", 10, 5, 16)])
        );
        let recs = parse(&doc).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].position, 1);
        assert_eq!(recs[0].team, "Luleå HF");
        assert_eq!(recs[0].stats.goal_diff, 10);
        assert_eq!(recs[0].derived.win_percentage, 60.0);
        assert_eq!(recs[0].derived.points_per_game, 1.9);
        assert_eq!(recs[0].derived.goals_per_game, 3.0);
        assert_eq!(recs[0].derived.games_remaining, 42);
        assert_eq!(recs[1].position, 2);
        assert_eq!(recs[1].team, "Frölunda HC");
    }

    #[test]
    fn only_the_first_table_is_read() {
        let total = table(&[team_row("Total Team", 10, 6, 19)]);
        let home = table(&[team_row("Home Team", 5, 3, 9)]);
        let recs = parse(&format!("{total}<p>Hemma</p>{home}")).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].team, "Total Team");
    }

    #[test]
    fn no_table_is_an_error() {
        assert_eq!(parse("<html><p>maintenance</p></html>"), Err(ParseError::NoTableFound));
    }

    #[test]
    fn header_only_table_is_an_error() {
        let doc = format!("<table>{HEADER}</table>");
        assert_eq!(parse(&doc), Err(ParseError::InsufficientRows { rows: 1 }));
    }

    #[test]
    fn short_row_is_skipped_without_a_position_gap() {
        let mut rows: Vec<String> = (0..10).map(|i| team_row(&format!("Team {i}"), 10, 5, 15)).collect();
        rows[4] = "<tr><td>Broken</td><td>1</td><td>2</td><td>3</td><td>4</td>\
                   <td>5</td><td>6</td><td>7</td><td>8</td></tr>".to_string();
        let recs = parse(&table(&rows)).unwrap();
        assert_eq!(recs.len(), 9);
        let positions: Vec<u32> = recs.iter().map(|r| r.position).collect();
        assert_eq!(positions, (1..=9).collect::<Vec<_>>());
        assert!(recs.iter().all(|r| r.team != "Broken"));
        assert_eq!(recs[4].team, "Team 5");
    }

    #[test]
    fn non_numeric_row_is_skipped() {
        let bad = row("Bad", ["x", "1", "0", "0", "0", "0", "1", "1", "0", "3"]);
        let recs = parse(&table(&[bad, team_row("Good", 1, 1, 3)])).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].team, "Good");
        assert_eq!(recs[0].position, 1);
    }

    #[test]
    fn negative_counter_other_than_goal_diff_is_rejected() {
        let bad = row("Bad", ["1", "-1", "0", "0", "0", "0", "1", "1", "0", "3"]);
        let recs = parse(&table(&[bad, team_row("Good", 1, 1, 3)])).unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn every_row_invalid_is_an_error() {
        let bad = row("Bad", ["?", "1", "0", "0", "0", "0", "1", "1", "0", "3"]);
        assert_eq!(parse(&table(&[bad])), Err(ParseError::NoValidRecords));
    }

    #[test]
    fn negative_goal_diff_accepts_unicode_minus() {
        let r = row("Brynäs IF", ["12", "3", "0", "8", "0", "1", "25", "40", "\u{2212}15", "10"]);
        let recs = parse(&table(&[r])).unwrap();
        assert_eq!(recs[0].stats.goal_diff, -15);
        assert_eq!(recs[0].stats.points, 10);
    }

    #[test]
    fn entity_encoded_names_are_decoded() {
        let recs = parse(&table(&[team_row("F&auml;rjestad&nbsp;BK", 2, 1, 3)])).unwrap();
        assert_eq!(recs[0].team, "Färjestad BK");
    }

    #[test]
    fn duplicate_team_is_skipped() {
        let recs = parse(&table(&[team_row("HV71", 2, 1, 3), team_row("HV71", 2, 2, 6)])).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].stats.wins, 1);
    }

    #[test]
    fn extra_trailing_cells_are_ignored() {
        let mut r = team_row("Timrå IK", 4, 2, 6);
        r = r.replace("</tr>", "<td>form</td></tr>");
        let recs = parse(&table(&[r])).unwrap();
        assert_eq!(recs[0].stats.points, 6);
    }

    #[test]
    fn season_length_feeds_games_remaining() {
        let recs = parse_with_season(&table(&[team_row("Örebro HK", 10, 5, 15)]), 60).unwrap();
        assert_eq!(recs[0].derived.games_remaining, 50);
    }

    #[test]
    fn skipped_rows_are_logged_as_warnings() {
        let short = "<tr><td>Broken</td><td>1</td><td>2</td></tr>".to_string();
        let bad = row("Bad", ["x", "1", "0", "0", "0", "0", "1", "1", "0", "3"]);
        let (recs, log) = warnings(|| parse(&table(&[team_row("Good", 1, 1, 3), short, bad])));

        assert_eq!(recs.unwrap().len(), 1);
        assert!(log.contains("WARN"), "{log}");
        assert!(log.contains("Skipping row 2 with 3 cells (expected 11)"), "{log}");
        assert!(log.contains("Skipping row 3: games_played is not a count"), "{log}");
    }

    #[test]
    fn empty_team_name_is_skipped() {
        let (recs, log) = warnings(|| {
            parse(&table(&[team_row("&nbsp;", 2, 1, 3), team_row("Leksands IF", 2, 1, 3)]))
        });
        let recs = recs.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].team, "Leksands IF");
        assert_eq!(recs[0].position, 1);
        assert!(log.contains("Skipping row 1: empty team name"), "{log}");
    }

    #[test]
    fn unclosed_table_is_read_to_end_of_page() {
        let doc = format!(
            "<html><body><table>{HEADER}{}{}<tr><td>Trunc",
            team_row("Skellefteå AIK", 3, 3, 9),
            team_row("Rögle BK", 3, 2, 6)
        );
        let (recs, log) = warnings(|| parse(&doc));
        let recs = recs.unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].team, "Rögle BK");
        assert!(log.contains("not closed"), "{log}");
    }

    #[test]
    fn unclosed_header_only_table_has_too_few_rows() {
        let doc = format!("<table>{HEADER}<tr><td>cut off");
        assert_eq!(parse(&doc), Err(ParseError::InsufficientRows { rows: 1 }));
    }
}
