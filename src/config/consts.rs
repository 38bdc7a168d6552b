// src/config/consts.rs

// Source
pub const SOURCE_URL: &str = "https://sportstatistik.nu/hockey/shl/tabell";
pub const SOURCE_NAME: &str = "SHL";
pub const TABLE_KIND: &str = "Total";
pub const FETCH_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = concat!("shl_standings/", env!("CARGO_PKG_VERSION"));

// Snapshot
pub const SNAPSHOT_FILE: &str = "standings.json";
pub const SCHEMA_VERSION: &str = "1.0.0";

// League
pub const SEASON_LENGTH_GAMES: u32 = 52; // SHL regular season
pub const SEASON_START_MONTH: u32 = 9; // September
