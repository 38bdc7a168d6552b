// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific knowledge of where the data lives in the HTML and how to
//! pull it out. Specs are pure: markup in, typed rows out.
//!
//! ## What does **not** live here
//! - **Fetching** (`core::net`), **persistence** (`store`), **diffing** (`diff`).
//!
//! ## Conventions
//! - **Case-insensitive** tag detection via `core::html`; no document-wide regexes.
//! - Bad rows are logged and dropped; only structural problems are errors.
//! - Specs are testable **offline** against inline or captured markup.
pub mod standings;
