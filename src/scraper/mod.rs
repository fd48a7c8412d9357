//! Scraping layer for netkeiba.com: fetch clients and HTML parsers.
//!
//! The entry-list page lives on the listing site and builds its table in
//! JavaScript, so it goes through the headless browser; everything else
//! is a plain GET against the database site.

pub mod browser;
pub mod client;
pub mod parsers;

pub use browser::Browser;
pub use client::HttpClient;

/// Listing site (rendered pages).
pub const BASE_URL: &str = "https://race.netkeiba.com";
/// Database site (static pages).
pub const DB_URL: &str = "https://db.netkeiba.com";

/// Build an entry-list URL.
pub fn shutuba_url(race_id: &str) -> String {
    format!("{}/race/shutuba.html?race_id={}", BASE_URL, race_id)
}

/// Build a race result URL.
pub fn race_result_url(race_id: &str) -> String {
    format!("{}/race/{}/", DB_URL, race_id)
}

/// Build a horse profile URL.
pub fn horse_url(horse_id: &str) -> String {
    format!("{}/horse/{}/", DB_URL, horse_id)
}

/// Build a jockey profile URL.
pub fn jockey_url(jockey_id: &str) -> String {
    format!("{}/jockey/{}/", DB_URL, jockey_id)
}
