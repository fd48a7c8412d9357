//! Race result parser for db.netkeiba.com.
//!
//! URL: https://db.netkeiba.com/race/RACEID/

use anyhow::Result;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::extract::{self, Step};
use super::header;
use super::ids;
use super::{HorseRef, JockeyRef, Rank};

// Column positions in a result row (1-based nth-child). Column 10 holds
// the time index, which this record does not use.
const COL_RANK: usize = 1;
const COL_WAKU: usize = 2;
const COL_NUM: usize = 3;
const COL_HORSE: usize = 4;
const COL_SEX_AGE: usize = 5;
const COL_IMPOST: usize = 6;
const COL_JOCKEY: usize = 7;
const COL_TIME: usize = 8;
const COL_MARGIN: usize = 9;
const COL_ODDS: usize = 11;
const COL_POP: usize = 12;
const COL_HORSE_WEIGHT: usize = 13;

/// Result of one race, finish order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_name: String,
    pub race_id: String,
    pub date: String,
    pub time: String,
    pub place: String,
    pub distance: String,
    pub course: String,
    pub weather: String,
    pub condition: String,
    pub results: Vec<RaceResultItem>,
}

/// One finisher (or non-finisher) row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceResultItem {
    pub rank: Rank,
    pub waku: i32,
    pub num: i32,
    pub horse: HorseRef,
    pub sex_age: String,
    pub impost_weight: String,
    pub jockey: JockeyRef,
    pub time: String,
    pub margin: String,
    pub odds: f64,
    pub pop: i32,
    pub horse_weight: String,
}

/// Parser for race result pages.
pub struct RaceResultParser;

impl RaceResultParser {
    /// Parse a race result from HTML.
    pub fn parse(html: &str) -> Result<RaceResult> {
        let document = Html::parse_document(html);
        let mut race = RaceResult::default();

        if let Ok(selector) = Selector::parse("title") {
            if let Some(elem) = document.select(&selector).next() {
                let title = header::parse_result_title(&elem.text().collect::<String>());
                race.race_name = title.race_name;
                race.date = title.date;
            }
        }

        // The database page links this race by its relative path (active
        // entry of the race-list strip); first match in document order.
        if let Ok(selector) = Selector::parse("a") {
            for link in document.select(&selector) {
                let id =
                    ids::extract_id(link.value().attr("href").unwrap_or(""), ids::RACE_REL);
                if !id.is_empty() {
                    race.race_id = id;
                    break;
                }
            }
        }

        if let Ok(selector) = Selector::parse("dl.racedata span") {
            if let Some(elem) = document.select(&selector).next() {
                let data = header::parse_result_data(&elem.text().collect::<String>());
                race.course = data.course;
                race.distance = data.distance;
                race.weather = data.weather;
                race.condition = data.condition;
                race.time = data.time;
            }
        }

        if let Ok(selector) = Selector::parse("p.smalltxt") {
            if let Some(elem) = document.select(&selector).next() {
                race.place = header::venue_in(&elem.text().collect::<String>());
            }
        }

        if let Ok(selector) = Selector::parse("table.race_table_01 tr") {
            // The first row is the column header; it is skipped by
            // position, not by content.
            for row in document.select(&selector).skip(1) {
                race.results.push(Self::parse_row(row));
            }
        }

        Ok(race)
    }

    fn parse_row(row: scraper::ElementRef) -> RaceResultItem {
        let mut item = RaceResultItem {
            rank: Rank::from_cell(&extract::text_at(row, &[Step::tag("td").nth(COL_RANK)])),
            waku: extract::int_at(row, &[Step::tag("td").nth(COL_WAKU)]),
            num: extract::int_at(row, &[Step::tag("td").nth(COL_NUM)]),
            sex_age: extract::text_at(row, &[Step::tag("td").nth(COL_SEX_AGE)]),
            impost_weight: extract::trimmed_text_at(row, &[Step::tag("td").nth(COL_IMPOST)]),
            time: extract::text_at(row, &[Step::tag("td").nth(COL_TIME)]),
            margin: extract::text_at(row, &[Step::tag("td").nth(COL_MARGIN)]),
            odds: extract::float_at(row, &[Step::tag("td").nth(COL_ODDS)]),
            pop: extract::int_at(row, &[Step::tag("td").nth(COL_POP)]),
            horse_weight: extract::trimmed_text_at(row, &[Step::tag("td").nth(COL_HORSE_WEIGHT)]),
            ..Default::default()
        };

        if let Some(cell) = extract::locate(row, &[Step::tag("td").nth(COL_HORSE)]) {
            if let Some(link) = extract::first_within(cell, Step::tag("a")) {
                item.horse = HorseRef::from_anchor(link, ids::HORSE_REL);
            }
        }
        if let Some(cell) = extract::locate(row, &[Step::tag("td").nth(COL_JOCKEY)]) {
            if let Some(link) = extract::first_within(cell, Step::tag("a")) {
                item.jockey = JockeyRef::from_anchor(link, ids::JOCKEY_REL);
            }
        }

        item
    }
}
