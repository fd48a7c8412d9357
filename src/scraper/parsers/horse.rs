//! Horse profile parser for db.netkeiba.com.
//!
//! One document carries the profile table, the two-generation pedigree
//! tree, and the full race history; all three land in one record.
//!
//! URL: https://db.netkeiba.com/horse/HORSEID/

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use super::extract::{self, Step};
use super::ids;
use super::{HorseRef, JockeyRef, RaceRef, Rank};

// Row positions in the profile table (1-based). Row 7 holds the
// crowdfunding listing, which this record does not use.
const ROW_BIRTH: usize = 1;
const ROW_TRAINER: usize = 2;
const ROW_OWNER: usize = 3;
const ROW_BREEDER: usize = 4;
const ROW_AREA: usize = 5;
const ROW_SERI: usize = 6;
const ROW_TOTAL_PRIZE: usize = 8;
const ROW_TOTAL_RECORD: usize = 9;

// Column positions in a race-history row (1-based). Columns 4, 6, 17,
// and 20-23 hold the race number, video link, going index, time index,
// corner passages, and pace, which this record does not use.
const COL_DATE: usize = 1;
const COL_PLACE: usize = 2;
const COL_WEATHER: usize = 3;
const COL_RACE: usize = 5;
const COL_HORSE_NUMBER: usize = 7;
const COL_WAKU: usize = 8;
const COL_NUM: usize = 9;
const COL_ODDS: usize = 10;
const COL_POP: usize = 11;
const COL_RANK: usize = 12;
const COL_JOCKEY: usize = 13;
const COL_IMPOST: usize = 14;
const COL_COURSE: usize = 15;
const COL_CONDITION: usize = 16;
const COL_TIME: usize = 18;
const COL_MARGIN: usize = 19;
const COL_HORSE_WEIGHT: usize = 24;

/// Horse profile with pedigree and race history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorseProfile {
    pub horse_name: String,
    pub horse_id: String,
    pub birth: String,
    pub trainer: String,
    pub trainer_id: String,
    pub owner: String,
    pub owner_id: String,
    pub breeder: String,
    pub breeder_id: String,
    pub area: String,
    pub seri: String,
    pub total_prize: String,
    pub total_record: String,
    pub ped: HorsePed,
    pub race_result: Vec<HorseRaceResultItem>,
}

/// Two-generation pedigree: six fixed slots, each independently
/// empty-or-populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorsePed {
    pub father: HorseRef,
    pub mother: HorseRef,
    pub father_father: HorseRef,
    pub father_mother: HorseRef,
    pub mother_father: HorseRef,
    pub mother_mother: HorseRef,
}

/// One past race, most recent first as listed on the source page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorseRaceResultItem {
    pub race: RaceRef,
    pub race_date: String,
    pub place: String,
    pub weather: String,
    pub course: String,
    pub condition: String,
    pub horse_number: i32,
    pub rank: Rank,
    pub waku: i32,
    pub num: i32,
    pub impost_weight: String,
    pub jockey: JockeyRef,
    pub time: String,
    pub margin: String,
    pub odds: f64,
    pub pop: i32,
    pub horse_weight: String,
}

/// Parser for horse profile pages.
pub struct HorseParser;

impl HorseParser {
    /// Parse a horse profile from HTML.
    pub fn parse(html: &str) -> Result<HorseProfile> {
        let document = Html::parse_document(html);
        let mut profile = HorseProfile::default();

        if let Ok(selector) = Selector::parse(".horse_title h1") {
            if let Some(elem) = document.select(&selector).next() {
                profile.horse_name = elem.text().collect::<String>().trim().to_string();
            }
        }

        // The english-site link next to the name carries the horse ID.
        if let Ok(selector) = Selector::parse(".horse_title p.eng_name a") {
            if let Some(elem) = document.select(&selector).next() {
                profile.horse_id = ids::extract_id(
                    elem.value().attr("href").unwrap_or(""),
                    ids::HORSE_EN,
                );
            }
        }

        if let Ok(selector) = Selector::parse("div.db_prof_area_02 > table") {
            if let Some(table) = document.select(&selector).next() {
                Self::parse_profile_rows(table, &mut profile);
            }
        }

        if let Ok(selector) = Selector::parse("table.blood_table") {
            if let Some(table) = document.select(&selector).next() {
                profile.ped = Self::parse_ped(table);
            }
        }

        if let Ok(selector) = Selector::parse("div.db_main_race table tbody tr") {
            for row in document.select(&selector) {
                profile.race_result.push(Self::parse_history_row(row));
            }
        }

        Ok(profile)
    }

    fn parse_profile_rows(table: ElementRef, profile: &mut HorseProfile) {
        // Free-text rows stay unstripped, matching how the site pads them.
        profile.birth = Self::profile_cell(table, ROW_BIRTH);
        profile.area = Self::profile_cell(table, ROW_AREA);
        profile.seri = Self::profile_cell(table, ROW_SERI);
        profile.total_prize = Self::profile_cell(table, ROW_TOTAL_PRIZE);
        profile.total_record = Self::profile_cell(table, ROW_TOTAL_RECORD);

        let trainer = Self::profile_link(table, ROW_TRAINER, ids::TRAINER_REL);
        profile.trainer = trainer.0;
        profile.trainer_id = trainer.1;
        let owner = Self::profile_link(table, ROW_OWNER, ids::OWNER_REL);
        profile.owner = owner.0;
        profile.owner_id = owner.1;
        let breeder = Self::profile_link(table, ROW_BREEDER, ids::BREEDER_REL);
        profile.breeder = breeder.0;
        profile.breeder_id = breeder.1;
    }

    fn profile_cell(table: ElementRef, row: usize) -> String {
        extract::text_at(
            table,
            &[Step::tag("tbody"), Step::tag("tr").nth(row), Step::tag("td")],
        )
    }

    fn profile_link(table: ElementRef, row: usize, pattern: &str) -> (String, String) {
        let path = [
            Step::tag("tbody"),
            Step::tag("tr").nth(row),
            Step::tag("td"),
            Step::tag("a"),
        ];
        match extract::locate(table, &path) {
            Some(link) => (
                link.text().collect::<String>().trim().to_string(),
                ids::extract_id(link.value().attr("href").unwrap_or(""), pattern),
            ),
            None => (String::new(), String::new()),
        }
    }

    /// Fixed 4-row lookup against the pedigree table. Rowspans on the
    /// sire/dam cells mean the second column only exists on rows 1 and 3.
    fn parse_ped(table: ElementRef) -> HorsePed {
        HorsePed {
            father: Self::ped_slot(table, 1, 1),
            mother: Self::ped_slot(table, 3, 1),
            father_father: Self::ped_slot(table, 1, 2),
            father_mother: Self::ped_slot(table, 2, 1),
            mother_father: Self::ped_slot(table, 3, 2),
            mother_mother: Self::ped_slot(table, 4, 1),
        }
    }

    fn ped_slot(table: ElementRef, row: usize, col: usize) -> HorseRef {
        let path = [
            Step::tag("tbody"),
            Step::tag("tr").nth(row),
            Step::tag("td").nth(col),
            Step::tag("a"),
        ];
        match extract::locate(table, &path) {
            Some(link) => HorseRef::from_anchor(link, ids::HORSE_PED),
            None => HorseRef::default(),
        }
    }

    fn parse_history_row(row: ElementRef) -> HorseRaceResultItem {
        let mut item = HorseRaceResultItem {
            race_date: extract::text_at(row, &[Step::tag("td").nth(COL_DATE), Step::tag("a")]),
            place: extract::text_at(row, &[Step::tag("td").nth(COL_PLACE), Step::tag("a")]),
            weather: extract::text_at(row, &[Step::tag("td").nth(COL_WEATHER)]),
            course: extract::text_at(row, &[Step::tag("td").nth(COL_COURSE)]),
            condition: extract::text_at(row, &[Step::tag("td").nth(COL_CONDITION)]),
            horse_number: extract::int_at(row, &[Step::tag("td").nth(COL_HORSE_NUMBER)]),
            rank: Rank::from_cell(&extract::text_at(row, &[Step::tag("td").nth(COL_RANK)])),
            waku: extract::int_at(row, &[Step::tag("td").nth(COL_WAKU)]),
            num: extract::int_at(row, &[Step::tag("td").nth(COL_NUM)]),
            impost_weight: extract::trimmed_text_at(row, &[Step::tag("td").nth(COL_IMPOST)]),
            time: extract::text_at(row, &[Step::tag("td").nth(COL_TIME)]),
            margin: extract::text_at(row, &[Step::tag("td").nth(COL_MARGIN)]),
            odds: extract::float_at(row, &[Step::tag("td").nth(COL_ODDS)]),
            pop: extract::int_at(row, &[Step::tag("td").nth(COL_POP)]),
            horse_weight: extract::trimmed_text_at(row, &[Step::tag("td").nth(COL_HORSE_WEIGHT)]),
            ..Default::default()
        };

        if let Some(link) =
            extract::locate(row, &[Step::tag("td").nth(COL_RACE), Step::tag("a")])
        {
            item.race = RaceRef::from_anchor(link, ids::RACE_REL);
        }
        if let Some(link) =
            extract::locate(row, &[Step::tag("td").nth(COL_JOCKEY), Step::tag("a")])
        {
            item.jockey = JockeyRef::from_anchor(link, ids::JOCKEY_REL);
        }

        item
    }
}
