//! Shutuba (entry list) parser for race.netkeiba.com.
//!
//! The entry table is assembled in JavaScript, so this parser expects the
//! rendered DOM snapshot, not the raw server response.

use anyhow::Result;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::extract::{self, Step};
use super::header;
use super::ids;
use super::{HorseRef, JockeyRef};

/// Selector the rendered page must satisfy before its snapshot is usable.
pub const READY_SELECTOR: &str = "table.Shutuba_Table";

// Column positions in an entry row (1-based nth-child). Columns 3 and 8
// hold the pre-race mark and the trainer, which this record does not use.
const COL_WAKU: usize = 1;
const COL_NUM: usize = 2;
const COL_HORSE: usize = 4;
const COL_SEX_AGE: usize = 5;
const COL_IMPOST: usize = 6;
const COL_JOCKEY: usize = 7;
const COL_HORSE_WEIGHT: usize = 9;
const COL_ODDS: usize = 10;
const COL_POP: usize = 11;

/// Entry list for one race.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceShutuba {
    pub race_name: String,
    pub race_id: String,
    pub date: String,
    pub time: String,
    pub place: String,
    pub course: String,
    pub weather: String,
    pub condition: String,
    pub shutuba: Vec<RaceShutubaItem>,
}

/// One planned starter, in post-position order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceShutubaItem {
    pub waku: i32,
    pub num: i32,
    pub horse: HorseRef,
    pub sex_age: String,
    pub impost_weight: String,
    pub jockey: JockeyRef,
    pub horse_weight: String,
    pub odds: f64,
    pub pop: i32,
}

/// Parser for shutuba pages.
pub struct ShutubaParser;

impl ShutubaParser {
    /// Parse an entry list from a rendered DOM snapshot.
    pub fn parse(html: &str) -> Result<RaceShutuba> {
        let document = Html::parse_document(html);
        let mut race = RaceShutuba::default();

        if let Ok(selector) = Selector::parse("title") {
            if let Some(elem) = document.select(&selector).next() {
                let title = header::parse_shutuba_title(&elem.text().collect::<String>());
                race.race_name = title.race_name;
                race.date = title.date;
                race.place = title.place;
            }
        }

        // The page links its own result/odds views with race_id query
        // parameters; the first one in document order names this race.
        if let Ok(selector) = Selector::parse("a") {
            for link in document.select(&selector) {
                let id = ids::extract_id(
                    link.value().attr("href").unwrap_or(""),
                    ids::RACE_QUERY,
                );
                if !id.is_empty() {
                    race.race_id = id;
                    break;
                }
            }
        }

        if let Ok(selector) = Selector::parse(".RaceData01") {
            if let Some(elem) = document.select(&selector).next() {
                let data = header::parse_shutuba_data(&elem.text().collect::<String>());
                race.time = data.time;
                race.course = data.course;
                race.weather = data.weather;
                race.condition = data.condition;
            }
        }

        if let Ok(selector) = Selector::parse("table.Shutuba_Table tr.HorseList") {
            for row in document.select(&selector) {
                race.shutuba.push(Self::parse_row(row));
            }
        }

        Ok(race)
    }

    fn parse_row(row: scraper::ElementRef) -> RaceShutubaItem {
        let mut item = RaceShutubaItem {
            waku: extract::int_at(row, &[Step::tag("td").nth(COL_WAKU)]),
            num: extract::int_at(row, &[Step::tag("td").nth(COL_NUM)]),
            sex_age: extract::text_at(row, &[Step::tag("td").nth(COL_SEX_AGE)]),
            impost_weight: extract::trimmed_text_at(row, &[Step::tag("td").nth(COL_IMPOST)]),
            horse_weight: extract::trimmed_text_at(row, &[Step::tag("td").nth(COL_HORSE_WEIGHT)]),
            odds: extract::float_at(row, &[Step::tag("td").nth(COL_ODDS)]),
            pop: extract::int_at(row, &[Step::tag("td").nth(COL_POP)]),
            ..Default::default()
        };

        // The horse anchor sits inside layout divs; the jockey anchor is a
        // direct child. Either may be absent on guest rows.
        if let Some(cell) = extract::locate(row, &[Step::tag("td").nth(COL_HORSE)]) {
            if let Some(link) = extract::first_within(cell, Step::tag("a")) {
                item.horse = HorseRef::from_anchor(link, ids::HORSE_ABS);
            }
        }
        if let Some(cell) = extract::locate(row, &[Step::tag("td").nth(COL_JOCKEY)]) {
            if let Some(link) = extract::first_within(cell, Step::tag("a")) {
                item.jockey = JockeyRef::from_anchor(link, ids::JOCKEY_ABS);
            }
        }

        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rendered shutuba snapshot, trimmed to the parts the parser reads.
    const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>桜花賞 出馬表 | 2025年4月13日 阪神11R 競馬データベース - netkeiba.com</title></head>
<body>
<div class="RaceList_NameBox">
  <div class="RaceList_Item02">
    <h1 class="RaceName">桜花賞</h1>
    <div class="RaceData01">15:40発走 / 芝1600m (右 外) / 天候:雨 / 馬場:稍</div>
  </div>
  <div class="RaceList_Item01">
    <a href="https://race.netkeiba.com/race/result.html?race_id=202509020611">結果</a>
  </div>
</div>
<table class="Shutuba_Table RaceTable01">
<thead>
<tr><th>枠</th><th>馬番</th><th>印</th><th>馬名</th><th>性齢</th><th>斤量</th><th>騎手</th><th>厩舎</th><th>馬体重</th><th>オッズ</th><th>人気</th></tr>
</thead>
<tbody>
<tr class="HorseList">
  <td class="Waku1">1</td>
  <td class="Umaban">1</td>
  <td class="Mark">--</td>
  <td class="HorseInfo"><div class="HorseName"><a href="https://db.netkeiba.com/horse/2022104617">ヴーレヴー</a></div></td>
  <td class="Barei">牝3</td>
  <td>55.0</td>
  <td class="Jockey"><a href="https://db.netkeiba.com/jockey/result/recent/01115/">浜中</a></td>
  <td class="Trainer">中内田</td>
  <td class="Weight">448(-4)</td>
  <td class="Popular"><span id="odds-1_01">38.5</span></td>
  <td class="Popular_Ninki"><span id="ninki-1_01">10</span></td>
</tr>
<tr class="HorseList">
  <td class="Waku1">1</td>
  <td class="Umaban">2</td>
  <td class="Mark">--</td>
  <td class="HorseInfo"><div class="HorseName"><a href="https://db.netkeiba.com/horse/2022105025">エンブロイダリー</a></div></td>
  <td class="Barei">牝3</td>
  <td>55.0</td>
  <td class="Jockey"><a href="https://db.netkeiba.com/jockey/result/recent/05339/">ルメール</a></td>
  <td class="Trainer">森一</td>
  <td class="Weight">470(+2)</td>
  <td class="Popular"><span id="odds-1_02">4.0</span></td>
  <td class="Popular_Ninki"><span id="ninki-1_02">2</span></td>
</tr>
<tr class="HorseList">
  <td class="Waku2">2</td>
  <td class="Umaban">3</td>
  <td class="Mark">--</td>
  <td class="HorseInfo"><div class="HorseName">サンプルホース</div></td>
  <td class="Barei">牝3</td>
  <td>55.0</td>
  <td class="Jockey">未定</td>
  <td class="Trainer">--</td>
  <td class="Weight">計不</td>
  <td class="Popular"><span id="odds-1_03">---</span></td>
  <td class="Popular_Ninki"><span id="ninki-1_03">**</span></td>
</tr>
</tbody>
</table>
</body>
</html>"#;

    #[test]
    fn test_parse_header_fields() {
        let race = ShutubaParser::parse(SAMPLE_HTML).unwrap();

        assert_eq!(race.race_name, "桜花賞");
        assert_eq!(race.race_id, "202509020611");
        assert_eq!(race.date, "2025年4月13日");
        assert_eq!(race.time, "15:40");
        assert_eq!(race.place, "阪神");
        assert_eq!(race.course, "芝1600m");
        assert_eq!(race.weather, "雨");
        assert_eq!(race.condition, "稍");
    }

    #[test]
    fn test_parse_entries_in_row_order() {
        let race = ShutubaParser::parse(SAMPLE_HTML).unwrap();

        assert_eq!(race.shutuba.len(), 3);

        let first = &race.shutuba[0];
        assert_eq!(first.waku, 1);
        assert_eq!(first.num, 1);
        assert_eq!(first.horse.horse_name, "ヴーレヴー");
        assert_eq!(first.horse.horse_id, "2022104617");
        assert_eq!(first.sex_age, "牝3");
        assert_eq!(first.impost_weight, "55.0");
        assert_eq!(first.jockey.jockey_name, "浜中");
        assert_eq!(first.jockey.jockey_id, "01115");
        assert_eq!(first.horse_weight, "448(-4)");
        assert_eq!(first.odds, 38.5);
        assert_eq!(first.pop, 10);

        assert_eq!(race.shutuba[1].num, 2);
        assert_eq!(race.shutuba[2].num, 3);
    }

    #[test]
    fn test_row_without_horse_anchor_still_yields_item() {
        let race = ShutubaParser::parse(SAMPLE_HTML).unwrap();

        let guest = &race.shutuba[2];
        assert_eq!(guest.horse.horse_name, "");
        assert_eq!(guest.horse.horse_id, "");
        assert_eq!(guest.jockey.jockey_name, "");
        // The rest of the row is unaffected.
        assert_eq!(guest.waku, 2);
        assert_eq!(guest.num, 3);
        assert_eq!(guest.sex_age, "牝3");
        // Non-numeric odds/pop collapse to the sentinels.
        assert_eq!(guest.odds, extract::FLOAT_SENTINEL);
        assert_eq!(guest.pop, extract::INT_SENTINEL);
    }

    #[test]
    fn test_empty_document_yields_empty_record() {
        let race = ShutubaParser::parse("<html></html>").unwrap();
        assert_eq!(race.race_name, "");
        assert_eq!(race.race_id, "");
        assert!(race.shutuba.is_empty());
    }

    #[test]
    fn test_reparse_is_deterministic() {
        let a = serde_json::to_string(&ShutubaParser::parse(SAMPLE_HTML).unwrap()).unwrap();
        let b = serde_json::to_string(&ShutubaParser::parse(SAMPLE_HTML).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
