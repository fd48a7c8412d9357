//! Jockey profile parser for db.netkeiba.com.
//!
//! Every field on this page is free text; nothing is coerced.
//!
//! URL: https://db.netkeiba.com/jockey/JOCKEYID/

use anyhow::Result;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::extract::{self, Step};
use super::ids;

// Row positions in the detail table (1-based). Row 2 holds the blood
// type, which this record does not use.
const ROW_HEIGHT_WEIGHT: usize = 1;
const ROW_DEBUT_YEAR: usize = 3;
const ROW_CURRENT_YEAR_WINS: usize = 4;
const ROW_TOTAL_WINS: usize = 5;
const ROW_CURRENT_YEAR_PRIZE: usize = 6;
const ROW_TOTAL_PRIZE: usize = 7;
const ROW_G1_WINS: usize = 8;
const ROW_STAKES_WINS: usize = 9;

/// Jockey profile, all fields as displayed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JockeyInfo {
    pub jockey_name: String,
    pub jockey_id: String,
    pub height_weight: String,
    pub debut_year: String,
    pub current_year_wins: String,
    pub total_wins: String,
    pub current_year_prize: String,
    pub total_prize: String,
    pub g1_wins: String,
    pub stakes_wins: String,
}

/// Parser for jockey profile pages.
pub struct JockeyParser;

impl JockeyParser {
    /// Parse a jockey profile from HTML.
    pub fn parse(html: &str) -> Result<JockeyInfo> {
        let document = Html::parse_document(html);
        let mut info = JockeyInfo::default();

        // The heading spaces family and given name apart; the record
        // carries the name with all whitespace removed.
        if let Ok(selector) = Selector::parse("div.db_head_name h1") {
            if let Some(elem) = document.select(&selector).next() {
                let text = elem.text().collect::<String>();
                let re = Regex::new(r"\s").unwrap();
                info.jockey_name = re.replace_all(&text, "").to_string();
            }
        }

        // The registration strip's first entry links the jockey's own
        // database page, which carries the ID.
        let root = document.root_element();
        if let Some(strip) = extract::first_within(root, Step::tag("div").class("db_head_regist"))
        {
            let href = extract::attr_at(
                strip,
                &[Step::tag("ul"), Step::tag("li").nth(1), Step::tag("a")],
                "href",
            );
            info.jockey_id = ids::extract_id(&href, ids::JOCKEY_DB);
        }

        if let Some(table) = extract::first_within(root, Step::tag("table").id("DetailTable")) {
            info.height_weight = Self::detail_row(table, ROW_HEIGHT_WEIGHT);
            info.debut_year = Self::detail_row(table, ROW_DEBUT_YEAR);
            info.current_year_wins = Self::detail_row(table, ROW_CURRENT_YEAR_WINS);
            info.total_wins = Self::detail_row(table, ROW_TOTAL_WINS);
            info.current_year_prize = Self::detail_row(table, ROW_CURRENT_YEAR_PRIZE);
            info.total_prize = Self::detail_row(table, ROW_TOTAL_PRIZE);
            info.g1_wins = Self::detail_row(table, ROW_G1_WINS);
            info.stakes_wins = Self::detail_row(table, ROW_STAKES_WINS);
        }

        Ok(info)
    }

    fn detail_row(table: scraper::ElementRef, row: usize) -> String {
        extract::text_at(
            table,
            &[Step::tag("tbody"), Step::tag("tr").nth(row), Step::tag("td")],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div id="db_main_box">
  <div>
    <div class="db_head_name fc">
      <div><h1>浜中 俊</h1></div>
    </div>
    <div class="db_head_regist fc">
      <ul>
        <li><a href="https://db.netkeiba.com/jockey/01115/">次走予定</a></li>
        <li><a href="https://db.netkeiba.com/jockey/result/01115/">成績</a></li>
      </ul>
    </div>
  </div>
</div>
<table id="DetailTable">
  <tbody>
    <tr><th>身長/体重</th><td>164.2cm/51.0kg</td></tr>
    <tr><th>血液型</th><td>O型</td></tr>
    <tr><th>デビュー年</th><td>2007年</td></tr>
    <tr><th>本年勝利数</th><td>34勝</td></tr>
    <tr><th>通算勝利数</th><td>1,234勝</td></tr>
    <tr><th>本年獲得賞金</th><td>8億1,234万円</td></tr>
    <tr><th>通算獲得賞金</th><td>250億4,567万円</td></tr>
    <tr><th>GI勝利数</th><td>12勝</td></tr>
    <tr><th>重賞勝利数</th><td>68勝</td></tr>
  </tbody>
</table>
</body>
</html>"#;

    #[test]
    fn test_parse_jockey_profile() {
        let info = JockeyParser::parse(SAMPLE_HTML).unwrap();

        assert_eq!(info.jockey_name, "浜中俊");
        assert_eq!(info.jockey_id, "01115");
        assert_eq!(info.height_weight, "164.2cm/51.0kg");
        assert_eq!(info.debut_year, "2007年");
        assert_eq!(info.current_year_wins, "34勝");
        assert_eq!(info.total_wins, "1,234勝");
        assert_eq!(info.current_year_prize, "8億1,234万円");
        assert_eq!(info.total_prize, "250億4,567万円");
        assert_eq!(info.g1_wins, "12勝");
        assert_eq!(info.stakes_wins, "68勝");
    }

    #[test]
    fn test_name_whitespace_is_removed() {
        let html = r#"<html><body><div class="db_head_name"><div><h1>
 武 豊 </h1></div></div></body></html>"#;
        let info = JockeyParser::parse(html).unwrap();
        assert_eq!(info.jockey_name, "武豊");
    }

    #[test]
    fn test_empty_document_yields_empty_record() {
        let info = JockeyParser::parse("<html></html>").unwrap();
        assert_eq!(info.jockey_name, "");
        assert_eq!(info.jockey_id, "");
        assert_eq!(info.total_wins, "");
    }
}
