//! Race header text: the document title and the slash-delimited info line.
//!
//! The two sites order the info line differently. The listing site
//! (shutuba) writes `time / course / weather / condition`; the database
//! site (result) writes `course / weather / condition / time`. Both
//! orders are real and must stay as they are. A title or segment that
//! fails its pattern degrades every derived field to `""`.

use regex::Regex;

/// Parsed shutuba `<title>`: `桜花賞 出馬表 | 2025年4月13日 阪神11R …`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShutubaTitle {
    pub race_name: String,
    pub date: String,
    pub place: String,
}

/// Parsed shutuba info line: `15:40発走 / 芝1600m (右 外) / 天候:雨 / 馬場:稍`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShutubaData {
    pub time: String,
    pub course: String,
    pub weather: String,
    pub condition: String,
}

/// Parsed result-page `<title>`: `桜花賞｜2025年4月13日｜…`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTitle {
    pub race_name: String,
    pub date: String,
}

/// Parsed result-page info line: `芝右1600m / 天候 : 雨 / 芝 : 稍重 / 発走 : 15:40`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultData {
    pub course: String,
    pub distance: String,
    pub weather: String,
    pub condition: String,
    pub time: String,
}

pub fn parse_shutuba_title(title: &str) -> ShutubaTitle {
    let re = Regex::new(
        r"^(.+?)\s*出馬表\s*[|｜]\s*(\d{4}年\d{1,2}月\d{1,2}日)\s*([^\s\d]+)\d{1,2}R",
    )
    .unwrap();
    match re.captures(title) {
        Some(caps) => ShutubaTitle {
            race_name: caps[1].to_string(),
            date: caps[2].to_string(),
            place: caps[3].to_string(),
        },
        None => ShutubaTitle::default(),
    }
}

pub fn parse_shutuba_data(line: &str) -> ShutubaData {
    let segments: Vec<&str> = line.split('/').collect();
    let time_re = Regex::new(r"(\d{1,2}:\d{2})").unwrap();
    let course_re = Regex::new(r"((?:芝|ダ|障)\d+m)").unwrap();
    let weather_re = Regex::new(r"天候\s*[:：]\s*(\S+)").unwrap();
    let condition_re = Regex::new(r"馬場\s*[:：]\s*(\S+)").unwrap();

    ShutubaData {
        time: capture_in(segments.first(), &time_re),
        course: capture_in(segments.get(1), &course_re),
        weather: capture_in(segments.get(2), &weather_re),
        condition: capture_in(segments.get(3), &condition_re),
    }
}

pub fn parse_result_title(title: &str) -> ResultTitle {
    let re = Regex::new(r"^([^|｜]+?)\s*[|｜]\s*(\d{4}年\d{1,2}月\d{1,2}日)").unwrap();
    match re.captures(title) {
        Some(caps) => ResultTitle {
            race_name: caps[1].to_string(),
            date: caps[2].to_string(),
        },
        None => ResultTitle::default(),
    }
}

pub fn parse_result_data(line: &str) -> ResultData {
    let segments: Vec<&str> = line.split('/').collect();
    let distance_re = Regex::new(r"(\d{3,4})").unwrap();
    let weather_re = Regex::new(r"天候\s*[:：]\s*(\S+)").unwrap();
    let condition_re = Regex::new(r"[:：]\s*(\S+)").unwrap();
    let time_re = Regex::new(r"(\d{1,2}:\d{2})").unwrap();

    let course = segments
        .first()
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    ResultData {
        distance: distance_re
            .captures(&course)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default(),
        course,
        weather: capture_in(segments.get(1), &weather_re),
        condition: capture_in(segments.get(2), &condition_re),
        time: capture_in(segments.get(3), &time_re),
    }
}

/// Venue name in a free-text line such as `2025年4月13日 2回阪神6日目`.
pub fn venue_in(text: &str) -> String {
    let re = Regex::new(r"(札幌|函館|福島|新潟|中山|東京|中京|京都|阪神|小倉)").unwrap();
    re.captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

fn capture_in(segment: Option<&&str>, re: &Regex) -> String {
    segment
        .and_then(|s| re.captures(s))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}
