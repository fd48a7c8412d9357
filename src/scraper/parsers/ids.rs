//! Entity IDs embedded in hyperlink targets.
//!
//! The listing site (race.netkeiba.com) links entities with absolute
//! database URLs while the database site (db.netkeiba.com) uses
//! site-relative paths, so every call site names the exact shape it
//! expects. A href that is empty or shaped differently yields `""` —
//! unlinked placeholder rows and guest entries are normal, not errors.

use regex::Regex;

/// 10-character horse token in an absolute database link (shutuba pages).
pub const HORSE_ABS: &str = r"^https://db\.netkeiba\.com/horse/([0-9a-z]{10})";
/// 10-character horse token in a relative database path (result pages).
pub const HORSE_REL: &str = r"^/horse/([0-9a-z]{10})";
/// 10-character horse token in a pedigree-tree link.
pub const HORSE_PED: &str = r"^/horse/ped/([0-9a-z]{10})/";
/// 10-character horse token in the english-site link on the profile page.
pub const HORSE_EN: &str = r"^https://en\.netkeiba\.com/db/horse/([0-9a-z]{10})/";
/// 5-digit jockey token in an absolute recent-results link (shutuba pages).
pub const JOCKEY_ABS: &str = r"^https://db\.netkeiba\.com/jockey/result/recent/(\d{5})";
/// 5-digit jockey token in a relative recent-results path (result pages).
pub const JOCKEY_REL: &str = r"^/jockey/result/recent/(\d{5})";
/// 5-digit jockey token in the registration link on the jockey profile page.
pub const JOCKEY_DB: &str = r"^https://db\.netkeiba\.com/jockey/(\d{5})/";
/// 5-digit trainer token on the horse profile page.
pub const TRAINER_REL: &str = r"^/trainer/(\d{5})";
/// 6-digit owner token on the horse profile page.
pub const OWNER_REL: &str = r"^/owner/(\d{6})";
/// 6-digit breeder token on the horse profile page.
pub const BREEDER_REL: &str = r"^/breeder/(\d{6})";
/// 12-digit race token in a database race path.
pub const RACE_REL: &str = r"^/race/(\d{12})";
/// 12-digit race token in a listing-site query string.
pub const RACE_QUERY: &str = r"race_id=(\d{12})";

/// Extract the ID captured by `pattern` from a hyperlink target.
/// Returns `""` when the link does not match.
pub fn extract_id(href: &str, pattern: &str) -> String {
    let re = Regex::new(pattern).unwrap();
    re.captures(href)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horse_shapes_per_site() {
        assert_eq!(
            extract_id("https://db.netkeiba.com/horse/2022104617", HORSE_ABS),
            "2022104617"
        );
        assert_eq!(extract_id("/horse/2022104617/", HORSE_REL), "2022104617");
        assert_eq!(extract_id("/horse/ped/000a011234/", HORSE_PED), "000a011234");
        assert_eq!(
            extract_id("https://en.netkeiba.com/db/horse/2022104617/", HORSE_EN),
            "2022104617"
        );
        // Relative shape does not satisfy the absolute pattern.
        assert_eq!(extract_id("/horse/2022104617/", HORSE_ABS), "");
    }

    #[test]
    fn test_jockey_shapes_per_site() {
        assert_eq!(
            extract_id(
                "https://db.netkeiba.com/jockey/result/recent/01115/",
                JOCKEY_ABS
            ),
            "01115"
        );
        assert_eq!(extract_id("/jockey/result/recent/01115/", JOCKEY_REL), "01115");
        assert_eq!(
            extract_id("https://db.netkeiba.com/jockey/01115/", JOCKEY_DB),
            "01115"
        );
    }

    #[test]
    fn test_race_shapes() {
        assert_eq!(extract_id("/race/202509020611/", RACE_REL), "202509020611");
        assert_eq!(
            extract_id(
                "https://race.netkeiba.com/race/result.html?race_id=202509020611",
                RACE_QUERY
            ),
            "202509020611"
        );
        // A race-list link is not a race link.
        assert_eq!(extract_id("/race/list/20250413/", RACE_REL), "");
    }

    #[test]
    fn test_mismatch_degrades_to_empty() {
        assert_eq!(extract_id("", HORSE_ABS), "");
        assert_eq!(extract_id("#", JOCKEY_REL), "");
        assert_eq!(extract_id("/horse/short/", HORSE_REL), "");
        assert_eq!(extract_id("/trainer/01126/", TRAINER_REL), "01126");
        assert_eq!(extract_id("/owner/708800/", OWNER_REL), "708800");
        assert_eq!(extract_id("/breeder/737157/", BREEDER_REL), "737157");
    }
}
