//! Positional field extraction over a parsed document.
//!
//! Locators are ordered paths of [`Step`]s walked child-by-child from a
//! root element, one DOM level per step. A step can constrain the element
//! name, a class or id, and the 1-based position among the parent's
//! element children (nth-child semantics). A path that matches nothing is
//! an absence, not an error: text falls back to `""` and numeric fields
//! to a sentinel.

use scraper::ElementRef;

/// Sentinel for integer fields whose cell is absent or non-numeric.
pub const INT_SENTINEL: i32 = -1;
/// Sentinel for float fields whose cell is absent or non-numeric.
pub const FLOAT_SENTINEL: f64 = -1.0;

/// Class or id constraint on a step.
#[derive(Debug, Clone, Copy)]
pub enum Marker {
    Class(&'static str),
    Id(&'static str),
}

/// One level of a locator path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Step {
    tag: Option<&'static str>,
    marker: Option<Marker>,
    nth: Option<usize>,
}

impl Step {
    /// Constrain the element name, e.g. `Step::tag("td")`.
    pub fn tag(name: &'static str) -> Self {
        Self {
            tag: Some(name),
            ..Default::default()
        }
    }

    /// Constrain the 1-based position among the parent's element children.
    /// The addressed child must also satisfy the tag/marker constraints,
    /// as with CSS `:nth-child`.
    pub fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    pub fn class(mut self, name: &'static str) -> Self {
        self.marker = Some(Marker::Class(name));
        self
    }

    pub fn id(mut self, name: &'static str) -> Self {
        self.marker = Some(Marker::Id(name));
        self
    }

    fn matches(&self, el: &ElementRef) -> bool {
        if let Some(tag) = self.tag {
            if el.value().name() != tag {
                return false;
            }
        }
        match self.marker {
            Some(Marker::Class(name)) => el.value().classes().any(|c| c == name),
            Some(Marker::Id(name)) => el.value().id() == Some(name),
            None => true,
        }
    }
}

/// Walk `path` from `root`, one step per level. Returns the element the
/// final step lands on, or `None` as the absence signal.
pub fn locate<'a>(root: ElementRef<'a>, path: &[Step]) -> Option<ElementRef<'a>> {
    let mut current = root;
    for step in path {
        current = match step.nth {
            Some(n) => {
                let child = current
                    .children()
                    .filter_map(ElementRef::wrap)
                    .nth(n.checked_sub(1)?)?;
                if !step.matches(&child) {
                    return None;
                }
                child
            }
            None => current
                .children()
                .filter_map(ElementRef::wrap)
                .find(|child| step.matches(child))?,
        };
    }
    Some(current)
}

/// First descendant of `root` matching `step`, in document order. Used
/// for nodes nested at varying depths, such as an anchor wrapped in
/// layout divs inside a cell.
pub fn first_within<'a>(root: ElementRef<'a>, step: Step) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| step.matches(el))
}

/// Concatenated text of the node at `path`, or `""` when absent. Not
/// trimmed; whether padding is stripped is a per-field decision.
pub fn text_at(root: ElementRef, path: &[Step]) -> String {
    locate(root, path)
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}

/// Trimmed variant of [`text_at`] for fields that carry incidental
/// padding, such as weights and names.
pub fn trimmed_text_at(root: ElementRef, path: &[Step]) -> String {
    text_at(root, path).trim().to_string()
}

/// Attribute of the node at `path`, or `""` when the node or the
/// attribute is absent.
pub fn attr_at(root: ElementRef, path: &[Step], name: &str) -> String {
    locate(root, path)
        .and_then(|el| el.value().attr(name))
        .unwrap_or_default()
        .to_string()
}

/// Integer coercion for fields declared numeric. Absence and parse
/// failure both collapse to [`INT_SENTINEL`].
pub fn int_at(root: ElementRef, path: &[Step]) -> i32 {
    text_at(root, path).trim().parse().unwrap_or(INT_SENTINEL)
}

/// Float coercion for fields declared numeric. Absence and parse
/// failure both collapse to [`FLOAT_SENTINEL`].
pub fn float_at(root: ElementRef, path: &[Step]) -> f64 {
    text_at(root, path).trim().parse().unwrap_or(FLOAT_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const SAMPLE_HTML: &str = r#"<html><body>
<table id="grid">
  <tbody>
    <tr><td>a</td><td> 1 </td><td><div class="wrap"><a href="/x/1">link</a></div></td></tr>
    <tr><td>b</td><td>2.5</td><td>plain</td></tr>
  </tbody>
</table>
</body></html>"#;

    fn doc() -> Html {
        Html::parse_document(SAMPLE_HTML)
    }

    #[test]
    fn test_locate_by_nth_child() {
        let doc = doc();
        let root = doc.root_element();
        let table = first_within(root, Step::tag("table").id("grid")).unwrap();
        let path = [
            Step::tag("tbody"),
            Step::tag("tr").nth(2),
            Step::tag("td").nth(1),
        ];
        assert_eq!(text_at(table, &path), "b");
    }

    #[test]
    fn test_nth_child_wrong_tag_is_absent() {
        let doc = doc();
        let root = doc.root_element();
        let table = first_within(root, Step::tag("table")).unwrap();
        // The first element child of tbody is a tr, not a td.
        let path = [Step::tag("tbody"), Step::tag("td").nth(1)];
        assert!(locate(table, &path).is_none());
        assert_eq!(text_at(table, &path), "");
    }

    #[test]
    fn test_missing_path_yields_defaults() {
        let doc = doc();
        let root = doc.root_element();
        let path = [Step::tag("table"), Step::tag("tbody"), Step::tag("tr").nth(9)];
        assert_eq!(text_at(root, &path), "");
        assert_eq!(attr_at(root, &path, "href"), "");
        assert_eq!(int_at(root, &path), INT_SENTINEL);
        assert_eq!(float_at(root, &path), FLOAT_SENTINEL);
    }

    #[test]
    fn test_first_within_finds_nested_anchor() {
        let doc = doc();
        let root = doc.root_element();
        let table = first_within(root, Step::tag("table")).unwrap();
        let cell = locate(
            table,
            &[Step::tag("tbody"), Step::tag("tr").nth(1), Step::tag("td").nth(3)],
        )
        .unwrap();
        let link = first_within(cell, Step::tag("a")).unwrap();
        assert_eq!(link.text().collect::<String>(), "link");
        assert_eq!(link.value().attr("href"), Some("/x/1"));
    }

    #[test]
    fn test_numeric_coercion() {
        let doc = doc();
        let root = doc.root_element();
        let table = first_within(root, Step::tag("table")).unwrap();
        let row1 = [Step::tag("tbody"), Step::tag("tr").nth(1), Step::tag("td").nth(2)];
        let row2 = [Step::tag("tbody"), Step::tag("tr").nth(2), Step::tag("td").nth(2)];
        // " 1 " is trimmed before coercion.
        assert_eq!(int_at(table, &row1), 1);
        assert_eq!(float_at(table, &row2), 2.5);
        // "plain" is not numeric.
        let text_cell = [Step::tag("tbody"), Step::tag("tr").nth(2), Step::tag("td").nth(3)];
        assert_eq!(int_at(table, &text_cell), INT_SENTINEL);
    }

    #[test]
    fn test_trimmed_vs_raw_text() {
        let doc = doc();
        let root = doc.root_element();
        let table = first_within(root, Step::tag("table")).unwrap();
        let path = [Step::tag("tbody"), Step::tag("tr").nth(1), Step::tag("td").nth(2)];
        assert_eq!(text_at(table, &path), " 1 ");
        assert_eq!(trimmed_text_at(table, &path), "1");
    }
}
