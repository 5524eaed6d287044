//! Parser for indentation-sensitive display-server reports, xdpyinfo style.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{FlatRecord, Value};

/// A hierarchical report: top-level scalars plus one ordered sequence of
/// per-screen records under the distinguished `screens` key. The key is
/// absent until a screen marker has been seen, so an empty report
/// serializes as an empty mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NestedReport {
    #[serde(flatten)]
    pub fields: FlatRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screens: Option<Vec<FlatRecord>>,
}

/// `screen #<digits>` at the start of a line introduces a screen block.
static SCREEN_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^screen #(\d+)").expect("screen marker pattern"));

/// Generic `key:<ws>value` line with a non-space first character.
static TOP_LEVEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S.+):\s+(.+)$").expect("top-level pattern"));

/// `key:<ws>value` indented by exactly two spaces: a field of the current
/// screen block. Deeper-indented lines fail the word-character anchor and
/// are skipped.
static SCREEN_DETAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{2}(\w+.*):\s+(.*)$").expect("screen detail pattern"));

/// Parses a display-server report into a [`NestedReport`].
///
/// Lines are classified in order: screen marker, indented screen detail,
/// generic top-level `key: value`. Anything matching none of the three is
/// skipped, so empty or truncated input deterministically yields an empty
/// report.
///
/// Two behaviors are deliberate and pinned by tests:
///
/// * A marker line that incidentally also fits the top-level shape (text
///   after the colon) produces the top-level entry too, matching the
///   long-observed report semantics.
/// * Screen records are placed at the position of the PARSED numeric id,
///   padding with empty records as needed, so sparse or out-of-order ids
///   produce padded sequences instead of silently re-indexing.
///
/// The `screens` list is initialized once, on the first marker; a detail
/// line seen before any marker has no screen to attach to and is skipped.
pub fn parse(report: &str) -> NestedReport {
    let mut out = NestedReport::default();
    let mut current_screen: Option<usize> = None;

    for line in report.lines() {
        if let Some(caps) = SCREEN_MARKER.captures(line) {
            if let Ok(index) = caps[1].parse::<usize>() {
                current_screen = Some(index);
                out.screens.get_or_insert_with(Vec::new);
            }
            // The marker does not shadow the generic shape.
            if let Some(kv) = TOP_LEVEL.captures(line) {
                out.fields.insert(kv[1].to_string(), Value::coerce(&kv[2]));
            }
            continue;
        }

        if let Some(caps) = SCREEN_DETAIL.captures(line) {
            if let Some(index) = current_screen {
                let screens = out.screens.get_or_insert_with(Vec::new);
                while screens.len() <= index {
                    screens.push(FlatRecord::new());
                }
                screens[index].insert(caps[1].to_string(), Value::coerce(&caps[2]));
            }
            continue;
        }

        if let Some(caps) = TOP_LEVEL.captures(line) {
            out.fields.insert(caps[1].to_string(), Value::coerce(&caps[2]));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_top_level_fields_and_screen_records() {
        let report = "\
name of display:    :0
screen #0:
  dimensions:    1920x1080 pixels (508x285 millimeters)
  depth of root window:    24
";
        let parsed = parse(report);

        assert_eq!(
            parsed.fields["name of display"],
            Value::Text(":0".to_string())
        );
        let screens = parsed.screens.as_ref().unwrap();
        assert_eq!(screens.len(), 1);
        assert_eq!(
            screens[0]["dimensions"],
            Value::Text("1920x1080 pixels (508x285 millimeters)".to_string())
        );
        assert_eq!(screens[0]["depth of root window"], Value::Integer(24));
    }

    #[test]
    fn minimal_sample_shape() {
        let report = "name of display: :0\nscreen #0:\n  dimensions:  1920x1080 pixels\n";
        let parsed = parse(report);

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["name of display"], ":0");
        assert_eq!(json["screens"][0]["dimensions"], "1920x1080 pixels");
    }

    #[test]
    fn numeric_top_level_values_coerce_to_integers() {
        let parsed = parse("default screen number:    0\nnumber of screens:    2\n");

        assert_eq!(parsed.fields["default screen number"], Value::Integer(0));
        assert_eq!(parsed.fields["number of screens"], Value::Integer(2));
    }

    #[test]
    fn marker_line_with_trailing_text_also_sets_top_level_entry() {
        let parsed = parse("screen #0: primary\n  depth:  24\n");

        // The marker still opens the screen block, and the generic shape
        // fires on the same line.
        assert_eq!(parsed.fields["screen #0"], Value::Text("primary".to_string()));
        assert_eq!(parsed.screens.as_ref().unwrap()[0]["depth"], Value::Integer(24));
    }

    #[test]
    fn bare_marker_does_not_create_top_level_entry() {
        let parsed = parse("screen #0:\n");
        assert!(parsed.fields.is_empty());
        assert_eq!(parsed.screens.as_ref().unwrap().len(), 0);
    }

    #[test]
    fn sparse_screen_ids_pad_with_empty_records() {
        let report = "screen #2:\n  depth:  24\n";
        let parsed = parse(report);

        let screens = parsed.screens.as_ref().unwrap();
        assert_eq!(screens.len(), 3);
        assert!(screens[0].is_empty());
        assert!(screens[1].is_empty());
        assert_eq!(screens[2]["depth"], Value::Integer(24));
    }

    #[test]
    fn second_marker_keeps_earlier_screens() {
        let report = "\
screen #0:
  depth:  24
screen #1:
  depth:  30
";
        let parsed = parse(report);
        let screens = parsed.screens.as_ref().unwrap();

        assert_eq!(screens.len(), 2);
        assert_eq!(screens[0]["depth"], Value::Integer(24));
        assert_eq!(screens[1]["depth"], Value::Integer(30));
    }

    #[test]
    fn detail_before_any_marker_is_skipped() {
        let parsed = parse("  dimensions:  800x600 pixels\n");
        assert!(parsed.fields.is_empty());
        assert!(parsed.screens.is_none());
    }

    #[test]
    fn deeper_indentation_is_skipped() {
        let report = "screen #0:\n    visual id:    0x21\n";
        let parsed = parse(report);
        assert_eq!(parsed.screens.as_ref().unwrap().len(), 0);
    }

    #[test]
    fn empty_input_is_an_empty_report() {
        let parsed = parse("");
        assert!(parsed.fields.is_empty());
        assert!(parsed.screens.is_none());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "{}");
    }

    #[test]
    fn parse_is_idempotent() {
        let report = "name of display: :0\nscreen #0:\n  depth:  24\n";
        assert_eq!(parse(report), parse(report));
    }
}
