//! Parser for single-line device reports, lspci style.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One device entry decomposed from a bus-listing line.
///
/// Serialized field names match the report vocabulary (`type`, `rev`)
/// rather than the Rust-side identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceReportLine {
    /// Bus address, e.g. `00:02.0`.
    pub id: String,
    /// Device class text, e.g. `VGA compatible controller`.
    #[serde(rename = "type")]
    pub device_type: String,
    /// Vendor and model text.
    pub name: String,
    /// Revision from the trailing parenthesized group; empty when the
    /// group is empty.
    #[serde(rename = "rev")]
    pub revision: String,
}

/// Shape of a matching line: `<id> <type>: <name> (<rev>)`. The id and
/// type spans are non-greedy up to their delimiters, the name runs to the
/// trailing parenthesized group, and an optional `rev ` token inside that
/// group is dropped so the capture is the bare revision.
static DEVICE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?) (.+?): (.+) \((?:rev )?([^)]*)\)$").expect("device line pattern"));

/// Extracts one record per matching line, in source order.
///
/// Blank lines, continuation lines, and anything else that does not fit the
/// fixed shape are skipped silently; a missing or failing listing command is
/// the caller's concern. Empty input yields an empty sequence.
pub fn parse(report: &str) -> Vec<DeviceReportLine> {
    report
        .lines()
        .filter_map(|line| {
            DEVICE_LINE.captures(line).map(|caps| DeviceReportLine {
                id: caps[1].to_string(),
                device_type: caps[2].to_string(),
                name: caps[3].to_string(),
                revision: caps[4].to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_a_typical_controller_line() {
        let devices =
            parse("00:02.0 VGA compatible controller: Intel Corporation Device (rev 04)");

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "00:02.0");
        assert_eq!(devices[0].device_type, "VGA compatible controller");
        assert_eq!(devices[0].name, "Intel Corporation Device");
        assert_eq!(devices[0].revision, "04");
    }

    #[test]
    fn preserves_source_line_order() {
        let report = "\
00:00.0 Host bridge: Intel Corporation Root Complex (rev 01)
00:02.0 VGA compatible controller: Intel Corporation HD Graphics (rev 09)
";
        let devices = parse(report);

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id, "00:00.0");
        assert_eq!(devices[1].id, "00:02.0");
    }

    #[test]
    fn skips_blank_and_continuation_lines() {
        let report = "\
00:1f.3 Audio device: Intel Corporation Audio Controller (rev 11)

\tSubsystem: Dell Audio Controller
some free-form note without the shape
";
        let devices = parse(report);
        assert_eq!(devices.len(), 1);
    }

    #[test]
    fn empty_revision_group_is_allowed() {
        let devices = parse("02:00.0 Network controller: Example Wireless Adapter ()");
        assert_eq!(devices[0].revision, "");
    }

    #[test]
    fn revision_without_rev_token_keeps_group_contents() {
        let devices = parse("03:00.0 SATA controller: Example AHCI (prog-if 01)");
        assert_eq!(devices[0].revision, "prog-if 01");
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn serializes_with_report_vocabulary_keys() {
        let devices = parse("00:02.0 VGA compatible controller: Intel Corporation Device (rev 04)");
        let json = serde_json::to_value(&devices[0]).unwrap();

        assert_eq!(json["type"], "VGA compatible controller");
        assert_eq!(json["rev"], "04");
    }
}
