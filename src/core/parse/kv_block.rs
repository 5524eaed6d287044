//! Parser for flat `key: value` report blocks, meminfo style.

use super::{FlatRecord, ParseError, Value};

/// The kernel appends this unit token to most meminfo values. It is
/// stripped before coercion so sizes come out as plain kilobyte integers.
const KILOBYTE_SUFFIX: &str = " kB";

/// Parses a block where every non-empty line is `<key>:<ws><value>`.
///
/// Keys are lower-cased and trimmed. Values lose one trailing `" kB"` unit
/// token, then go through integer coercion; anything non-numeric stays as
/// trimmed text. A later duplicate key overwrites the earlier entry.
///
/// The block is assumed homogeneous: a non-empty line without a colon is a
/// format error and aborts the parse with no partial result. Empty input
/// yields an empty record.
pub fn parse(report: &str) -> Result<FlatRecord, ParseError> {
    let mut record = FlatRecord::new();

    for (idx, line) in report.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| ParseError::MissingSeparator {
            line_no: idx + 1,
            line: line.to_string(),
        })?;

        let value = value.trim();
        let value = value.strip_suffix(KILOBYTE_SUFFIX).unwrap_or(value);

        record.insert(key.trim().to_lowercase(), Value::coerce(value));
    }

    Ok(record)
}
