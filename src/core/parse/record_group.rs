//! Grouper for repeated key-sequence blocks, cpuinfo style.
//!
//! `/proc/cpuinfo` is one flat stream of `key : value` lines in which the
//! same ordered key sequence repeats once per logical core, with a blank
//! line between repetitions. The caller counts the repetitions up front by
//! counting a sentinel key (the per-core `processor` field) and the grouper
//! splits the stream into exactly that many records.

use super::{FlatRecord, Value};

/// Splits a flat repeated-record block into `expected` ordered records.
///
/// Tabs are stripped from each line before splitting. A blank line marks a
/// record boundary and advances the fill cursor; consecutive blanks advance
/// it more than once. Lines past the last expected boundary are dropped and
/// records that never receive a pair stay empty, so the result always has
/// exactly `expected` entries with index order matching source order.
///
/// Keys are lower-cased and left-trimmed; values go through integer
/// coercion. A key line with no separator or no value yields empty text. A
/// duplicate key inside one record's span overwrites that record's entry
/// without disturbing later boundary detection.
///
/// Malformed input never errors; it degrades into a structurally valid but
/// possibly mis-grouped result, and strictness is left to callers.
pub fn group(report: &str, expected: usize) -> Vec<FlatRecord> {
    let mut records = vec![FlatRecord::new(); expected];
    let mut cursor = 0usize;

    for raw in report.lines() {
        let line = raw.replace('\t', "");

        if line.trim().is_empty() {
            cursor += 1;
            continue;
        }
        if cursor >= expected {
            break;
        }

        let (key, value) = match line.split_once(':') {
            Some((key, value)) => (key, value),
            None => (line.as_str(), ""),
        };

        records[cursor].insert(key.to_lowercase().trim_start().to_string(), Value::coerce(value));
    }

    records
}
