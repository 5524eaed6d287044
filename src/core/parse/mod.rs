//! Text-report parsing primitives shared by the collectors.
//!
//! Every parser in this module is a pure function over the complete report
//! text: it takes a `&str`, returns a fresh structure, holds no state
//! between calls, and is safe to invoke concurrently. Obtaining the text
//! (opening a pseudo-file, capturing a command's stdout) is the collectors'
//! job, not this module's.
//!
//! The four parsers:
//!
//! * [`kv_block`] turns a homogeneous `key: value` block (meminfo style)
//!   into a single record, lower-casing keys and coercing numeric values.
//! * [`record_group`] splits a flat block of repeated key sequences
//!   (cpuinfo style) into one record per logical core.
//! * [`line_report`] extracts one device record per matching line from a
//!   bus listing (lspci style).
//! * [`nested_report`] builds a hierarchical report from indentation-
//!   sensitive display-server output (xdpyinfo style).

use std::collections::BTreeMap;

use thiserror::Error;

pub mod kv_block;
pub mod line_report;
pub mod nested_report;
pub mod record_group;
pub mod value;

pub use line_report::DeviceReportLine;
pub use nested_report::NestedReport;
pub use value::Value;

/// A single-level mapping from field name to scalar value.
///
/// Keys are unique within one record. Ordering of records within a sequence
/// carries meaning (core index, device order); ordering of keys within a
/// record does not.
pub type FlatRecord = BTreeMap<String, Value>;

/// Errors raised by parsers that require a fixed line shape.
///
/// Only the key/value block parser can fail: it assumes a homogeneous
/// report, so a malformed line invalidates the whole parse with no partial
/// result. The other parsers skip lines they do not recognize.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A non-empty line carried no `:` separator where one was required.
    #[error("line {line_no} has no key/value separator: {line:?}")]
    MissingSeparator { line_no: usize, line: String },
}
