//! Canonicalization of caller-supplied passage references.
//!
//! The upstream API expects hyphenated verse ranges (`3:16-18`) and single
//! spaces between tokens; callers paste references with en/em dashes and
//! arbitrary whitespace.

/// Normalizes a free-form passage reference into the canonical upstream form.
///
/// Absent input is coerced to an empty string, surrounding whitespace is
/// trimmed, en-dash and em-dash become plain hyphens, and internal whitespace
/// runs collapse to a single space. Never fails; an empty result means the
/// caller supplied nothing usable.
pub fn normalize(raw: Option<&str>) -> String {
    let collapsed = raw
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed.replace(['\u{2013}', '\u{2014}'], "-")
}
