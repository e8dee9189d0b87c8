//! Stop name normalization.
//!
//! Catalog names carry disambiguating suffixes like `Princes St (Stop IK)`.
//! The base name (`Princes St`) groups the stops on either side of the road;
//! the bracketed code (`IK`) says which side a stop is on.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::StopCode;

/// First `(` up to the first `)` after it.
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

/// `Stop <CODE>)` inside a bracketed suffix.
static BRACKETED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Stop\s+([A-Z]+)\)").expect("stop code pattern is valid"));

/// Strip parenthetical segments from a stop name.
///
/// Every `(...)` group is removed in a single left-to-right pass, each
/// running from a `(` to the first `)` after it. An unterminated `(` cuts the
/// rest of the name; a stray `)` is dropped. The result is trimmed and never
/// contains a parenthesis.
///
/// # Examples
///
/// ```
/// use stop_resolver::resolve::base_name;
///
/// assert_eq!(base_name("Princes St (Stop IK)"), "Princes St");
/// assert_eq!(base_name("  Leith Walk "), "Leith Walk");
/// ```
pub fn base_name(raw_name: &str) -> String {
    let stripped = PARENTHETICAL.replace_all(raw_name, "");

    let head = match stripped.find('(') {
        Some(open) => &stripped[..open],
        None => &stripped[..],
    };

    head.replace(')', "").trim().to_string()
}

/// Extract the bracketed stop code from a raw name, if any.
///
/// Only codes that form a valid [`StopCode`] are returned; whether the code
/// maps to a direction is up to the caller.
pub fn stop_code(raw_name: &str) -> Option<StopCode> {
    BRACKETED_CODE
        .captures(raw_name)
        .and_then(|caps| caps.get(1))
        .and_then(|code| StopCode::parse(code.as_str()).ok())
}
