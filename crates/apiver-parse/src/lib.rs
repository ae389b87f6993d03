//! Parsers for textual API version identifiers.
//!
//! Two independent surface syntaxes feed [`ApiVersion`] values:
//!
//! - the delimited form used in headers, query parameters, and URL
//!   segments: `[<yyyy-MM-dd>[.<major>[.<minor>]]][-<status>]` or
//!   `<major>[.<minor>][-<status>]` ([`parse`], [`try_parse`]);
//! - the namespace form used in hierarchical module paths:
//!   `v2018_04_01_1_1_Beta`, `v1_1`, `v20180401`
//!   ([`parse_namespace`], [`try_parse_segment`]).
//!
//! Scanning borrows from the input throughout; the only allocations are
//! the final status string and error payloads.

use apiver_core::{ApiVersion, VersionError};
use chrono::NaiveDate;

/// Parse the delimited form, reporting the first violation encountered.
///
/// ```
/// use apiver_parse::parse;
///
/// let v = parse("2017-01-01.1.5-RC").unwrap();
/// assert_eq!(v.major(), Some(1));
/// assert_eq!(v.status(), Some("RC"));
/// ```
pub fn parse(text: &str) -> Result<ApiVersion, VersionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(VersionError::Malformed(text.to_owned()));
    }
    if text.len() >= 10 && text.is_char_boundary(10) {
        let head = &text[..10];
        if is_date_shaped(head) {
            let group = parse_group_date(head)?;
            return parse_after_group(group, &text[10..], text);
        }
    }
    parse_numeric(None, text)
}

/// Non-throwing variant of [`parse`]: malformed input becomes `None` and
/// the specific error kind is discarded.
pub fn try_parse(text: &str) -> Option<ApiVersion> {
    parse(text).ok()
}

/// Walk a dotted namespace path and collect every version-bearing segment.
///
/// A namespace may encode a version at more than one level; all hits are
/// returned in path order. Segments that are not version-shaped are
/// silently skipped.
pub fn parse_namespace(path: &str) -> Vec<ApiVersion> {
    parse_segments(path.split('.'))
}

/// As [`parse_namespace`], for callers that already hold path segments.
pub fn parse_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Vec<ApiVersion> {
    segments.into_iter().filter_map(try_parse_segment).collect()
}

/// Parse one namespace segment.
///
/// The segment must start with `v` or `V`; the remainder is an optional
/// compact (`yyyyMMdd`) or readable (`yyyy_MM_dd`) date, then optional
/// `_`-delimited major and minor numbers, then any trailing text as the
/// status. A segment that resolves to neither a group nor a major number
/// is not a version segment and yields `None`.
pub fn try_parse_segment(segment: &str) -> Option<ApiVersion> {
    let rest = segment.strip_prefix(['v', 'V'])?;
    let (group, rest) = take_group(rest)?;
    let (major, rest) = take_number(rest, group.is_some());
    let (minor, rest) = if major.is_some() {
        take_number(rest, true)
    } else {
        (None, rest)
    };
    if group.is_none() && major.is_none() {
        return None;
    }
    let status = rest.strip_prefix('_').unwrap_or(rest);
    let status = (!status.is_empty()).then_some(status);
    ApiVersion::try_new(group, major, minor, status).ok()
}

fn parse_after_group(
    group: NaiveDate,
    rest: &str,
    original: &str,
) -> Result<ApiVersion, VersionError> {
    if rest.is_empty() {
        return ApiVersion::try_new(Some(group), None, None, None);
    }
    if let Some(numeric) = rest.strip_prefix('.') {
        return parse_numeric(Some(group), numeric);
    }
    if let Some(status) = rest.strip_prefix('-') {
        return ApiVersion::try_new(Some(group), None, None, Some(status));
    }
    Err(VersionError::Malformed(original.to_owned()))
}

/// `<major>[.<minor>][-<status>]`, with an optional already-consumed group.
fn parse_numeric(group: Option<NaiveDate>, text: &str) -> Result<ApiVersion, VersionError> {
    let (numbers, status) = match text.split_once('-') {
        Some((numbers, status)) => (numbers, Some(status)),
        None => (text, None),
    };
    let (major, minor) = match numbers.split_once('.') {
        Some((major, minor)) => (parse_number(major)?, Some(parse_number(minor)?)),
        None => (parse_number(numbers)?, None),
    };
    ApiVersion::try_new(group, Some(major), minor, status)
}

/// A non-negative decimal integer; anything else is malformed.
fn parse_number(text: &str) -> Result<u64, VersionError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::Malformed(text.to_owned()));
    }
    text.parse()
        .map_err(|_| VersionError::Malformed(text.to_owned()))
}

/// `dddd-dd-dd`, whether or not it is a real calendar date.
fn is_date_shaped(text: &str) -> bool {
    let b = text.as_bytes();
    b.len() == 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// A date-shaped slice either parses as a calendar date or is reported
/// with the specific malformed-date error, never the generic one.
fn parse_group_date(head: &str) -> Result<NaiveDate, VersionError> {
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|_| VersionError::MalformedGroupDate(head.to_owned()))
}

/// Leading group date of a namespace segment, if any.
///
/// Returns `None` for the whole segment when the remainder is date-shaped
/// in the readable form but not a valid calendar date ("v2018_13_01_…" is
/// not a version segment, not a major of 2018).
fn take_group(rest: &str) -> Option<(Option<NaiveDate>, &str)> {
    let b = rest.as_bytes();

    // Readable form: yyyy_MM_dd
    if b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'_'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'_'
        && b[8..10].iter().all(u8::is_ascii_digit)
    {
        let date = readable_date(&rest[..10])?;
        return Some((Some(date), &rest[10..]));
    }

    // Compact form: exactly eight digits that form a valid date. A digit
    // run of any other length (or an invalid date) is a version number.
    let digits = b.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 8
        && let Some(date) = compact_date(&rest[..8])
    {
        return Some((Some(date), &rest[8..]));
    }

    Some((None, rest))
}

fn readable_date(text: &str) -> Option<NaiveDate> {
    let year: i32 = text[..4].parse().ok()?;
    let month: u32 = text[5..7].parse().ok()?;
    let day: u32 = text[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn compact_date(text: &str) -> Option<NaiveDate> {
    let year: i32 = text[..4].parse().ok()?;
    let month: u32 = text[4..6].parse().ok()?;
    let day: u32 = text[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// An optional `_`-delimited (or leading, when `need_sep` is false)
/// decimal number. On no match the input is handed back untouched.
fn take_number(rest: &str, need_sep: bool) -> (Option<u64>, &str) {
    let body = if need_sep {
        match rest.strip_prefix('_') {
            Some(body) => body,
            None => return (None, rest),
        }
    } else {
        rest
    };
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return (None, rest);
    }
    match body[..digits].parse() {
        Ok(number) => (Some(number), &body[digits..]),
        Err(_) => (None, rest),
    }
}
