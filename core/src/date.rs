//! Day/month/year parsing and the fixed display formats.
//!
//! Statement dates arrive as free text and are always read day-first.
//! Anything that does not parse is treated as absent, never as an error.

use crate::error::{ReportError, ReportResult};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Accepted day-first layouts when no config is supplied.
pub const DEFAULT_DMY_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

pub const STATEMENT_DATE_DISPLAY: &str = "%d/%m/%Y";
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Parse `text` day-first against each format in turn.
/// A trailing time of day ("25/03/2024 00:00:00") is accepted and dropped.
pub fn parse_dmy<S: AsRef<str>>(text: &str, formats: &[S]) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    formats.iter().find_map(|fmt| {
        let fmt = fmt.as_ref();
        NaiveDate::parse_from_str(text, fmt).ok().or_else(|| {
            NaiveDateTime::parse_from_str(text, &format!("{fmt} %H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
    })
}

/// Parse a caller-supplied cutoff. Unlike statement dates, a bad cutoff is
/// the caller's mistake and is reported.
pub fn parse_cutoff(input: &str) -> ReportResult<NaiveDate> {
    parse_dmy(input, DEFAULT_DMY_FORMATS).ok_or_else(|| ReportError::InvalidCutoff {
        input: input.to_string(),
    })
}

/// `today` minus `lookback_days`.
pub fn default_cutoff(today: NaiveDate, lookback_days: i64) -> NaiveDate {
    today - Duration::days(lookback_days)
}

/// ISO `yyyy-mm-dd`, as stored in the snapshot tables.
pub fn parse_iso(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, ISO_DATE)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

pub fn display_statement_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(STATEMENT_DATE_DISPLAY).to_string())
        .unwrap_or_default()
}

pub fn display_iso(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(ISO_DATE).to_string()).unwrap_or_default()
}
