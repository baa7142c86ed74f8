//! Lenient calendar date parsing for source entries

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Day-precision formats tried in order. Slash dates are month first.
const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%B %d %Y",
    "%d %B, %Y",
];

/// Four-digit years only; chrono's `%Y` also accepts short years.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Date-time formats whose date part is kept.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a source date into a calendar date
///
/// Accepts ISO dates (`1990-03-01`, `1990/03/01`), ISO date-times (time part
/// dropped), English month-name forms (`March 1, 1990`, `1 March 1990`) and
/// reduced precision (`1990-03`, `March 1990`, `1990`), which anchor to the
/// first day of the period. Numeric forms `08/07/2008`, `2008.08.07`,
/// `20080807` and `07-Aug-2008` are accepted too. Returns `None` when nothing
/// matches.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    // Reduced precision first: "August 2008" would otherwise satisfy
    // "%B %d %Y" as day 20 of year 8.
    if let Some(date) = parse_year_month(value)
        .or_else(|| parse_month_name_year(value))
        .or_else(|| parse_year(value))
    {
        return Some(date);
    }

    let full_year = |date: &NaiveDate| YEAR_RANGE.contains(&date.year());

    for format in DATE_FORMATS {
        if let Some(date) = NaiveDate::parse_from_str(value, format)
            .ok()
            .filter(full_year)
        {
            return Some(date);
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive()).filter(full_year);
    }
    DATETIME_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|datetime| datetime.date())
            .filter(full_year)
    })
}

/// Parse `YYYY-MM` (or `YYYY/MM`) as the first of that month.
fn parse_year_month(value: &str) -> Option<NaiveDate> {
    let normalized = value.replace('/', "-");
    let mut parts = normalized.split('-');
    let year = parse_year_token(parts.next()?)?;
    let month = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Parse `Month YYYY` as the first of that month.
fn parse_month_name_year(value: &str) -> Option<NaiveDate> {
    let mut tokens = value.split_whitespace();
    let month = month_token_to_number(&tokens.next()?.to_ascii_lowercase())?;
    let year = parse_year_token(tokens.next()?)?;
    if tokens.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Parse a bare four-digit year as 1 January.
fn parse_year(value: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(parse_year_token(value)?, 1, 1)
}

fn parse_year_token(token: &str) -> Option<i32> {
    if token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// Convert a lowercase month token to a month number (1-12).
fn month_token_to_number(token: &str) -> Option<u32> {
    let token = token.trim_end_matches(['.', ',']);
    match token {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}
