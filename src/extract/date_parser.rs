use chrono::{Datelike, NaiveDate};

const MONTHS: [(&str, u32); 12] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

// Formats the shape rules above do not cover; stands in for a generic
// locale parser. Covers the hyphenated and ISO scan patterns.
const FALLBACK_FORMATS: [&str; 4] = ["%m-%d-%Y", "%Y-%m-%d", "%B %d, %Y", "%B %d %Y"];

/// Parses a date substring into a calendar date.
///
/// Shape rules are tried in priority order, most specific first:
/// 1. `MM/DD/YYYY` — four-digit year taken literally.
/// 2. `MM/DD/YY` — year read as `2000 + YY`.
/// 3. `Month DD, YYYY` — full or abbreviated month name, optional ordinal
///    suffix on the day.
/// 4. `Month DD` — year defaults to `today`'s year.
/// 5. Fallback format list.
///
/// The first rule whose shape matches decides the outcome; a shape match
/// with bad numbers (e.g. `2/30/2024`) is an error, not a fall-through.
/// Callers treat `Err` as "skip this match".
pub fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty date string".to_string());
    }

    if let Some(result) = parse_slash_numeric(trimmed) {
        return result;
    }
    if let Some(result) = parse_named_month(trimmed, today) {
        return result;
    }
    parse_fallback(trimmed)
}

fn parse_slash_numeric(text: &str) -> Option<Result<NaiveDate, String>> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    if !parts
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    Some(build_slash_date(&parts))
}

fn build_slash_date(parts: &[&str]) -> Result<NaiveDate, String> {
    let month: u32 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid month: {}", parts[0]))?;
    let day: u32 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid day: {}", parts[1]))?;
    let year_raw = parts[2];
    let year: i32 = year_raw
        .parse()
        .map_err(|_| format!("Invalid year: {}", year_raw))?;
    let year = match year_raw.len() {
        4 => year,
        2 => 2000 + year,
        _ => return Err(format!("Unrecognized year digits: {}", year_raw)),
    };
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("Invalid calendar date: {}/{}/{}", month, day, year))
}

fn parse_named_month(text: &str, today: NaiveDate) -> Option<Result<NaiveDate, String>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 2 && tokens.len() != 3 {
        return None;
    }
    let month = month_number(tokens[0])?;
    let day_token = strip_ordinal(tokens[1].trim_end_matches(','));
    if day_token.is_empty() || !day_token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(build_named_month_date(
        month,
        day_token,
        tokens.get(2).copied(),
        today,
    ))
}

fn build_named_month_date(
    month: u32,
    day_token: &str,
    year_token: Option<&str>,
    today: NaiveDate,
) -> Result<NaiveDate, String> {
    let day: u32 = day_token
        .parse()
        .map_err(|_| format!("Invalid day: {}", day_token))?;
    let year: i32 = match year_token {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("Invalid year: {}", raw))?,
        None => today.year(),
    };
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("Invalid calendar date: {} {} {}", month, day, year))
}

// Accepts full names and prefixes of three letters or more ("Mar", "Sept"),
// with an optional trailing period on the abbreviation.
fn month_number(token: &str) -> Option<u32> {
    let lower = token.trim_end_matches('.').to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .find(|(name, _)| name.starts_with(&lower))
        .map(|(_, number)| *number)
}

fn strip_ordinal(day: &str) -> &str {
    if !day.is_ascii() || day.len() <= 2 {
        return day;
    }
    let (head, tail) = day.split_at(day.len() - 2);
    if matches!(tail.to_ascii_lowercase().as_str(), "st" | "nd" | "rd" | "th")
        && head.chars().all(|c| c.is_ascii_digit())
    {
        return head;
    }
    day
}

fn parse_fallback(text: &str) -> Result<NaiveDate, String> {
    for format in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    Err(format!("Unrecognized date: {}", text))
}
