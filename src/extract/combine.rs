use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::date_parser::parse_date;

/// Merges a date substring and a time-of-day substring into one instant.
/// Seconds are always zero. Fails when either side fails to parse.
pub fn combine_date_time(
    date_raw: &str,
    time_raw: &str,
    today: NaiveDate,
) -> Result<NaiveDateTime, String> {
    let date = parse_date(date_raw, today)?;
    let time = parse_clock_time(time_raw)?;
    Ok(date.and_time(time))
}

fn parse_clock_time(raw: &str) -> Result<NaiveTime, String> {
    let lower = raw.trim().to_lowercase();
    let is_pm = lower.contains("pm");
    let is_am = lower.contains("am");

    let digits = lower.replace("pm", "").replace("am", "");
    let digits = digits.trim();
    let (hour_raw, minute_raw) = match digits.split_once(':') {
        Some((hour, minute)) => (hour.trim(), minute.trim()),
        None => (digits, "0"),
    };

    let mut hour: u32 = hour_raw
        .parse()
        .map_err(|_| format!("Invalid hour in time: {}", raw))?;
    let minute: u32 = minute_raw
        .parse()
        .map_err(|_| format!("Invalid minute in time: {}", raw))?;

    if is_pm && hour < 12 {
        hour += 12;
    }
    if is_am && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("Invalid clock time: {}", raw))
}
