use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::candidate::CandidateEvent;

use super::combine::combine_date_time;
use super::date_parser::parse_date;

// How far around a date match we look for a time-of-day mention.
const CONTEXT_RADIUS: usize = 100;
// How much trailing text feeds the event description.
const DESCRIPTION_LIMIT: usize = 150;

const MONTH_NAMES: &str = "January|February|March|April|May|June|July|August|September|October|\
                           November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";

/// One date shape the scanner recognizes: a matcher plus an optional suffix
/// that hands the match over to a more specific rule. New shapes are added
/// here, not in the scan loop.
struct DateRule {
    pattern: Regex,
    ceded_by_suffix: Option<Regex>,
}

static DATE_RULES: Lazy<Vec<DateRule>> = Lazy::new(|| {
    // "March 4th" followed by ", 2024" belongs to the year-qualified rule.
    let year_suffix = Regex::new(r"^,\s*\d{4}").expect("valid year suffix pattern");
    vec![
        DateRule {
            pattern: Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").expect("valid slash date pattern"),
            ceded_by_suffix: None,
        },
        DateRule {
            pattern: Regex::new(&format!(
                r"(?i)\b(?:{MONTH_NAMES})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,\s*\d{{4}}\b"
            ))
            .expect("valid month-day-year pattern"),
            ceded_by_suffix: None,
        },
        DateRule {
            pattern: Regex::new(&format!(
                r"(?i)\b(?:{MONTH_NAMES})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?\b"
            ))
            .expect("valid month-day pattern"),
            ceded_by_suffix: Some(year_suffix),
        },
        DateRule {
            pattern: Regex::new(r"\b\d{1,2}-\d{1,2}-\d{4}\b").expect("valid hyphen date pattern"),
            ceded_by_suffix: None,
        },
        DateRule {
            pattern: Regex::new(r"\b\d{4}-\d{1,2}-\d{1,2}\b").expect("valid iso date pattern"),
            ceded_by_suffix: None,
        },
    ]
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:am|pm)\b").expect("valid time pattern")
});

/// Scans subject and body for date mentions and produces candidate events.
///
/// Rules are applied independently and in declared order over the full blob,
/// so the same calendar date written in two shapes produces two candidates;
/// no deduplication happens here. Unparseable date matches are dropped
/// silently, and a time mention that fails to combine still emits its
/// candidate with `date_time = None`. Never fails; pure given `today`.
pub fn extract(subject: &str, body: &str, today: NaiveDate) -> Vec<CandidateEvent> {
    let blob = format!("{}\n{}", subject, body);
    let mut candidates = Vec::new();

    for rule in DATE_RULES.iter() {
        for matched in rule.pattern.find_iter(&blob) {
            if let Some(suffix) = &rule.ceded_by_suffix {
                if suffix.is_match(&blob[matched.end()..]) {
                    continue;
                }
            }

            let date_raw = matched.as_str();
            let date = match parse_date(date_raw, today) {
                Ok(date) => date,
                Err(reason) => {
                    eprintln!("Skipping date match '{}': {}", date_raw, reason);
                    continue;
                }
            };

            let description = build_description(&blob, matched.start(), date_raw);
            let window = context_window(&blob, matched.start(), matched.end());
            let times: Vec<&str> = TIME_PATTERN
                .find_iter(window)
                .map(|time| time.as_str())
                .collect();

            if times.is_empty() {
                candidates.push(CandidateEvent {
                    date,
                    date_time: None,
                    has_time: false,
                    description,
                });
                continue;
            }

            for time_raw in times {
                let date_time = match combine_date_time(date_raw, time_raw, today) {
                    Ok(instant) => Some(instant),
                    Err(reason) => {
                        // Best effort: keep the event, lose the instant.
                        eprintln!("Keeping '{}' without an instant: {}", date_raw, reason);
                        None
                    }
                };
                candidates.push(CandidateEvent {
                    date,
                    date_time,
                    has_time: true,
                    description: description.clone(),
                });
            }
        }
    }

    candidates
}

fn context_window(blob: &str, start: usize, end: usize) -> &str {
    let from = floor_char_boundary(blob, start.saturating_sub(CONTEXT_RADIUS));
    let to = ceil_char_boundary(blob, (end + CONTEXT_RADIUS).min(blob.len()));
    &blob[from..to]
}

// Trailing slice from the match, with the matched date text itself removed
// (first literal occurrence only), trimmed, cut at the first line break.
fn build_description(blob: &str, start: usize, date_raw: &str) -> String {
    let end = ceil_char_boundary(blob, (start + DESCRIPTION_LIMIT).min(blob.len()));
    let stripped = blob[start..end].replacen(date_raw, "", 1);
    let trimmed = stripped.trim();
    match trimmed.find(['\n', '\r']) {
        Some(cut) => trimmed[..cut].to_string(),
        None => trimmed.to_string(),
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
