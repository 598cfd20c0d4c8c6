use chrono::{DateTime, Duration, Utc};

use crate::config::Settings;
use crate::extract::extractor;
use crate::models::candidate::CandidateEvent;

use super::calendar_service::CalendarWriter;
use super::mailbox_service::{MailMessage, Mailbox};

const TITLE_LIMIT: usize = 100;
const EVENT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Default, PartialEq)]
pub struct IngestStats {
    pub threads_seen: usize,
    pub threads_skipped: usize,
    pub events_created: usize,
    pub events_failed: usize,
}

/// One full mailbox pass: search, extract, create, label. Per-event and
/// per-thread failures are logged and counted; only the initial search can
/// fail the pass as a whole.
pub async fn ingest_tick<M: Mailbox + ?Sized, C: CalendarWriter + ?Sized>(
    mailbox: &M,
    calendar: &C,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Result<IngestStats, String> {
    let since = now.date_naive() - Duration::days(settings.lookback_days as i64);
    let threads = mailbox.search(&settings.search_query, since).await?;
    if threads.is_empty() {
        println!("No matching threads since {}", since);
        return Ok(IngestStats::default());
    }

    let mut stats = IngestStats::default();
    for thread in &threads {
        stats.threads_seen += 1;
        if thread.has_label(&settings.processed_label) {
            stats.threads_skipped += 1;
            continue;
        }

        for message in &thread.messages {
            let candidates =
                extractor::extract(&message.subject, &message.body, now.date_naive());
            for candidate in candidates {
                let title =
                    build_title(&settings.title_prefix, &candidate.description, &message.subject);
                let description = build_event_description(message, &candidate);
                let created = match candidate.date_time {
                    Some(start) => {
                        let end = start + Duration::minutes(EVENT_DURATION_MINUTES);
                        calendar
                            .create_timed_event(&title, start, end, &description)
                            .await
                    }
                    // Covers both the no-time case and a time mention that
                    // failed to combine.
                    None => {
                        calendar
                            .create_all_day_event(&title, candidate.date, &description)
                            .await
                    }
                };
                match created {
                    Ok(event_id) => {
                        println!("Created event {} from thread {}", event_id, thread.id);
                        stats.events_created += 1;
                    }
                    Err(reason) => {
                        eprintln!("Failed to create event from thread {}: {}", thread.id, reason);
                        stats.events_failed += 1;
                    }
                }
            }
        }

        if let Err(reason) = mailbox.add_label(&thread.id, &settings.processed_label).await {
            eprintln!("Failed to label thread {}: {}", thread.id, reason);
        }
    }

    Ok(stats)
}

/// `prefix + (candidate description or, when empty, the email subject)`,
/// cut to 100 characters with a `...` marker when anything was cut.
pub fn build_title(prefix: &str, candidate_description: &str, subject: &str) -> String {
    let label = if candidate_description.is_empty() {
        subject
    } else {
        candidate_description
    };
    let full = format!("{}{}", prefix, label);
    if full.chars().count() > TITLE_LIMIT {
        let truncated: String = full.chars().take(TITLE_LIMIT).collect();
        format!("{}...", truncated)
    } else {
        full
    }
}

pub fn build_event_description(message: &MailMessage, candidate: &CandidateEvent) -> String {
    format!(
        "Created from email.\nSubject: {}\nFrom: {}\n\n{}",
        message.subject, message.sender, candidate.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn title_uses_candidate_description_with_prefix() {
        assert_eq!(
            build_title("[School] ", "picture day in the gym", "Newsletter #12"),
            "[School] picture day in the gym"
        );
    }

    #[test]
    fn title_falls_back_to_subject_when_description_is_empty() {
        assert_eq!(
            build_title("[School] ", "", "Newsletter #12"),
            "[School] Newsletter #12"
        );
    }

    #[test]
    fn title_truncates_at_limit_with_marker() {
        let long = "x".repeat(150);
        let title = build_title("", &long, "subject");
        assert_eq!(title.chars().count(), 103);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn title_at_exactly_the_limit_is_untouched() {
        let exact = "x".repeat(100);
        assert_eq!(build_title("", &exact, "subject"), exact);
    }

    #[test]
    fn event_description_embeds_subject_and_sender() {
        let message = MailMessage {
            subject: "PTA Newsletter".to_string(),
            body: String::new(),
            sender: "news@school.edu".to_string(),
        };
        let candidate = CandidateEvent {
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            date_time: None,
            has_time: false,
            description: "early dismissal".to_string(),
        };
        let description = build_event_description(&message, &candidate);
        assert!(description.contains("Subject: PTA Newsletter"));
        assert!(description.contains("From: news@school.edu"));
        assert!(description.contains("early dismissal"));
    }
}
