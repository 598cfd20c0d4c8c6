use chrono::{Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use reqwest;
use serde::{Deserialize, Serialize};

type ClientError = Box<dyn std::error::Error + Send + Sync>;

const CALENDAR_BASE: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Serialize)]
struct EventRequest<'a> {
    summary: &'a str,
    description: &'a str,
    start: EventTime,
    end: EventTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventResponse {
    id: String,
}

pub async fn insert_timed_event(
    access_token: &str,
    calendar_id: &str,
    summary: &str,
    description: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    timezone: &Tz,
) -> Result<String, ClientError> {
    let request = EventRequest {
        summary,
        description,
        start: timed(start, timezone),
        end: timed(end, timezone),
    };
    insert_event(access_token, calendar_id, &request).await
}

pub async fn insert_all_day_event(
    access_token: &str,
    calendar_id: &str,
    summary: &str,
    description: &str,
    date: NaiveDate,
) -> Result<String, ClientError> {
    let request = EventRequest {
        summary,
        description,
        start: all_day(date),
        // The API's end date is exclusive.
        end: all_day(date + Duration::days(1)),
    };
    insert_event(access_token, calendar_id, &request).await
}

async fn insert_event(
    access_token: &str,
    calendar_id: &str,
    request: &EventRequest<'_>,
) -> Result<String, ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/calendars/{}/events", CALENDAR_BASE, calendar_id))
        .header("Authorization", format!("Bearer {}", access_token))
        .json(request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?; // read the body once

    if !status.is_success() {
        return Err(format!("Calendar insert failed with status {}: {}", status, text).into());
    }

    let created: EventResponse = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse Calendar JSON: {}\nRaw body: {}", e, text))?;
    Ok(created.id)
}

// Naive local wall time; the calendar interprets it in the given zone.
fn timed(instant: NaiveDateTime, timezone: &Tz) -> EventTime {
    EventTime {
        date_time: Some(instant.format("%Y-%m-%dT%H:%M:%S").to_string()),
        date: None,
        time_zone: Some(timezone.name().to_string()),
    }
}

fn all_day(date: NaiveDate) -> EventTime {
    EventTime {
        date_time: None,
        date: Some(date.format("%Y-%m-%d").to_string()),
        time_zone: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_payload_carries_wall_time_and_zone() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let body = serde_json::to_value(timed(start, &chrono_tz::America::New_York))
            .expect("serialize event time");
        assert_eq!(body["dateTime"], "2024-03-04T09:00:00");
        assert_eq!(body["timeZone"], "America/New_York");
        assert!(body.get("date").is_none());
    }

    #[test]
    fn all_day_payload_has_date_only() {
        let body = serde_json::to_value(all_day(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()))
            .expect("serialize event time");
        assert_eq!(body["date"], "2025-05-01");
        assert!(body.get("dateTime").is_none());
        assert!(body.get("timeZone").is_none());
    }

    #[test]
    fn all_day_request_uses_exclusive_end() {
        let request = EventRequest {
            summary: "Early dismissal",
            description: "",
            start: all_day(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
            end: all_day(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap() + Duration::days(1)),
        };
        let body = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(body["start"]["date"], "2025-05-01");
        assert_eq!(body["end"]["date"], "2025-05-02");
    }
}
