use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::clients::gcal_client;

/// Event creation surface. Returns the provider's id for the created event.
#[async_trait]
pub trait CalendarWriter: Send + Sync {
    async fn create_timed_event(
        &self,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        description: &str,
    ) -> Result<String, String>;

    async fn create_all_day_event(
        &self,
        title: &str,
        date: NaiveDate,
        description: &str,
    ) -> Result<String, String>;
}

pub struct GoogleCalendarService {
    access_token: String,
    calendar_id: String,
    timezone: Tz,
}

impl GoogleCalendarService {
    pub fn new(access_token: String, calendar_id: String, timezone: Tz) -> Self {
        Self {
            access_token,
            calendar_id,
            timezone,
        }
    }
}

#[async_trait]
impl CalendarWriter for GoogleCalendarService {
    async fn create_timed_event(
        &self,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        description: &str,
    ) -> Result<String, String> {
        gcal_client::insert_timed_event(
            &self.access_token,
            &self.calendar_id,
            title,
            description,
            start,
            end,
            &self.timezone,
        )
        .await
        .map_err(|e| e.to_string())
    }

    async fn create_all_day_event(
        &self,
        title: &str,
        date: NaiveDate,
        description: &str,
    ) -> Result<String, String> {
        gcal_client::insert_all_day_event(
            &self.access_token,
            &self.calendar_id,
            title,
            description,
            date,
        )
        .await
        .map_err(|e| e.to_string())
    }
}
