use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A calendar-worthy mention pulled out of message text. Process-local and
/// disposable: consumed once by event creation, never persisted.
///
/// `has_time` is kept alongside `date_time` rather than derived from it:
/// a time mention that was found but failed to combine still leaves
/// `has_time = true` with `date_time = None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvent {
    pub date: NaiveDate,
    pub date_time: Option<NaiveDateTime>,
    pub has_time: bool,
    pub description: String,
}
