use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;

use crate::config::Settings;
use crate::service::calendar_service::GoogleCalendarService;
use crate::service::ingest_service::ingest_tick;
use crate::service::mailbox_service::GmailService;

pub async fn run_ingest_loop(settings: Settings) {
    let mailbox = GmailService::new(settings.access_token.clone());
    let calendar = GoogleCalendarService::new(
        settings.access_token.clone(),
        settings.calendar_id.clone(),
        settings.timezone,
    );
    loop {
        match ingest_tick(&mailbox, &calendar, &settings, Utc::now()).await {
            Ok(stats) => println!(
                "Ingest pass: {} threads seen, {} skipped, {} events created, {} failed",
                stats.threads_seen, stats.threads_skipped, stats.events_created, stats.events_failed
            ),
            Err(reason) => eprintln!("Ingest pass failed: {}", reason),
        }
        sleep(Duration::from_secs(settings.poll_interval_secs)).await;
    }
}
