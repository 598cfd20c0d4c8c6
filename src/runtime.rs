use crate::config::Settings;
use crate::tasks::ingest_loop;

pub async fn run_daemon(settings: Settings) {
    println!(
        "Starting mailbox ingest daemon (every {}s, query: {})",
        settings.poll_interval_secs, settings.search_query
    );
    ingest_loop::run_ingest_loop(settings).await;
}
