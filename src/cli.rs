use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::Text;
use serde_json;

use crate::config::{AppConfig, Settings};
use crate::extract::extractor;
use crate::service::calendar_service::GoogleCalendarService;
use crate::service::ingest_service::ingest_tick;
use crate::service::mailbox_service::GmailService;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single mailbox scan and create calendar events
    Sync {},
    /// Run the extractor over pasted text and print the candidates as JSON
    Extract {
        /// Email body text; prompted for interactively when omitted
        #[arg(long)]
        text: Option<String>,
        /// Optional email subject scanned ahead of the body
        #[arg(long)]
        subject: Option<String>,
    },
}

pub async fn cli(config: &AppConfig) {
    // Fine to panic here
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync {} => {
            let settings = match Settings::load(config) {
                Ok(settings) => settings,
                Err(e) => {
                    println!("Invalid configuration: {}", e);
                    return;
                }
            };
            let mailbox = GmailService::new(settings.access_token.clone());
            let calendar = GoogleCalendarService::new(
                settings.access_token.clone(),
                settings.calendar_id.clone(),
                settings.timezone,
            );
            match ingest_tick(&mailbox, &calendar, &settings, Utc::now()).await {
                Ok(stats) => println!(
                    "Done: {} threads seen, {} skipped, {} events created, {} failed",
                    stats.threads_seen,
                    stats.threads_skipped,
                    stats.events_created,
                    stats.events_failed
                ),
                Err(e) => println!("Sync failed: {}", e),
            }
        }
        Commands::Extract { text, subject } => {
            if let Err(e) = extract_preview(text, subject) {
                println!("Failed to extract events: {}", e);
            }
        }
    }
}

fn extract_preview(
    text: Option<String>,
    subject: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = match text {
        Some(supplied) => supplied,
        None => specify_text()?,
    };
    let candidates = extractor::extract(
        subject.as_deref().unwrap_or(""),
        &body,
        Utc::now().date_naive(),
    );
    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}

fn specify_text() -> Result<String, Box<dyn std::error::Error>> {
    Ok(Text::new("Paste the email text.").prompt()?)
}
