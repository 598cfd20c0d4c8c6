use async_trait::async_trait;
use chrono::NaiveDate;

use crate::clients::gmail_client;

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
    pub sender: String,
}

#[derive(Debug, Clone)]
pub struct MailThread {
    pub id: String,
    /// Label names (not provider ids) present on the thread.
    pub labels: Vec<String>,
    pub messages: Vec<MailMessage>,
}

impl MailThread {
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}

#[async_trait]
pub trait Mailbox: Send + Sync {
    async fn search(&self, query: &str, since: NaiveDate) -> Result<Vec<MailThread>, String>;
    async fn add_label(&self, thread_id: &str, label: &str) -> Result<(), String>;
}

pub struct GmailService {
    access_token: String,
}

impl GmailService {
    pub fn new(access_token: String) -> Self {
        Self { access_token }
    }

    async fn resolve_or_create_label(&self, name: &str) -> Result<String, String> {
        let labels = gmail_client::list_labels(&self.access_token)
            .await
            .map_err(|e| e.to_string())?;
        if let Some(label) = labels.iter().find(|label| label.name == name) {
            return Ok(label.id.clone());
        }
        let created = gmail_client::create_label(&self.access_token, name)
            .await
            .map_err(|e| e.to_string())?;
        Ok(created.id)
    }
}

#[async_trait]
impl Mailbox for GmailService {
    async fn search(&self, query: &str, since: NaiveDate) -> Result<Vec<MailThread>, String> {
        let full_query = format!("{} after:{}", query, since.format("%Y/%m/%d"));
        let thread_ids = gmail_client::list_thread_ids(&self.access_token, &full_query)
            .await
            .map_err(|e| e.to_string())?;

        // Gmail threads carry label ids; expose names to the caller.
        let labels = gmail_client::list_labels(&self.access_token)
            .await
            .map_err(|e| e.to_string())?;

        let mut threads = Vec::new();
        for thread_id in thread_ids {
            let raw = gmail_client::fetch_thread(&self.access_token, &thread_id)
                .await
                .map_err(|e| e.to_string())?;
            let label_names = raw
                .label_ids
                .iter()
                .filter_map(|id| {
                    labels
                        .iter()
                        .find(|label| &label.id == id)
                        .map(|label| label.name.clone())
                })
                .collect();
            threads.push(MailThread {
                id: raw.id,
                labels: label_names,
                messages: raw
                    .messages
                    .into_iter()
                    .map(|message| MailMessage {
                        subject: message.subject,
                        body: message.body,
                        sender: message.sender,
                    })
                    .collect(),
            });
        }
        Ok(threads)
    }

    async fn add_label(&self, thread_id: &str, label: &str) -> Result<(), String> {
        let label_id = self.resolve_or_create_label(label).await?;
        gmail_client::add_thread_label(&self.access_token, thread_id, &label_id)
            .await
            .map_err(|e| e.to_string())
    }
}
