use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use reqwest;
use serde::{Deserialize, Serialize};

type ClientError = Box<dyn std::error::Error + Send + Sync>;

const GMAIL_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

#[derive(Debug, Clone)]
pub struct RawMessage {
    pub subject: String,
    pub sender: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct RawThread {
    pub id: String,
    pub label_ids: Vec<String>,
    pub messages: Vec<RawMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ThreadListResponse {
    #[serde(default)]
    threads: Vec<ThreadRef>,
}

#[derive(Debug, Deserialize)]
struct ThreadRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ThreadResponse {
    id: String,
    #[serde(default)]
    messages: Vec<MessageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageResponse {
    #[serde(default)]
    label_ids: Vec<String>,
    payload: Option<MessagePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagePart {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    headers: Vec<Header>,
    body: Option<PartBody>,
    #[serde(default)]
    parts: Vec<MessagePart>,
}

#[derive(Debug, Deserialize)]
struct Header {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct PartBody {
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LabelListResponse {
    #[serde(default)]
    labels: Vec<RawLabel>,
}

#[derive(Debug, Serialize)]
struct CreateLabelRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModifyThreadRequest<'a> {
    add_label_ids: Vec<&'a str>,
}

pub async fn list_thread_ids(access_token: &str, query: &str) -> Result<Vec<String>, ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/threads", GMAIL_BASE))
        .query(&[("q", query)])
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    let listing: ThreadListResponse = read_json(response).await?;
    Ok(listing.threads.into_iter().map(|t| t.id).collect())
}

pub async fn fetch_thread(access_token: &str, thread_id: &str) -> Result<RawThread, ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/threads/{}", GMAIL_BASE, thread_id))
        .query(&[("format", "full")])
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    let thread: ThreadResponse = read_json(response).await?;

    let mut label_ids: Vec<String> = Vec::new();
    let mut messages = Vec::new();
    for message in thread.messages {
        for label_id in message.label_ids {
            if !label_ids.contains(&label_id) {
                label_ids.push(label_id);
            }
        }
        let Some(payload) = message.payload else {
            continue;
        };
        messages.push(RawMessage {
            subject: header_value(&payload, "Subject"),
            sender: header_value(&payload, "From"),
            body: plain_text_body(&payload).unwrap_or_default(),
        });
    }

    Ok(RawThread {
        id: thread.id,
        label_ids,
        messages,
    })
}

pub async fn list_labels(access_token: &str) -> Result<Vec<RawLabel>, ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/labels", GMAIL_BASE))
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    let listing: LabelListResponse = read_json(response).await?;
    Ok(listing.labels)
}

pub async fn create_label(access_token: &str, name: &str) -> Result<RawLabel, ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/labels", GMAIL_BASE))
        .header("Authorization", format!("Bearer {}", access_token))
        .json(&CreateLabelRequest { name })
        .send()
        .await?;

    read_json(response).await
}

pub async fn add_thread_label(
    access_token: &str,
    thread_id: &str,
    label_id: &str,
) -> Result<(), ClientError> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/threads/{}/modify", GMAIL_BASE, thread_id))
        .header("Authorization", format!("Bearer {}", access_token))
        .json(&ModifyThreadRequest {
            add_label_ids: vec![label_id],
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await?;
        return Err(format!("Gmail modify failed with status {}: {}", status, text).into());
    }
    Ok(())
}

async fn read_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let text = response.text().await?; // read the body once

    if !status.is_success() {
        return Err(format!("Gmail request failed with status {}: {}", status, text).into());
    }

    serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse Gmail JSON: {}\nRaw body: {}", e, text).into())
}

fn header_value(payload: &MessagePart, name: &str) -> String {
    payload
        .headers
        .iter()
        .find(|header| header.name.eq_ignore_ascii_case(name))
        .map(|header| header.value.clone())
        .unwrap_or_default()
}

// Prefers the first text/plain part anywhere in the MIME tree, falling back
// to whatever the top-level body carries.
fn plain_text_body(payload: &MessagePart) -> Option<String> {
    find_plain_text(payload).or_else(|| decode_part(payload))
}

fn find_plain_text(part: &MessagePart) -> Option<String> {
    if part.mime_type == "text/plain" {
        if let Some(decoded) = decode_part(part) {
            return Some(decoded);
        }
    }
    part.parts.iter().find_map(find_plain_text)
}

fn decode_part(part: &MessagePart) -> Option<String> {
    let data = part.body.as_ref()?.data.as_ref()?;
    let bytes = URL_SAFE
        .decode(data)
        .or_else(|_| URL_SAFE_NO_PAD.decode(data))
        .ok()?;
    Some(String::from_utf8_lossy(&bytes).to_string())
}
