// File: ./src/advisor.rs
//! Client for the scheduling advisor, an Anthropic-style messages API.
//!
//! The advisor receives the pending task inventory and proposes an execution
//! order with dates and times; judging whether that schedule is feasible is
//! its job, not ours. Everything that can go wrong on the wire collapses
//! into a single reportable [`AdvisorError`]; the caller forwards it and
//! never retries here.
use crate::config::Config;
use crate::model::Task;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("advisor returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("advisor returned no content")]
    Empty,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

pub struct AdvisorClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
}

impl AdvisorClient {
    pub fn new(api_key: String, api_url: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
            max_tokens,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.clone(),
            config.api_url.clone(),
            config.model.clone(),
            config.max_tokens,
        )
    }

    /// Requests schedule advice for the pending subset of `tasks`. Returns
    /// the raw advice text; extracting structure from it is the
    /// reconciliation pipeline's problem.
    pub async fn fetch_advice(&self, tasks: &[Task]) -> Result<String, AdvisorError> {
        let pending: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: build_prompt(&pending),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("advisor request failed with {}", status);
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(AdvisorError::Empty)
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string(),
        None => "No date set".to_string(),
    }
}

/// The task inventory plus response-format instructions. The line format
/// requested here is exactly what `recommend::grammar` parses back out.
pub fn build_prompt(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No tasks available".to_string();
    }

    let inventory = tasks
        .iter()
        .map(|task| {
            format!(
                "Task: {}\nID: {}\nDescription: {}\nDue Date: {}\nTime Required: {} hours\nImportance: {}\nStatus: {}\nCreated: {}",
                task.title,
                task.id,
                task.description.as_deref().unwrap_or("N/A"),
                format_date(task.due),
                task.estimated_hours,
                task.importance,
                task.status_label(),
                format_date(Some(task.created_at)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "The following are tasks in my task management app:\n\n{inventory}\n\n\
        Analyze these tasks and recommend an execution order with time management \
        suggestions.\n\n\
        Notes to consider:\n\
        Due dates are strict.\n\
        Ideally every task finishes one day before its due date.\n\
        Keep all work within normal working hours.\n\
        Weigh both importance and due date.\n\
        Keep the response clear and simple, no conclusion needed.\n\n\
        Respond in exactly this format, one line per task:\n\
        The recommended order is:\n\
        1) Task: {{task title}} at {{Month D, YYYY}} at {{H:MM AM}}, task id: {{task id}}\n\
        2) Task: {{task title}} at {{Month D, YYYY}} at {{H:MM AM}}, task id: {{task id}}"
    )
}
