//! Chat completion request and response.

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;
use super::usage::Usage;

/// Body of a chat completion call.
///
/// Unset optional parameters are left out of the JSON so the server applies
/// its own defaults.
///
/// # Example
/// ```
/// use sberchat::types::{ChatRequest, Message};
///
/// let request = ChatRequest::builder()
///     .model("GigaChat:latest")
///     .messages(vec![Message::user("hi")])
///     .max_tokens(10)
///     .temperature(0.2)
///     .build();
/// let json = serde_json::to_value(&request)?;
/// assert_eq!(json["temperature"], 0.2);
/// assert!(json.get("top_p").is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct ChatRequest {
    #[builder(into)]
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Carried on the wire only; responses are always read whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<u32>,
}

/// One candidate completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Choice {
    pub index: u32,
    #[serde(default)]
    pub finish_reason: String,
    pub message: Message,
}

/// Result of a chat completion call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub model: String,
    /// Unix seconds.
    pub created: i64,
    #[serde(default)]
    pub object: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Usage,
}

impl ChatResponse {
    /// Highest-ranked choice (lowest `index`).
    pub fn best_choice(&self) -> Option<&Choice> {
        self.choices.iter().min_by_key(|choice| choice.index)
    }

    /// Content of the highest-ranked choice.
    pub fn first_content(&self) -> Option<&str> {
        self.best_choice()
            .map(|choice| choice.message.content.as_str())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }
}
