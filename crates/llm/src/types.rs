use finsummary_common::FinSummaryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ollama generate request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name (e.g., "llama3.2", "gemma2")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Disable streaming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Generation options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

/// Generation options
#[derive(Debug, Clone, Serialize, Default)]
pub struct GenerateOptions {
    /// Temperature (0.0 - 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Top-p sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<i32>,
}

/// Ollama generate response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Model name
    #[serde(default)]
    pub model: String,

    /// Generated text
    pub response: String,

    /// Whether generation is complete
    #[serde(default)]
    pub done: bool,
}

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ollama chat request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,

    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

/// Ollama chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,

    pub message: ChatMessage,

    #[serde(default)]
    pub done: bool,
}

/// Output genre of the final summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    /// Structured prose: introduction, body paragraphs, conclusion
    #[default]
    Paragraph,
    /// Bullet points with optional sub-bullets
    Bullet,
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph => write!(f, "paragraph"),
            Self::Bullet => write!(f, "bullet"),
        }
    }
}

impl FromStr for SummaryStyle {
    type Err = FinSummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paragraph" => Ok(Self::Paragraph),
            "bullet" | "bullets" => Ok(Self::Bullet),
            other => Err(FinSummaryError::invalid_input(format!(
                "Unknown summary style '{}' (expected 'paragraph' or 'bullet')",
                other
            ))),
        }
    }
}

/// How chunks are fed through the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStrategy {
    /// Summarize every chunk independently, then combine once
    #[default]
    MapReduce,
    /// Summarize the first chunk, then revise with each following chunk
    Refine,
}

impl fmt::Display for SummaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapReduce => write!(f, "map_reduce"),
            Self::Refine => write!(f, "refine"),
        }
    }
}

impl FromStr for SummaryStrategy {
    type Err = FinSummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "map_reduce" | "map-reduce" | "mapreduce" => Ok(Self::MapReduce),
            "refine" => Ok(Self::Refine),
            other => Err(FinSummaryError::invalid_input(format!(
                "Unknown summary strategy '{}' (expected 'map_reduce' or 'refine')",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_str() {
        assert_eq!("paragraph".parse::<SummaryStyle>().unwrap(), SummaryStyle::Paragraph);
        assert_eq!("BULLET".parse::<SummaryStyle>().unwrap(), SummaryStyle::Bullet);
        assert!("table".parse::<SummaryStyle>().is_err());
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "map-reduce".parse::<SummaryStrategy>().unwrap(),
            SummaryStrategy::MapReduce
        );
        assert_eq!("map_reduce".parse::<SummaryStrategy>().unwrap(), SummaryStrategy::MapReduce);
        assert_eq!("Refine".parse::<SummaryStrategy>().unwrap(), SummaryStrategy::Refine);
        assert!("stuff".parse::<SummaryStrategy>().is_err());
    }

    #[test]
    fn test_chat_message_serialization() {
        let json = serde_json::to_value(ChatMessage::user("hello")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_generate_request_skips_empty_options() {
        let request = GenerateRequest {
            model: "llama3.2".to_string(),
            prompt: "hi".to_string(),
            stream: Some(false),
            options: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("options").is_none());
        assert_eq!(json["stream"], false);
    }
}
