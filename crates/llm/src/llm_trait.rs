use async_trait::async_trait;
use finsummary_common::Result;

use crate::types::ChatMessage;

/// Handle to a configured text-generation service
///
/// Pipelines only borrow the handle; they never construct, cache or close it.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Submit instruction text, receive generated text
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Submit role-tagged messages, receive the assistant message
    ///
    /// The default joins the message contents and issues a single `generate` call.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let content = self.generate(&prompt).await?;
        Ok(ChatMessage::assistant(content))
    }

    /// Name of the model behind this handle
    fn model_name(&self) -> &str;
}
