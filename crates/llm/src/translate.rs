use finsummary_common::Result;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::prompts::translate_prompt;
use crate::types::ChatMessage;

/// Translate text into Thai with a single chat call
///
/// The response content is returned unmodified. Keeping bullet or paragraph
/// layout is left to the model.
pub async fn translate<C>(text: &str, model: &C) -> Result<String>
where
    C: LlmClient + ?Sized,
{
    info!(
        "Translating text to Thai - Length: {} chars, Model: {}",
        text.len(),
        model.model_name()
    );

    let prompt = translate_prompt(text)?;
    let reply = model.chat(&[ChatMessage::user(prompt)]).await?;

    debug!("Translation received - Length: {} chars", reply.content.len());
    Ok(reply.content)
}
