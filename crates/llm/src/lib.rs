//! FinSummary LLM Integration
//!
//! Instruction templates, map-reduce and refine summarization, Thai
//! translation, and an Ollama-backed model handle

mod chunking;
mod client;
mod llm_trait;
mod prompts;
mod summarize;
mod translate;
mod types;

#[cfg(test)]
mod testing;

pub use chunking::{chunk_text, split_paragraphs, TextChunk};
pub use client::OllamaClient;
pub use llm_trait::LlmClient;
pub use prompts::{
    combine_prompt, map_prompt, refine_context, translate_prompt, PromptTemplate,
    COMBINE_BULLET_TEMPLATE, COMBINE_PARAGRAPH_TEMPLATE, MAP_TEMPLATE, TEXT_SLOT,
    TRANSLATE_THAI_TEMPLATE,
};
pub use summarize::{
    summarize_map_reduce, summarize_map_reduce_with, summarize_refine, SummarizeOptions,
    Summarizer, PARTIAL_SEPARATOR,
};
pub use translate::translate;
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, ChatRole, GenerateOptions, GenerateRequest,
    GenerateResponse, SummaryStrategy, SummaryStyle,
};
