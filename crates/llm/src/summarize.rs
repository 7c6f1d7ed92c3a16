use finsummary_common::{FinSummaryError, Result};
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::prompts::{combine_prompt, map_prompt, refine_context};
use crate::translate::translate;
use crate::types::{SummaryStrategy, SummaryStyle};

/// Separator placed between partial summaries before the combine step
pub const PARTIAL_SEPARATOR: &str = "\n\n";

/// Summarize chunks with map-reduce: one call per chunk, then one combine call
pub async fn summarize_map_reduce<S, C>(chunks: &[S], model: &C, style: SummaryStyle) -> Result<String>
where
    S: AsRef<str> + Sync,
    C: LlmClient + ?Sized,
{
    summarize_map_reduce_with(chunks, model, style, 1).await
}

/// Map-reduce with up to `concurrency` map calls in flight
///
/// Partial summaries are always combined in chunk order.
pub async fn summarize_map_reduce_with<S, C>(
    chunks: &[S],
    model: &C,
    style: SummaryStyle,
    concurrency: usize,
) -> Result<String>
where
    S: AsRef<str> + Sync,
    C: LlmClient + ?Sized,
{
    ensure_chunks(chunks)?;
    let total = chunks.len();
    info!(
        "Starting map-reduce summarization - Chunks: {}, Style: {}, Model: {}",
        total,
        style,
        model.model_name()
    );

    let partials: Vec<String> = stream::iter(chunks.iter().enumerate())
        .map(|(i, chunk)| async move {
            debug!("Map step {}/{}", i + 1, total);
            let prompt = map_prompt(chunk.as_ref())?;
            model.generate(&prompt).await
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    let combined = partials.join(PARTIAL_SEPARATOR);
    debug!("Combine step - Partial summaries length: {} chars", combined.len());

    let summary = model.generate(&combine_prompt(style, &combined)?).await?;

    info!("Map-reduce summarization finished - Length: {} chars", summary.len());
    Ok(summary)
}

/// Summarize chunks with refine: the first chunk seeds a running summary
/// which every following chunk revises in order
pub async fn summarize_refine<S, C>(chunks: &[S], model: &C, style: SummaryStyle) -> Result<String>
where
    S: AsRef<str>,
    C: LlmClient + ?Sized,
{
    ensure_chunks(chunks)?;
    let total = chunks.len();
    info!(
        "Starting refine summarization - Chunks: {}, Style: {}, Model: {}",
        total,
        style,
        model.model_name()
    );

    let mut running = model.generate(&map_prompt(chunks[0].as_ref())?).await?;

    for (i, chunk) in chunks.iter().enumerate().skip(1) {
        debug!("Refine step {}/{}", i + 1, total);
        let context = refine_context(&running, chunk.as_ref());
        running = model.generate(&combine_prompt(style, &context)?).await?;
    }

    info!("Refine summarization finished - Length: {} chars", running.len());
    Ok(running)
}

fn ensure_chunks<S>(chunks: &[S]) -> Result<()> {
    if chunks.is_empty() {
        return Err(FinSummaryError::invalid_input(
            "Cannot summarize an empty chunk sequence",
        ));
    }
    Ok(())
}

/// Summarizer options
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Map calls allowed in flight during map-reduce
    pub map_concurrency: usize,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self { map_concurrency: 1 }
    }
}

/// Summarizer bound to one model handle
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
    options: SummarizeOptions,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(client: Arc<dyn LlmClient>, options: SummarizeOptions) -> Self {
        Self { client, options }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Summarize chunks with the given strategy and output style
    pub async fn summarize<S>(
        &self,
        chunks: &[S],
        strategy: SummaryStrategy,
        style: SummaryStyle,
    ) -> Result<String>
    where
        S: AsRef<str> + Sync,
    {
        match strategy {
            SummaryStrategy::MapReduce => {
                summarize_map_reduce_with(
                    chunks,
                    self.client.as_ref(),
                    style,
                    self.options.map_concurrency,
                )
                .await
            }
            SummaryStrategy::Refine => summarize_refine(chunks, self.client.as_ref(), style).await,
        }
    }

    /// Translate text (typically a finished summary) into Thai
    pub async fn translate(&self, text: &str) -> Result<String> {
        translate(text, self.client.as_ref()).await
    }
}
