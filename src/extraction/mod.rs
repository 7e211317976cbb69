//! # LLM-Guided Extraction Module
//!
//! Fetches a page, splits its markdown into chunks, and asks a completion
//! model to pull out whatever a natural-language instruction describes. Chunk
//! answers are merged back in page order.
//!
//! ## Key Components
//!
//! - `LlmConfig`: Model, temperature, quota and chunking settings plus the API key
//! - `LlmExtractor`: The object-safe seam the tools call through
//! - `StructuredExtractor`: Implementation over any rig `CompletionModel`
//! - `Extraction`: Either nothing extracted or the merged content
//!
//! ## Features
//!
//! - Low-temperature calls (0.2 by default)
//! - Bounded concurrency across chunks with a semaphore
//! - JSON answers merged into a single array; plain-text answers joined

mod chunking;
mod config;
mod error;
mod prompt;

pub use chunking::split_into_chunks;
pub use config::{LlmConfig, LlmConfigBuilder};
pub use error::ExtractionError;
pub use prompt::{build_preamble, build_prompt, merge_answers, parse_answer, ChunkAnswer};

use futures::future::{self, BoxFuture};
use rig::completion::{AssistantContent, CompletionModel};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument};

use crate::crawler::PageFetcher;

/// Result of an extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The model found nothing matching the instruction
    Empty,
    /// Merged model output: a JSON array string, or plain text
    Content(String),
}

/// Extracts information from a page as directed by an instruction
pub trait LlmExtractor: Send + Sync {
    fn extract<'a>(
        &'a self,
        url: &'a str,
        instruction: &'a str,
    ) -> BoxFuture<'a, Result<Extraction, ExtractionError>>;
}

/// Chunked extractor over a completion model
pub struct StructuredExtractor<M: CompletionModel> {
    model: M,
    fetcher: Arc<dyn PageFetcher>,
    config: LlmConfig,
}

impl<M> StructuredExtractor<M>
where
    M: CompletionModel + 'static,
{
    pub fn new(model: M, fetcher: Arc<dyn PageFetcher>, config: LlmConfig) -> Self {
        Self {
            model,
            fetcher,
            config,
        }
    }

    /// Fetch `url` and extract from its markdown
    #[instrument(skip(self, instruction), fields(model = %self.config.model))]
    pub async fn extract_from_url(
        &self,
        url: &str,
        instruction: &str,
    ) -> Result<Extraction, ExtractionError> {
        if instruction.trim().is_empty() {
            return Err(ExtractionError::EmptyInstruction);
        }

        let page = self.fetcher.fetch(url).await?;
        self.extract_from_markdown(&page.url, &page.markdown, instruction)
            .await
    }

    /// Extract from already-rendered markdown
    ///
    /// # Arguments
    ///
    /// * `url` - Source URL, passed to the model for context
    /// * `markdown` - The page content
    /// * `instruction` - What to extract
    ///
    /// # Returns
    ///
    /// `Extraction::Empty` when the content is blank or no chunk produced an
    /// answer, otherwise the merged answers
    pub async fn extract_from_markdown(
        &self,
        url: &str,
        markdown: &str,
        instruction: &str,
    ) -> Result<Extraction, ExtractionError> {
        if instruction.trim().is_empty() {
            return Err(ExtractionError::EmptyInstruction);
        }

        let chunks = split_into_chunks(markdown, self.config.chunk_chars);
        if chunks.is_empty() {
            debug!("Page has no content to extract from");
            return Ok(Extraction::Empty);
        }

        let total = chunks.len();
        info!(chunks = total, "Extracting from page");

        let preamble = build_preamble(instruction);
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));

        let tasks = chunks.iter().enumerate().map(|(index, chunk)| {
            let semaphore = semaphore.clone();
            let preamble = preamble.as_str();
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|e| ExtractionError::Other(format!("Semaphore closed: {}", e)))?;
                self.complete(preamble, build_prompt(url, chunk, index, total))
                    .await
            }
        });

        let answers = future::join_all(tasks)
            .await
            .into_iter()
            .map(|response| response.map(|text| parse_answer(&text)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(merge_answers(answers).map_or(Extraction::Empty, Extraction::Content))
    }

    async fn complete(&self, preamble: &str, prompt: String) -> Result<String, ExtractionError> {
        let response = self
            .model
            .completion_request(prompt)
            .preamble(preamble.to_string())
            .temperature(self.config.temperature)
            .send()
            .await?;

        let text = response
            .choice
            .iter()
            .filter_map(|c| match c {
                AssistantContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect::<Vec<String>>()
            .join("\n");

        Ok(text)
    }
}

impl<M> LlmExtractor for StructuredExtractor<M>
where
    M: CompletionModel + 'static,
{
    fn extract<'a>(
        &'a self,
        url: &'a str,
        instruction: &'a str,
    ) -> BoxFuture<'a, Result<Extraction, ExtractionError>> {
        Box::pin(self.extract_from_url(url, instruction))
    }
}
