use std::sync::Arc;

use crate::core::interfaces::adapters::{ChatModel, TextExtractor};
use crate::core::models::{ExplainOutcome, SelectionBounds};
use crate::core::prompt_composer::compose_explain_prompt;
use crate::core::region_capturer::RegionCapturer;
use crate::global_constants::LOG_TAG_PIPELINE;

/// Composes capture, OCR, prompt building and the model call into the one
/// externally-invoked "explain this screen region" operation.
///
/// Nothing above this pipeline ever observes an error: every failure is
/// folded into the returned answer text.
pub struct ExplainPipeline {
    capturer: Arc<RegionCapturer>,
    text_extractor: Arc<dyn TextExtractor>,
    chat_model: Arc<dyn ChatModel>,
}

impl ExplainPipeline {
    pub fn build(
        capturer: Arc<RegionCapturer>,
        text_extractor: Arc<dyn TextExtractor>,
        chat_model: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            capturer,
            text_extractor,
            chat_model,
        }
    }

    /// Capture the given region, OCR it, and ask the model to explain what
    /// was on screen.
    pub async fn explain_selection(&self, bounds: Option<&SelectionBounds>) -> ExplainOutcome {
        log::info!(
            "{} explain-selection started, bounds: {:?}",
            LOG_TAG_PIPELINE,
            bounds
        );

        let image = match self.capturer.capture_region(bounds).await {
            Ok(image) => image,
            Err(capture_error) => {
                log::error!("{} capture failed: {}", LOG_TAG_PIPELINE, capture_error);
                return ExplainOutcome::failed(capture_error);
            }
        };

        let ocr_text = self.text_extractor.extract_text(&image).await;
        log::info!(
            "{} OCR produced {} characters",
            LOG_TAG_PIPELINE,
            ocr_text.len()
        );

        let prompt = compose_explain_prompt(&ocr_text);

        let answer = match self.chat_model.ask(&prompt).await {
            Ok(answer) => answer,
            Err(chat_failure) => {
                log::error!("{} model call failed: {}", LOG_TAG_PIPELINE, chat_failure);
                format!("Failed: {}", chat_failure)
            }
        };

        ExplainOutcome { ocr_text, answer }
    }

    /// Ask the model directly, skipping capture and OCR.
    pub async fn ask_freeform(&self, prompt: &str) -> String {
        log::info!("{} freeform ask started", LOG_TAG_PIPELINE);

        match self.chat_model.ask(prompt).await {
            Ok(answer) => answer,
            Err(chat_failure) => {
                log::error!("{} model call failed: {}", LOG_TAG_PIPELINE, chat_failure);
                format!("Failed: {}", chat_failure)
            }
        }
    }
}
