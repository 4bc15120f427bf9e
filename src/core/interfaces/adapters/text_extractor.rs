use async_trait::async_trait;

use crate::core::models::EncodedImage;

/// Best-effort OCR over an encoded screenshot.
///
/// Unreadable or blank input yields an empty string; extraction never fails
/// the pipeline. Results come back with surrounding whitespace trimmed.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, image: &EncodedImage) -> String;
}
