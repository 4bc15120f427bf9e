use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;
use rusty_tesseract::{Args, Image as TesseractImage};

use crate::core::interfaces::adapters::TextExtractor;
use crate::core::models::EncodedImage;
use crate::global_constants::{LOG_TAG_OCR, OCR_LANGUAGE};

/// Tesseract-backed OCR with a single fixed language profile.
///
/// Extraction is best effort: any failure along the way (undecodable image,
/// missing tesseract install, engine error) logs a warning and yields an
/// empty string instead of failing the pipeline.
pub struct TesseractTextExtractor {
    ocr_args: Args,
}

impl TesseractTextExtractor {
    pub fn build() -> Result<Self> {
        log::info!(
            "{} initializing Tesseract extractor, language '{}'",
            LOG_TAG_OCR,
            OCR_LANGUAGE
        );

        Ok(Self {
            ocr_args: Args {
                lang: OCR_LANGUAGE.to_string(),
                ..Args::default()
            },
        })
    }

    fn run_ocr(&self, image: &EncodedImage) -> Result<String> {
        let decoded = image.decode()?;
        let dynamic_image = DynamicImage::ImageRgba8(decoded);

        let tesseract_image = TesseractImage::from_dynamic_image(&dynamic_image)?;
        let extracted = rusty_tesseract::image_to_string(&tesseract_image, &self.ocr_args)?;

        Ok(extracted.trim().to_string())
    }
}

#[async_trait]
impl TextExtractor for TesseractTextExtractor {
    async fn extract_text(&self, image: &EncodedImage) -> String {
        log::debug!(
            "{} starting extraction over {} PNG bytes",
            LOG_TAG_OCR,
            image.len()
        );

        match self.run_ocr(image) {
            Ok(text) => {
                log::info!("{} extracted {} characters", LOG_TAG_OCR, text.len());
                text
            }
            Err(error) => {
                log::warn!(
                    "{} extraction failed, returning empty text: {}",
                    LOG_TAG_OCR,
                    error
                );
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_configures_the_fixed_language() {
        let extractor = TesseractTextExtractor::build().unwrap();

        assert_eq!(extractor.ocr_args.lang, OCR_LANGUAGE);
    }

    #[tokio::test]
    async fn test_undecodable_image_yields_empty_string_without_error() {
        let extractor = TesseractTextExtractor::build().unwrap();
        let garbage = EncodedImage::from_png_bytes(vec![0xde, 0xad, 0xbe, 0xef]);

        let text = extractor.extract_text(&garbage).await;

        assert_eq!(text, "");
    }
}
