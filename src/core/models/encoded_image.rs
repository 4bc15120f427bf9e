use std::io::Cursor;

use image::{DynamicImage, ImageError, RgbaImage};

/// An immutable PNG-encoded image buffer, produced once per capture and
/// handed downstream to OCR or persistence.
#[derive(Clone)]
pub struct EncodedImage {
    png_bytes: Vec<u8>,
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("png_bytes_len", &self.png_bytes.len())
            .finish()
    }
}

impl EncodedImage {
    pub fn from_png_bytes(png_bytes: Vec<u8>) -> Self {
        Self { png_bytes }
    }

    pub fn encode_rgba(image: &RgbaImage) -> Result<Self, ImageError> {
        let mut png_bytes = Vec::new();
        DynamicImage::ImageRgba8(image.clone())
            .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)?;

        log::debug!(
            "[IMAGE] encoded {}x{} frame into {} PNG bytes",
            image.width(),
            image.height(),
            png_bytes.len()
        );

        Ok(Self { png_bytes })
    }

    pub fn decode(&self) -> Result<RgbaImage, ImageError> {
        Ok(image::load_from_memory(&self.png_bytes)?.to_rgba8())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.png_bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png_bytes
    }

    pub fn len(&self) -> usize {
        self.png_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.png_bytes.is_empty()
    }
}
