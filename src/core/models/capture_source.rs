use crate::core::models::EncodedImage;

/// Requested thumbnail resolution for one enumeration attempt. Some display
/// backends reject certain hint shapes, which is why attempts are laddered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

impl ThumbnailSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One capturable screen surface. Created fresh per enumeration, never cached.
#[derive(Clone, Debug)]
pub struct CaptureSource {
    pub id: String,
    pub name: String,
    pub thumbnail: EncodedImage,
}

impl CaptureSource {
    pub fn new(id: String, name: String, thumbnail: EncodedImage) -> Self {
        Self {
            id,
            name,
            thumbnail,
        }
    }
}
