use async_trait::async_trait;

use crate::core::models::{CaptureSource, ThumbnailSize};

/// Discovers capturable screen surfaces.
///
/// An empty result means "capture unavailable in this environment", not a
/// zero-monitor machine; implementations absorb backend failures instead of
/// surfacing them to callers.
#[async_trait]
pub trait SourceEnumerator: Send + Sync {
    async fn enumerate_sources(&self, preferred: Option<ThumbnailSize>) -> Vec<CaptureSource>;

    /// Pixel dimensions of the primary screen, used by the capturer as the
    /// thumbnail hint so the first source's frame comes back at full
    /// resolution.
    fn native_screen_size(&self) -> Option<ThumbnailSize>;
}
