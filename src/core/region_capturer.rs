use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::core::interfaces::ports::{OverlaySurface, SourceEnumerator};
use crate::core::models::{EncodedImage, SelectionBounds};
use crate::global_constants::{LOG_TAG_CAPTURE, OVERLAY_SETTLE_DELAY_MS};

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no capture source available")]
    NoCaptureSource,

    #[error("invalid capture bounds: {0}")]
    InvalidBounds(String),

    #[error("screenshot codec failure: {0}")]
    EncodeFailure(#[from] image::ImageError),
}

/// Restores overlay visibility when dropped, so every exit path out of a
/// capture ends with the overlay back in its pre-call state.
struct OverlayRestoreGuard {
    overlay: Arc<dyn OverlaySurface>,
    restore_on_drop: bool,
}

impl OverlayRestoreGuard {
    fn hide_for_capture(overlay: &Arc<dyn OverlaySurface>) -> Self {
        let must_hide = overlay.exists() && overlay.is_visible();
        if must_hide {
            log::debug!("{} hiding overlay for the duration of capture", LOG_TAG_CAPTURE);
            overlay.hide();
        }
        Self {
            overlay: Arc::clone(overlay),
            restore_on_drop: must_hide,
        }
    }

    fn overlay_was_hidden(&self) -> bool {
        self.restore_on_drop
    }
}

impl Drop for OverlayRestoreGuard {
    fn drop(&mut self) {
        if self.restore_on_drop {
            log::debug!("{} restoring overlay after capture", LOG_TAG_CAPTURE);
            self.overlay.show();
        }
    }
}

/// Grabs the screen (optionally cropped to a selection) while keeping the
/// selection overlay out of the captured frame.
pub struct RegionCapturer {
    overlay: Arc<dyn OverlaySurface>,
    enumerator: Arc<dyn SourceEnumerator>,
    settle_delay: Duration,
    // Overlapping captures would race on hide/show ordering; one in flight
    // at a time.
    capture_guard: Mutex<()>,
}

impl RegionCapturer {
    pub fn new(overlay: Arc<dyn OverlaySurface>, enumerator: Arc<dyn SourceEnumerator>) -> Self {
        Self {
            overlay,
            enumerator,
            settle_delay: Duration::from_millis(OVERLAY_SETTLE_DELAY_MS),
            capture_guard: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Capture the first enumerated screen, cropped to `bounds` when given.
    ///
    /// The overlay is hidden before the frame grab and shown again on every
    /// exit path, success or failure.
    pub async fn capture_region(
        &self,
        bounds: Option<&SelectionBounds>,
    ) -> Result<EncodedImage, CaptureError> {
        let _flight = self.capture_guard.lock().await;

        log::info!("{} starting capture, bounds: {:?}", LOG_TAG_CAPTURE, bounds);

        let restore_guard = OverlayRestoreGuard::hide_for_capture(&self.overlay);
        if restore_guard.overlay_was_hidden() {
            tokio::time::sleep(self.settle_delay).await;
        }

        self.grab_and_crop(bounds).await
        // restore_guard drops here, showing the overlay again if it was hidden
    }

    async fn grab_and_crop(
        &self,
        bounds: Option<&SelectionBounds>,
    ) -> Result<EncodedImage, CaptureError> {
        let sources = self
            .enumerator
            .enumerate_sources(self.enumerator.native_screen_size())
            .await;

        let first_source = sources.into_iter().next().ok_or_else(|| {
            log::error!("{} enumeration returned no sources", LOG_TAG_CAPTURE);
            CaptureError::NoCaptureSource
        })?;

        log::debug!(
            "{} using source '{}' ({}) as the screen",
            LOG_TAG_CAPTURE,
            first_source.name,
            first_source.id
        );

        let full_frame = first_source.thumbnail.decode()?;

        let frame = match bounds {
            Some(selection) => crop_frame(&full_frame, selection)?,
            None => full_frame,
        };

        let encoded = EncodedImage::encode_rgba(&frame)?;
        log::info!(
            "{} captured {}x{} frame ({} bytes)",
            LOG_TAG_CAPTURE,
            frame.width(),
            frame.height(),
            encoded.len()
        );
        Ok(encoded)
    }
}

/// Crop `frame` to `selection`. An origin outside the frame or a zero-sized
/// selection is rejected; extents that run past the frame edge are clamped.
fn crop_frame(frame: &RgbaImage, selection: &SelectionBounds) -> Result<RgbaImage, CaptureError> {
    if !selection.has_positive_extent() {
        return Err(CaptureError::InvalidBounds(format!(
            "selection extent must be positive, got {}x{}",
            selection.width, selection.height
        )));
    }

    if selection.x < 0 || selection.y < 0 {
        return Err(CaptureError::InvalidBounds(format!(
            "selection origin ({}, {}) is negative",
            selection.x, selection.y
        )));
    }

    let origin_x = selection.x as u32;
    let origin_y = selection.y as u32;

    if origin_x >= frame.width() || origin_y >= frame.height() {
        return Err(CaptureError::InvalidBounds(format!(
            "selection origin ({}, {}) lies outside the {}x{} frame",
            origin_x,
            origin_y,
            frame.width(),
            frame.height()
        )));
    }

    let crop_width = selection.width.min(frame.width() - origin_x);
    let crop_height = selection.height.min(frame.height() - origin_y);

    log::debug!(
        "{} cropping {}x{} at ({}, {}) from {}x{}",
        LOG_TAG_CAPTURE,
        crop_width,
        crop_height,
        origin_x,
        origin_y,
        frame.width(),
        frame.height()
    );

    Ok(image::imageops::crop_imm(frame, origin_x, origin_y, crop_width, crop_height).to_image())
}
