use anyhow::{Context, Result};
use async_trait::async_trait;
use image::{DynamicImage, RgbaImage};

use crate::core::interfaces::ports::SourceEnumerator;
use crate::core::models::{CaptureSource, EncodedImage, ThumbnailSize};
use crate::global_constants::{
    FALLBACK_THUMBNAIL_HEIGHT, FALLBACK_THUMBNAIL_WIDTH, LOG_TAG_ENUMERATOR,
};

/// Screen enumeration backed by xcap monitors.
///
/// Some display backends (Wayland compositors in particular) reject capture
/// requests inconsistently depending on the requested thumbnail shape, so a
/// single attempt is not enough: attempts descend a fixed ladder of hints
/// until one succeeds or the ladder is exhausted.
pub struct XcapSourceEnumerator;

impl XcapSourceEnumerator {
    pub fn initialize() -> Self {
        log::debug!("{} initializing xcap source enumerator", LOG_TAG_ENUMERATOR);
        Self
    }

    fn attempt_enumeration(&self, hint: Option<ThumbnailSize>) -> Result<Vec<CaptureSource>> {
        let monitors = xcap::Monitor::all().context("failed to list monitors")?;
        if monitors.is_empty() {
            anyhow::bail!("backend reported zero monitors");
        }

        let mut sources = Vec::with_capacity(monitors.len());
        for monitor in monitors {
            let id = monitor.id().context("failed to read monitor id")?;
            let name = monitor
                .name()
                .unwrap_or_else(|_| format!("Screen {}", id));

            let frame = monitor
                .capture_image()
                .with_context(|| format!("failed to capture frame of monitor '{}'", name))?;
            let frame = fit_frame_to_hint(frame, hint);
            let thumbnail =
                EncodedImage::encode_rgba(&frame).context("failed to encode monitor thumbnail")?;

            sources.push(CaptureSource::new(id.to_string(), name, thumbnail));
        }

        Ok(sources)
    }
}

#[async_trait]
impl SourceEnumerator for XcapSourceEnumerator {
    async fn enumerate_sources(&self, preferred: Option<ThumbnailSize>) -> Vec<CaptureSource> {
        let ladder = build_attempt_ladder(preferred);
        enumerate_with_ladder(ladder, |hint| self.attempt_enumeration(hint))
    }

    fn native_screen_size(&self) -> Option<ThumbnailSize> {
        let monitors = match xcap::Monitor::all() {
            Ok(monitors) => monitors,
            Err(error) => {
                log::warn!(
                    "{} failed to list monitors for native size: {}",
                    LOG_TAG_ENUMERATOR,
                    error
                );
                return None;
            }
        };

        let primary = monitors
            .iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| monitors.first())?;

        match (primary.width(), primary.height()) {
            (Ok(width), Ok(height)) => Some(ThumbnailSize::new(width, height)),
            _ => None,
        }
    }
}

/// Order of enumeration attempts: caller-preferred resolution first, then a
/// fixed reduced resolution, then no hint at all (backend default).
pub(crate) fn build_attempt_ladder(
    preferred: Option<ThumbnailSize>,
) -> Vec<Option<ThumbnailSize>> {
    let mut ladder = Vec::with_capacity(3);
    if let Some(size) = preferred {
        ladder.push(Some(size));
    }
    ladder.push(Some(ThumbnailSize::new(
        FALLBACK_THUMBNAIL_WIDTH,
        FALLBACK_THUMBNAIL_HEIGHT,
    )));
    ladder.push(None);
    ladder
}

/// Run `attempt` for each rung in order, returning the first success. All
/// rungs failing yields an empty list, which callers read as "capture
/// unavailable".
pub(crate) fn enumerate_with_ladder<F>(
    ladder: Vec<Option<ThumbnailSize>>,
    mut attempt: F,
) -> Vec<CaptureSource>
where
    F: FnMut(Option<ThumbnailSize>) -> Result<Vec<CaptureSource>>,
{
    for hint in ladder {
        match attempt(hint) {
            Ok(sources) => {
                log::info!(
                    "{} enumeration succeeded with hint {:?}: {} source(s)",
                    LOG_TAG_ENUMERATOR,
                    hint,
                    sources.len()
                );
                return sources;
            }
            Err(error) => {
                log::warn!(
                    "{} enumeration attempt with hint {:?} failed: {}",
                    LOG_TAG_ENUMERATOR,
                    hint,
                    error
                );
            }
        }
    }

    log::error!(
        "{} all enumeration attempts failed, capture unavailable",
        LOG_TAG_ENUMERATOR
    );
    Vec::new()
}

/// Downscale the frame to fit the hint, preserving aspect ratio. A hint at
/// or above the frame size leaves the frame untouched, so a native-sized
/// hint returns the full-resolution capture.
fn fit_frame_to_hint(frame: RgbaImage, hint: Option<ThumbnailSize>) -> RgbaImage {
    match hint {
        Some(size) if size.width < frame.width() || size.height < frame.height() => {
            DynamicImage::ImageRgba8(frame)
                .thumbnail(size.width, size.height)
                .to_rgba8()
        }
        _ => frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_hint(width: u32, height: u32) -> Option<ThumbnailSize> {
        Some(ThumbnailSize::new(width, height))
    }

    fn dummy_source() -> CaptureSource {
        CaptureSource::new(
            "1".to_string(),
            "Screen".to_string(),
            EncodedImage::from_png_bytes(vec![0]),
        )
    }

    #[test]
    fn test_ladder_descends_from_preferred_to_reduced_to_no_hint() {
        let ladder = build_attempt_ladder(sized_hint(2560, 1440));

        assert_eq!(
            ladder,
            vec![
                sized_hint(2560, 1440),
                sized_hint(FALLBACK_THUMBNAIL_WIDTH, FALLBACK_THUMBNAIL_HEIGHT),
                None,
            ]
        );
    }

    #[test]
    fn test_ladder_without_preference_starts_at_the_reduced_rung() {
        let ladder = build_attempt_ladder(None);

        assert_eq!(
            ladder,
            vec![
                sized_hint(FALLBACK_THUMBNAIL_WIDTH, FALLBACK_THUMBNAIL_HEIGHT),
                None,
            ]
        );
    }

    #[test]
    fn test_third_rung_result_is_returned_when_first_two_fail() {
        let ladder = build_attempt_ladder(sized_hint(1920, 1080));
        let mut attempted_hints = Vec::new();

        let sources = enumerate_with_ladder(ladder, |hint| {
            attempted_hints.push(hint);
            if hint.is_some() {
                anyhow::bail!("backend rejected hint")
            }
            Ok(vec![dummy_source()])
        });

        assert_eq!(sources.len(), 1);
        assert_eq!(
            attempted_hints,
            vec![
                sized_hint(1920, 1080),
                sized_hint(FALLBACK_THUMBNAIL_WIDTH, FALLBACK_THUMBNAIL_HEIGHT),
                None,
            ]
        );
    }

    #[test]
    fn test_exhausted_ladder_yields_empty_list() {
        let ladder = build_attempt_ladder(None);

        let sources =
            enumerate_with_ladder(ladder, |_hint| anyhow::bail!("backend unavailable"));

        assert!(sources.is_empty());
    }

    #[test]
    fn test_first_success_stops_the_ladder() {
        let ladder = build_attempt_ladder(sized_hint(1024, 768));
        let mut attempts = 0;

        let sources = enumerate_with_ladder(ladder, |_hint| {
            attempts += 1;
            Ok(vec![dummy_source()])
        });

        assert_eq!(sources.len(), 1);
        assert_eq!(attempts, 1);
    }

    #[test]
    fn test_fit_frame_downscales_only_when_hint_is_smaller() {
        let frame = RgbaImage::from_pixel(200, 100, image::Rgba([0, 0, 0, 255]));

        let untouched = fit_frame_to_hint(frame.clone(), sized_hint(400, 400));
        assert_eq!((untouched.width(), untouched.height()), (200, 100));

        let scaled = fit_frame_to_hint(frame, sized_hint(100, 100));
        assert_eq!((scaled.width(), scaled.height()), (100, 50));
    }
}
