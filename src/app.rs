use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::core::interfaces::ports::SourceEnumerator;
use crate::core::models::{EncodedImage, ExplainOutcome, SelectionBounds};
use crate::core::orchestrators::ExplainPipeline;
use crate::core::region_capturer::RegionCapturer;
use crate::global_constants::LOG_TAG_APP;
use crate::infrastructure::ScreenshotStore;
use crate::ports::SharedOverlayHandle;

/// One capturable screen as presented to the embedding surface, thumbnail
/// included as base64 PNG so it survives the JSON transport.
#[derive(Debug, Serialize)]
pub struct SourceDescriptor {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
}

/// Boundary operations the presentation process can invoke, one JSON object
/// per line on stdin.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum BoundaryRequest {
    GetScreenSources,
    #[serde(rename_all = "camelCase")]
    CaptureArea {
        #[serde(default)]
        source_id: Option<String>,
        bounds: SelectionBounds,
    },
    #[serde(rename_all = "camelCase")]
    CaptureFullscreen {
        #[serde(default)]
        source_id: Option<String>,
    },
    ExplainSelection {
        bounds: Option<SelectionBounds>,
    },
    AskAi {
        prompt: String,
    },
    #[serde(rename_all = "camelCase")]
    SaveScreenshot {
        png_base64: String,
    },
    #[serde(rename_all = "camelCase")]
    OverlayState {
        attached: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BoundaryReply {
    Sources(Vec<SourceDescriptor>),
    SavedPath(Option<PathBuf>),
    Explanation(ExplainOutcome),
    Answer(String),
    Acknowledged(bool),
}

/// Wires the pipeline and its collaborators to the boundary operations.
pub struct App {
    pipeline: ExplainPipeline,
    capturer: Arc<RegionCapturer>,
    enumerator: Arc<dyn SourceEnumerator>,
    overlay_handle: Arc<SharedOverlayHandle>,
    screenshot_store: ScreenshotStore,
}

impl App {
    pub fn build(
        pipeline: ExplainPipeline,
        capturer: Arc<RegionCapturer>,
        enumerator: Arc<dyn SourceEnumerator>,
        overlay_handle: Arc<SharedOverlayHandle>,
        screenshot_store: ScreenshotStore,
    ) -> Self {
        Self {
            pipeline,
            capturer,
            enumerator,
            overlay_handle,
            screenshot_store,
        }
    }

    pub async fn get_screen_sources(&self) -> Vec<SourceDescriptor> {
        let sources = self.enumerator.enumerate_sources(None).await;
        log::info!(
            "{} get-screen-sources returning {} source(s)",
            LOG_TAG_APP,
            sources.len()
        );

        sources
            .into_iter()
            .map(|source| SourceDescriptor {
                id: source.id,
                name: source.name,
                thumbnail: base64::engine::general_purpose::STANDARD
                    .encode(source.thumbnail.as_bytes()),
            })
            .collect()
    }

    /// `source_id` is accepted for interface compatibility but the first
    /// enumerated screen is always captured.
    pub async fn capture_area(
        &self,
        source_id: Option<String>,
        bounds: SelectionBounds,
    ) -> Option<PathBuf> {
        if let Some(id) = source_id {
            log::debug!("{} capture-area ignoring source id '{}'", LOG_TAG_APP, id);
        }

        match self.capturer.capture_region(Some(&bounds)).await {
            Ok(image) => self.screenshot_store.save(&image, "area").await,
            Err(error) => {
                log::error!("{} capture-area failed: {}", LOG_TAG_APP, error);
                None
            }
        }
    }

    pub async fn capture_fullscreen(&self, source_id: Option<String>) -> Option<PathBuf> {
        if let Some(id) = source_id {
            log::debug!(
                "{} capture-fullscreen ignoring source id '{}'",
                LOG_TAG_APP,
                id
            );
        }

        match self.capturer.capture_region(None).await {
            Ok(image) => self.screenshot_store.save(&image, "fullscreen").await,
            Err(error) => {
                log::error!("{} capture-fullscreen failed: {}", LOG_TAG_APP, error);
                None
            }
        }
    }

    pub async fn explain_selection(&self, bounds: Option<SelectionBounds>) -> ExplainOutcome {
        self.pipeline.explain_selection(bounds.as_ref()).await
    }

    pub async fn ask_ai(&self, prompt: &str) -> String {
        self.pipeline.ask_freeform(prompt).await
    }

    pub async fn save_screenshot(&self, png_base64: &str) -> Option<PathBuf> {
        let png_bytes = match base64::engine::general_purpose::STANDARD.decode(png_base64) {
            Ok(bytes) => bytes,
            Err(error) => {
                log::error!(
                    "{} save-screenshot received invalid base64: {}",
                    LOG_TAG_APP,
                    error
                );
                return None;
            }
        };

        self.screenshot_store
            .save(&EncodedImage::from_png_bytes(png_bytes), "manual")
            .await
    }

    pub async fn dispatch(&self, request: BoundaryRequest) -> BoundaryReply {
        match request {
            BoundaryRequest::GetScreenSources => {
                BoundaryReply::Sources(self.get_screen_sources().await)
            }
            BoundaryRequest::CaptureArea { source_id, bounds } => {
                BoundaryReply::SavedPath(self.capture_area(source_id, bounds).await)
            }
            BoundaryRequest::CaptureFullscreen { source_id } => {
                BoundaryReply::SavedPath(self.capture_fullscreen(source_id).await)
            }
            BoundaryRequest::ExplainSelection { bounds } => {
                BoundaryReply::Explanation(self.explain_selection(bounds).await)
            }
            BoundaryRequest::AskAi { prompt } => {
                BoundaryReply::Answer(self.ask_ai(&prompt).await)
            }
            BoundaryRequest::SaveScreenshot { png_base64 } => {
                BoundaryReply::SavedPath(self.save_screenshot(&png_base64).await)
            }
            BoundaryRequest::OverlayState { attached } => {
                self.overlay_handle.set_attached(attached);
                BoundaryReply::Acknowledged(true)
            }
        }
    }

    /// Serve boundary requests as line-delimited JSON over stdin/stdout
    /// until stdin closes.
    pub async fn run_stdio_loop(&self) -> Result<()> {
        let mut request_lines = BufReader::new(tokio::io::stdin()).lines();
        let mut reply_stream = tokio::io::stdout();

        while let Some(line) = request_lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let reply_json = match serde_json::from_str::<BoundaryRequest>(line) {
                Ok(request) => serde_json::to_string(&self.dispatch(request).await)?,
                Err(error) => {
                    log::warn!("{} unrecognized request: {}", LOG_TAG_APP, error);
                    serde_json::to_string(
                        &serde_json::json!({ "error": format!("unrecognized request: {}", error) }),
                    )?
                }
            };

            reply_stream.write_all(reply_json.as_bytes()).await?;
            reply_stream.write_all(b"\n").await?;
            reply_stream.flush().await?;
        }

        log::info!("{} stdin closed, shutting down", LOG_TAG_APP);
        Ok(())
    }
}
