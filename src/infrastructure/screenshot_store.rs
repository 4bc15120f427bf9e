use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::models::EncodedImage;
use crate::global_constants::{LOG_TAG_STORE, SCREENSHOT_FILE_PREFIX};

/// Writes screenshots into the user's pictures directory as
/// `screenshot-<purpose>-<epoch-millis>.png`. Failures are logged and
/// surface as `None`; the caller shows that as "nothing was saved".
pub struct ScreenshotStore {
    base_dir: PathBuf,
}

impl ScreenshotStore {
    pub fn in_pictures_dir() -> Self {
        let base_dir = dirs::picture_dir().unwrap_or_else(|| {
            log::warn!(
                "{} no pictures directory on this system, falling back to temp",
                LOG_TAG_STORE
            );
            std::env::temp_dir()
        });
        Self { base_dir }
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub async fn save(&self, image: &EncodedImage, purpose: &str) -> Option<PathBuf> {
        let epoch_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);

        let file_path = self.base_dir.join(format!(
            "{}-{}-{}.png",
            SCREENSHOT_FILE_PREFIX, purpose, epoch_millis
        ));

        if let Err(error) = tokio::fs::create_dir_all(&self.base_dir).await {
            log::error!(
                "{} failed to create {:?}: {}",
                LOG_TAG_STORE,
                self.base_dir,
                error
            );
            return None;
        }

        match tokio::fs::write(&file_path, image.as_bytes()).await {
            Ok(()) => {
                log::info!("{} saved screenshot to {:?}", LOG_TAG_STORE, file_path);
                Some(file_path)
            }
            Err(error) => {
                log::error!(
                    "{} failed to write {:?}: {}",
                    LOG_TAG_STORE,
                    file_path,
                    error
                );
                None
            }
        }
    }
}
