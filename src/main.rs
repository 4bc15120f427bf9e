mod adapters;
mod app;
mod core;
mod global_constants;
mod infrastructure;
mod ports;

use std::sync::Arc;

use crate::adapters::{OllamaChatClient, TesseractTextExtractor};
use crate::app::App;
use crate::core::interfaces::ports::{OverlaySurface, SourceEnumerator};
use crate::core::orchestrators::ExplainPipeline;
use crate::core::region_capturer::RegionCapturer;
use crate::infrastructure::ScreenshotStore;
use crate::ports::{SharedOverlayHandle, XcapSourceEnumerator};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!(
        "{} starting {}",
        global_constants::LOG_TAG_MAIN,
        global_constants::APPLICATION_NAME
    );
    println!("{}", global_constants::STARTUP_BANNER);

    let overlay = Arc::new(SharedOverlayHandle::detached());
    let enumerator = Arc::new(XcapSourceEnumerator::initialize());
    let capturer = Arc::new(RegionCapturer::new(
        Arc::clone(&overlay) as Arc<dyn OverlaySurface>,
        Arc::clone(&enumerator) as Arc<dyn SourceEnumerator>,
    ));

    let text_extractor = Arc::new(TesseractTextExtractor::build()?);
    let chat_model = Arc::new(OllamaChatClient::new());

    let pipeline = ExplainPipeline::build(Arc::clone(&capturer), text_extractor, chat_model);

    let app = App::build(
        pipeline,
        capturer,
        enumerator,
        overlay,
        ScreenshotStore::in_pictures_dir(),
    );

    app.run_stdio_loop().await
}
