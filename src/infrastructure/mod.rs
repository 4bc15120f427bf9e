mod screenshot_store;

pub use screenshot_store::ScreenshotStore;
