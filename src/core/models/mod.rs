mod capture_source;
mod chat;
mod encoded_image;
mod selection_bounds;

pub use capture_source::{CaptureSource, ThumbnailSize};
pub use chat::{ChatMessage, ExplainOutcome};
pub use encoded_image::EncodedImage;
pub use selection_bounds::SelectionBounds;
