mod overlay_surface;
mod source_enumerator;

pub use overlay_surface::OverlaySurface;
pub use source_enumerator::SourceEnumerator;
