mod shared_overlay_handle;
mod xcap_source_enumerator;

pub use shared_overlay_handle::SharedOverlayHandle;
pub use xcap_source_enumerator::XcapSourceEnumerator;
