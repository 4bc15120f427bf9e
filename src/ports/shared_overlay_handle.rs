use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::core::interfaces::ports::OverlaySurface;
use crate::global_constants::LOG_TAG_OVERLAY;

type VisibilityListener = Box<dyn Fn(bool) + Send + Sync>;

/// Process-shared view of the presentation process's overlay window.
///
/// The embedding flips `attached` when the presentation side reports the
/// overlay opened or closed; `show`/`hide` record the desired visibility and
/// notify the registered listener, which is expected to relay the change
/// over the message transport.
pub struct SharedOverlayHandle {
    attached: AtomicBool,
    visible: AtomicBool,
    visibility_listener: Mutex<Option<VisibilityListener>>,
}

impl SharedOverlayHandle {
    /// Handle for a session where no overlay window exists yet.
    pub fn detached() -> Self {
        Self {
            attached: AtomicBool::new(false),
            visible: AtomicBool::new(false),
            visibility_listener: Mutex::new(None),
        }
    }

    /// Record that the presentation process opened or closed the overlay.
    /// A freshly opened overlay starts visible.
    pub fn set_attached(&self, attached: bool) {
        log::info!(
            "{} overlay {}",
            LOG_TAG_OVERLAY,
            if attached { "attached" } else { "detached" }
        );
        self.attached.store(attached, Ordering::SeqCst);
        self.visible.store(attached, Ordering::SeqCst);
    }

    pub fn set_visibility_listener(&self, listener: VisibilityListener) {
        if let Ok(mut guard) = self.visibility_listener.lock() {
            *guard = Some(listener);
        }
    }

    fn notify_listener(&self, visible: bool) {
        if let Ok(guard) = self.visibility_listener.lock() {
            if let Some(listener) = guard.as_ref() {
                listener(visible);
            }
        }
    }
}

impl OverlaySurface for SharedOverlayHandle {
    fn exists(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn show(&self) {
        log::debug!("{} show requested", LOG_TAG_OVERLAY);
        self.visible.store(true, Ordering::SeqCst);
        self.notify_listener(true);
    }

    fn hide(&self) {
        log::debug!("{} hide requested", LOG_TAG_OVERLAY);
        self.visible.store(false, Ordering::SeqCst);
        self.notify_listener(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_detached_handle_reports_no_overlay() {
        let handle = SharedOverlayHandle::detached();

        assert!(!handle.exists());
        assert!(!handle.is_visible());
    }

    #[test]
    fn test_attaching_makes_the_overlay_visible() {
        let handle = SharedOverlayHandle::detached();

        handle.set_attached(true);

        assert!(handle.exists());
        assert!(handle.is_visible());
    }

    #[test]
    fn test_show_and_hide_flip_visibility() {
        let handle = SharedOverlayHandle::detached();
        handle.set_attached(true);

        handle.hide();
        assert!(!handle.is_visible());

        handle.show();
        assert!(handle.is_visible());
    }

    #[test]
    fn test_listener_observes_visibility_changes() {
        let handle = SharedOverlayHandle::detached();
        handle.set_attached(true);

        let notifications = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&notifications);
        handle.set_visibility_listener(Box::new(move |_visible| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        handle.hide();
        handle.show();

        assert_eq!(notifications.load(Ordering::SeqCst), 2);
    }
}
