/// Capability handle for the transparent selection overlay owned by the
/// presentation process.
///
/// The capturer only needs to take the overlay out of the visible frame for
/// the duration of one grab and put it back afterwards, so the surface is
/// abstracted down to these four operations instead of a window handle.
pub trait OverlaySurface: Send + Sync {
    fn exists(&self) -> bool;

    fn is_visible(&self) -> bool;

    fn show(&self);

    fn hide(&self);
}
