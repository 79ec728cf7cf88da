use crate::host::FrameRequester;

/// Dirty flag plus at most one outstanding frame request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    dirty: bool,
    pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark dirty and ask the host for a frame unless one is already on its way.
    pub fn request(&mut self, host: &mut dyn FrameRequester) {
        self.dirty = true;
        if self.pending {
            tracing::trace!("frame already pending");
            return;
        }
        self.pending = true;
        tracing::debug!("requesting frame");
        host.request_frame();
    }

    /// Called when the host delivers the frame. Returns whether a repaint is due, and clears
    /// both flags.
    pub fn begin_frame(&mut self) -> bool {
        let due = self.dirty;
        self.pending = false;
        self.dirty = false;
        due
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
