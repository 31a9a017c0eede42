//! Redraw coalescing.
//!
//! State mutations only mark a frame as wanted. The host asks the browser for
//! an animation frame the first time a frame is wanted and renders once when
//! it fires, so a burst of mutations between two display refreshes costs one
//! full-grid repaint.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameScheduler {
    pending: bool,
    requested: u64,
    presented: u64,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a redraw as wanted.
    ///
    /// Returns `true` only when no frame was pending, i.e. when the host must
    /// request a new animation frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.requested += 1;
        true
    }

    /// Consume the pending flag at frame time. Returns whether a redraw is due.
    pub fn take(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.presented += 1;
        true
    }

    /// Drop a pending frame without presenting it (e.g. on dispose).
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Animation frames requested from the host so far.
    #[must_use]
    pub fn frames_requested(&self) -> u64 {
        self.requested
    }

    /// Frames actually presented so far.
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.presented
    }
}
