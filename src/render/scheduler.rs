/// Host hook for "call me again on the next display refresh".
///
/// The renderer calls [`FrameScheduler::request_frame`] at most once per tick; the host is
/// expected to invoke [`crate::RibbonRenderer::tick`] once for every request it honours.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Counting scheduler for headless hosts and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameQueue {
    pending: u64,
    requested_total: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding requests not yet consumed by [`FrameQueue::take`].
    pub fn pending(&self) -> u64 {
        self.pending
    }

    /// Requests ever made.
    pub fn requested_total(&self) -> u64 {
        self.requested_total
    }

    /// Consume one pending request; `false` when none is pending.
    pub fn take(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.pending = self.pending.saturating_add(1);
        self.requested_total = self.requested_total.saturating_add(1);
    }
}
