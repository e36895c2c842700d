use std::time::{Duration, Instant};

/// Identifies one scheduled frame; a stale token is ignored by the driver.
pub type FrameToken = u64;

/// The frame source the animation loop runs on. `schedule` requests a
/// single callback slot ("yield until next frame") and `cancel` revokes it;
/// `now` is the clock frames are timed against, so a fake scheduler can run
/// the whole widget on virtual time.
pub trait FrameScheduler {
    fn schedule(&mut self) -> FrameToken;
    fn cancel(&mut self, token: FrameToken);
    fn now(&self) -> Instant;
}

/* ───────────────────────── manual scheduler ─────────────────────── */

/// Deterministic scheduler: the caller advances the clock and fires pending
/// frames by hand. Used by the tests and any headless host.
#[derive(Clone, Debug)]
pub struct ManualScheduler {
    epoch: Instant,
    elapsed: Duration,
    next_token: FrameToken,
    pending: Option<FrameToken>,
    pub scheduled: usize,
    pub canceled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            elapsed: Duration::ZERO,
            next_token: 0,
            pending: None,
            scheduled: 0,
            canceled: 0,
        }
    }

    /// Move virtual time forward.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    #[inline]
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> FrameToken {
        self.next_token += 1;
        self.pending = Some(self.next_token);
        self.scheduled += 1;
        self.next_token
    }

    fn cancel(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
        self.canceled += 1;
    }

    fn now(&self) -> Instant {
        self.epoch + self.elapsed
    }
}
