use std::time::{Duration, Instant};

use crate::model::{DragSession, OffsetModel};

/* ───────────────────────── tuneables ────────────────────────────── */

// Press-to-release travel below this is a click, not a drag.
pub const CLICK_THRESHOLD_PX: f32 = 6.0;

// Wheel delta → strip pixels.
pub const WHEEL_MULTIPLIER: f32 = 1.5;

// Quiet period after the last wheel event before drift direction resets.
pub const WHEEL_QUIET: Duration = Duration::from_millis(700);

/* ───────────────────────── gestures ─────────────────────────────── */

/// Classification of a finished pointer gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Travel stayed under the click threshold with a card under the press.
    Click { card: u64 },
    Drag,
}

/// Interprets pointer and wheel input into offset/velocity changes. The
/// controller mutates the offset model; the caller re-applies the surface
/// translation whenever a method reports a change, so the rendered
/// transform never lags the offset.
#[derive(Clone, Debug)]
pub struct InputController {
    click_threshold: f32,
    wheel_multiplier: f32,
    wheel_quiet: Duration,
    drag: Option<DragSession>,
    wheel_restore_at: Option<Instant>,
}

impl InputController {
    pub fn new(click_threshold: f32, wheel_multiplier: f32, wheel_quiet: Duration) -> Self {
        Self {
            click_threshold,
            wheel_multiplier,
            wheel_quiet,
            drag: None,
            wheel_restore_at: None,
        }
    }

    #[inline]
    pub fn session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Pointer down: open a drag session and freeze passive drift.
    pub fn press(&mut self, pointer_x: f32, pressed_card: Option<u64>, offset: &mut OffsetModel) {
        self.drag = Some(DragSession::begin(pointer_x, offset.x(), pressed_card));
        offset.dragging = true;
        offset.paused = true;
    }

    /// Pointer move while a session is open. Sets the offset directly from
    /// the press-time base, bypassing velocity integration; dragging right
    /// moves the strip right. Returns whether the offset changed.
    pub fn drag_to(&mut self, pointer_x: f32, offset: &mut OffsetModel) -> bool {
        let Some(session) = self.drag.as_mut() else {
            return false;
        };
        let dx = pointer_x - session.start_pointer_x;
        session.moved = dx.abs();
        offset.set_absolute(session.start_offset_x - dx);
        true
    }

    /// Pointer up: close the session and classify it.
    pub fn release(&mut self, offset: &mut OffsetModel) -> Option<Gesture> {
        let session = self.drag.take()?;
        offset.dragging = false;
        offset.paused = false;
        match session.pressed_card {
            Some(card) if session.moved < self.click_threshold => Some(Gesture::Click { card }),
            _ => Some(Gesture::Drag),
        }
    }

    /// Pointer cancel: same as release, using the last known travel.
    pub fn cancel(&mut self, offset: &mut OffsetModel) -> Option<Gesture> {
        self.release(offset)
    }

    /// Wheel input. Takes the dominant axis delta, scales it onto the
    /// offset, points the drift in the wheel direction, and re-arms the
    /// quiet-period deadline. Returns whether the offset changed.
    pub fn wheel(&mut self, dx: f32, dy: f32, now: Instant, offset: &mut OffsetModel) -> bool {
        let delta = if dx.abs() > dy.abs() { dx } else { dy };
        if delta == 0.0 || !delta.is_finite() {
            return false;
        }
        offset.set_absolute(offset.x() + delta * self.wheel_multiplier);
        offset.set_direction(delta);
        self.wheel_restore_at = Some(now + self.wheel_quiet);
        true
    }

    /// Expire the wheel quiet period: once no wheel input has arrived for
    /// the configured window, drift returns to its forward direction.
    pub fn poll(&mut self, now: Instant, offset: &mut OffsetModel) {
        if let Some(deadline) = self.wheel_restore_at {
            if now >= deadline {
                self.wheel_restore_at = None;
                offset.restore_forward();
            }
        }
    }
}
