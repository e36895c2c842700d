use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::gate::{GateCommand, VisibilityGate, DEFAULT_INTERSECTION_THRESHOLD};
use crate::input::{Gesture, InputController, CLICK_THRESHOLD_PX, WHEEL_MULTIPLIER, WHEEL_QUIET};
use crate::model::{Card, OffsetModel, Sequence};
use crate::recycle::{self, RecyclePass};
use crate::sched::{FrameScheduler, FrameToken};
use crate::surface::{Surface, SurfaceError};

/* ───────────────────────── tuneables ────────────────────────────── */

// Default passive drift in px/s; positive drifts the contents left.
pub const DEFAULT_VELOCITY: f32 = 80.0;

// Per-frame dt clamp so a stalled tab cannot produce a position jump.
pub const MAX_FRAME_DT: f32 = 0.04;

/// Tuneables for one reel instance.
#[derive(Clone, Debug)]
pub struct ReelConfig {
    pub velocity: f32,
    pub click_threshold: f32,
    pub wheel_multiplier: f32,
    pub wheel_quiet: Duration,
    pub max_frame_dt: f32,
    pub intersection_threshold: f32,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            click_threshold: CLICK_THRESHOLD_PX,
            wheel_multiplier: WHEEL_MULTIPLIER,
            wheel_quiet: WHEEL_QUIET,
            max_frame_dt: MAX_FRAME_DT,
            intersection_threshold: DEFAULT_INTERSECTION_THRESHOLD,
        }
    }
}

/* ───────────────────────── the reel ─────────────────────────────── */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DriverState {
    Stopped,
    Running,
}

/// One infinite-track instance. Owns its offset state, card order, drag
/// session, visibility gate and frame scheduling; two reels on one screen
/// share nothing. The surface renders the cards; the reel only reorders
/// them and pushes a single 1-D translation.
pub struct Reel<S: Surface, F: FrameScheduler> {
    surface: S,
    sched: F,
    seq: Sequence,
    offset: OffsetModel,
    input: InputController,
    gate: VisibilityGate,
    state: DriverState,
    pending: Option<FrameToken>,
    last_tick: Option<Instant>,
    max_frame_dt: f32,
}

impl<S: Surface, F: FrameScheduler> Reel<S, F> {
    /// Build a reel over an already-rendered surface. `cards` must match
    /// the surface's card count and initial order, head first.
    pub fn new(surface: S, sched: F, cards: Vec<Card>, cfg: ReelConfig) -> Self {
        debug_assert_eq!(cards.len(), surface.card_count());
        Self {
            surface,
            sched,
            seq: Sequence::new(cards),
            offset: OffsetModel::new(cfg.velocity),
            input: InputController::new(cfg.click_threshold, cfg.wheel_multiplier, cfg.wheel_quiet),
            gate: VisibilityGate::new(cfg.intersection_threshold),
            state: DriverState::Stopped,
            pending: None,
            last_tick: None,
            max_frame_dt: cfg.max_frame_dt,
        }
    }

    /* ─────────────── animation driver ─────────────── */

    /// Start the frame loop. Idempotent.
    pub fn start(&mut self) {
        if self.state == DriverState::Running {
            return;
        }
        debug!("reel started");
        self.state = DriverState::Running;
        self.last_tick = Some(self.sched.now());
        self.pending = Some(self.sched.schedule());
    }

    /// Stop the frame loop and revoke any pending frame. Idempotent.
    pub fn stop(&mut self) {
        if self.state == DriverState::Stopped {
            return;
        }
        debug!("reel stopped");
        if let Some(token) = self.pending.take() {
            self.sched.cancel(token);
        }
        self.state = DriverState::Stopped;
    }

    /// One scheduled frame. Fires only for the live token, so a canceled
    /// or superseded frame is a no-op. The loop never self-terminates on
    /// error: a failing step freezes the drift via `paused` while frames
    /// keep coming, leaving the strip frozen but never corrupted.
    pub fn frame(&mut self, token: FrameToken) {
        if self.state != DriverState::Running || self.pending != Some(token) {
            return;
        }
        self.pending = None;

        let now = self.sched.now();
        let dt = self
            .last_tick
            .map(|t| (now - t).as_secs_f32())
            .unwrap_or(0.0)
            .min(self.max_frame_dt);
        self.last_tick = Some(now);

        // Hidden tab: park the loop entirely; the visibility gate restarts
        // it later.
        if !self.gate.page_visible() {
            self.stop();
            return;
        }

        self.input.poll(now, &mut self.offset);

        match self.step(dt) {
            Ok(pass) => {
                if pass.hit_cap {
                    warn!(
                        recycled = pass.total(),
                        "recycle cap reached in one frame"
                    );
                }
            }
            Err(err) => {
                error!(%err, "frame step failed; drift paused");
                self.offset.paused = true;
            }
        }

        self.pending = Some(self.sched.schedule());
    }

    /// Advance the offset and recycle exited cards. Any geometry failure
    /// surfaces here as an `Err` for the driver to absorb.
    fn step(&mut self, dt: f32) -> Result<RecyclePass, SurfaceError> {
        if self.offset.advance(dt) {
            self.surface.set_translation(self.offset.x());
        }
        recycle::run_pass(&mut self.surface, &mut self.seq, &mut self.offset)
    }

    /* ─────────────── visibility ─────────────── */

    /// Viewport-intersection signal (fraction of the strip visible).
    pub fn set_intersection(&mut self, fraction: f32) {
        match self.gate.set_intersection(fraction) {
            GateCommand::Start => self.start(),
            GateCommand::Stop => self.stop(),
        }
    }

    /// Page/tab visibility signal.
    pub fn set_page_visible(&mut self, visible: bool) {
        match self.gate.set_page_visible(visible) {
            GateCommand::Start => self.start(),
            GateCommand::Stop => self.stop(),
        }
    }

    /* ─────────────── input ─────────────── */

    /// Pointer press at `pointer_x` (same coordinate space as the probes).
    pub fn pointer_down(&mut self, pointer_x: f32) {
        let pressed = self.card_at(pointer_x);
        self.input.press(pointer_x, pressed, &mut self.offset);
    }

    /// Pointer move; applies the dragged offset to the surface at once.
    pub fn pointer_move(&mut self, pointer_x: f32) {
        if self.input.drag_to(pointer_x, &mut self.offset) {
            self.surface.set_translation(self.offset.x());
        }
    }

    /// Pointer release. A click-classified gesture on a card with a
    /// navigation target returns that target for the host to follow.
    pub fn pointer_up(&mut self) -> Option<String> {
        let gesture = self.input.release(&mut self.offset)?;
        self.resolve_navigation(gesture)
    }

    /// Pointer cancel: handled like a release with the last known travel.
    pub fn pointer_cancel(&mut self) -> Option<String> {
        let gesture = self.input.cancel(&mut self.offset)?;
        self.resolve_navigation(gesture)
    }

    /// Wheel input; the offset change lands on the surface immediately,
    /// never waiting for the next frame.
    pub fn wheel(&mut self, dx: f32, dy: f32) {
        let now = self.sched.now();
        self.input.poll(now, &mut self.offset);
        if self.input.wheel(dx, dy, now, &mut self.offset) {
            self.surface.set_translation(self.offset.x());
        }
    }

    /// Hover gates passive drift only; drag and wheel stay live.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.offset.paused = hovered;
    }

    /// Keyboard focus pauses exactly like hover.
    pub fn set_focused(&mut self, focused: bool) {
        self.offset.paused = focused;
    }

    fn resolve_navigation(&self, gesture: Gesture) -> Option<String> {
        match gesture {
            Gesture::Click { card } => self.seq.find(card).and_then(|c| c.target.clone()),
            Gesture::Drag => None,
        }
    }

    /// Card under `pointer_x`, by live probe. A failing probe reads as no
    /// card; a press still opens a drag session either way.
    fn card_at(&self, pointer_x: f32) -> Option<u64> {
        for slot in 0..self.seq.len() {
            match self.surface.card_bounds(slot) {
                Ok(span) if span.contains(pointer_x) => {
                    return self.seq.get(slot).map(|c| c.id)
                }
                Ok(_) => {}
                Err(_) => return None,
            }
        }
        None
    }

    /* ─────────────── accessors ─────────────── */

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    #[inline]
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending
    }

    #[inline]
    pub fn offset_x(&self) -> f32 {
        self.offset.x()
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.offset.velocity()
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.offset.paused
    }

    #[inline]
    pub fn dragging(&self) -> bool {
        self.offset.dragging
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.seq.len()
    }

    /// Card ids in current visual order, head first.
    pub fn card_ids(&self) -> Vec<u64> {
        self.seq.ids()
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[inline]
    pub fn scheduler(&self) -> &F {
        &self.sched
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.sched
    }
}
