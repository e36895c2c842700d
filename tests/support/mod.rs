use std::time::Duration;

use cardreel::{
    Card, ManualScheduler, Reel, ReelConfig, Span, StripLayout, Surface, SurfaceError,
};

/// Deterministic surface for behaviour tests: a `StripLayout` with a
/// switch that makes every probe fail, standing in for a render tree whose
/// geometry has gone bad.
pub struct TestSurface {
    pub layout: StripLayout,
    pub fail_probes: bool,
}

impl TestSurface {
    pub fn new(widths: Vec<f32>, gap: f32, viewport: Span) -> Self {
        let mut layout = StripLayout::new(widths, gap);
        layout.set_viewport(viewport);
        Self {
            layout,
            fail_probes: false,
        }
    }

    /// Rendered left edge per card, as `(card, left)` in visual order.
    pub fn rendered_lefts(&self) -> Vec<(usize, f32)> {
        (0..self.layout.card_count())
            .map(|slot| {
                (
                    self.layout.slot_card(slot).unwrap(),
                    self.layout.card_bounds(slot).unwrap().left,
                )
            })
            .collect()
    }
}

impl Surface for TestSurface {
    fn card_count(&self) -> usize {
        self.layout.card_count()
    }

    fn container(&self) -> Result<Span, SurfaceError> {
        if self.fail_probes {
            return Err(SurfaceError::Degenerate("container"));
        }
        self.layout.container()
    }

    fn card_bounds(&self, slot: usize) -> Result<Span, SurfaceError> {
        if self.fail_probes {
            return Err(SurfaceError::Degenerate("card"));
        }
        self.layout.card_bounds(slot)
    }

    fn gap(&self) -> Result<f32, SurfaceError> {
        if self.fail_probes {
            return Err(SurfaceError::Degenerate("gap"));
        }
        self.layout.gap()
    }

    fn move_to_tail(&mut self, slot: usize) -> Result<(), SurfaceError> {
        self.layout.move_to_tail(slot)
    }

    fn move_to_head(&mut self, slot: usize) -> Result<(), SurfaceError> {
        self.layout.move_to_head(slot)
    }

    fn set_translation(&mut self, x: f32) {
        self.layout.set_translation(x);
    }
}

pub type TestReel = Reel<TestSurface, ManualScheduler>;

/// Five 200 px cards with a 20 px gap (pitch 220) in a 660 px viewport,
/// drifting forward at 80 px/s. Cards carry targets `dest/<id>`.
pub fn five_card_reel(cfg: ReelConfig) -> TestReel {
    reel_with(5, 200.0, 20.0, 660.0, cfg)
}

pub fn reel_with(n: usize, width: f32, gap: f32, viewport_w: f32, cfg: ReelConfig) -> TestReel {
    let surface = TestSurface::new(vec![width; n], gap, Span::new(0.0, viewport_w));
    let cards = (0..n as u64)
        .map(|id| Card::with_target(id, format!("dest/{id}")))
        .collect();
    Reel::new(surface, ManualScheduler::new(), cards, cfg)
}

/// Scenario tuneables: full 0.1 s steps are integrated (no dt clamp in the
/// way) at the default forward drift.
pub fn scenario_config() -> ReelConfig {
    ReelConfig {
        max_frame_dt: 0.1,
        ..ReelConfig::default()
    }
}

/// Advance virtual time by `dt` per frame and fire the pending frame,
/// `steps` times. Stops early if the loop parks itself.
pub fn run_frames(reel: &mut TestReel, steps: usize, dt: Duration) {
    for _ in 0..steps {
        reel.scheduler_mut().advance(dt);
        let Some(token) = reel.pending_frame() else {
            break;
        };
        reel.frame(token);
    }
}
