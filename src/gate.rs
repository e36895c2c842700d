/// Fraction of the strip that must intersect the viewport for the loop to
/// run.
pub const DEFAULT_INTERSECTION_THRESHOLD: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateCommand {
    Start,
    Stop,
}

/// Turns viewport-intersection and page-visibility signals into start/stop
/// commands for the animation driver.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityGate {
    threshold: f32,
    in_view: bool,
    page_visible: bool,
}

impl VisibilityGate {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            in_view: false,
            page_visible: true,
        }
    }

    #[inline]
    pub fn page_visible(&self) -> bool {
        self.page_visible
    }

    #[inline]
    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Viewport-intersection callback with the currently visible fraction.
    pub fn set_intersection(&mut self, fraction: f32) -> GateCommand {
        self.in_view = fraction >= self.threshold;
        if self.in_view {
            GateCommand::Start
        } else {
            GateCommand::Stop
        }
    }

    /// Page-visibility callback. Resuming on `true` does NOT consult
    /// `in_view`: a hidden→visible transition always restarts the loop,
    /// even for a strip scrolled out of the viewport.
    pub fn set_page_visible(&mut self, visible: bool) -> GateCommand {
        self.page_visible = visible;
        if visible {
            GateCommand::Start
        } else {
            GateCommand::Stop
        }
    }
}
