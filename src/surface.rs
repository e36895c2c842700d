use thiserror::Error;

/* ───────────────────────── geometry ─────────────────────────────── */

/// Horizontal extent of a card or the container, in the same coordinate
/// space the pointer reports, i.e. after the strip translation is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub left: f32,
    pub right: f32,
}

impl Span {
    #[inline]
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn contains(self, x: f32) -> bool {
        x >= self.left && x < self.right
    }

    /// Non-finite edges or a collapsed width make every downstream
    /// computation meaningless, so they are rejected at the probe boundary.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        !self.left.is_finite() || !self.right.is_finite() || self.width() <= 0.0
    }
}

/* ───────────────────────── errors ───────────────────────────────── */

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("degenerate geometry while probing {0}")]
    Degenerate(&'static str),
    #[error("card slot {0} out of range")]
    BadSlot(usize),
}

/* ───────────────────────── surface trait ────────────────────────── */

/// What the reel needs from a render tree: measure, reorder, translate.
/// Implementations never create or destroy cards; `move_to_*` reparents an
/// existing card to the opposite end of its sibling list. Slots index the
/// *current* visual order, head first.
pub trait Surface {
    fn card_count(&self) -> usize;

    /// Rendered bounds of the container viewport.
    fn container(&self) -> Result<Span, SurfaceError>;

    /// Rendered bounds (translation included) of the card at `slot`.
    fn card_bounds(&self, slot: usize) -> Result<Span, SurfaceError>;

    /// Uniform spacing between adjacent cards.
    fn gap(&self) -> Result<f32, SurfaceError>;

    /// Reparent the card at `slot` to the end of the order.
    fn move_to_tail(&mut self, slot: usize) -> Result<(), SurfaceError>;

    /// Reparent the card at `slot` to the front of the order.
    fn move_to_head(&mut self, slot: usize) -> Result<(), SurfaceError>;

    /// Apply the strip translation; `x` is the leftward magnitude, so the
    /// rendered strip moves by `-x`.
    fn set_translation(&mut self, x: f32);
}

/* ───────────────────────── strip layout ─────────────────────────── */

/// Reference `Surface` for hosts that lay cards out themselves from a list
/// of widths and a uniform gap: a retained visual order plus one scalar
/// translation. Immediate-mode front-ends (and the test harness) re-derive
/// every card position from this, which keeps the offset and the rendered
/// transform in agreement by construction.
#[derive(Clone, Debug)]
pub struct StripLayout {
    order: std::collections::VecDeque<usize>,
    widths: Vec<f32>,
    gap: f32,
    viewport: Span,
    x: f32,
}

impl StripLayout {
    pub fn new(widths: Vec<f32>, gap: f32) -> Self {
        Self {
            order: (0..widths.len()).collect(),
            widths,
            gap,
            viewport: Span::new(0.0, 0.0),
            x: 0.0,
        }
    }

    /// Update the container bounds (queried live by the probes).
    pub fn set_viewport(&mut self, viewport: Span) {
        self.viewport = viewport;
    }

    #[inline]
    pub fn translation(&self) -> f32 {
        self.x
    }

    /// Original card index occupying `slot` in the current visual order.
    #[inline]
    pub fn slot_card(&self, slot: usize) -> Option<usize> {
        self.order.get(slot).copied()
    }

    /// Left edge of `slot` in strip coordinates, before translation.
    fn slot_origin(&self, slot: usize) -> f32 {
        self.order
            .iter()
            .take(slot)
            .map(|&card| self.widths[card] + self.gap)
            .sum()
    }
}

impl Surface for StripLayout {
    fn card_count(&self) -> usize {
        self.order.len()
    }

    fn container(&self) -> Result<Span, SurfaceError> {
        Ok(self.viewport)
    }

    fn card_bounds(&self, slot: usize) -> Result<Span, SurfaceError> {
        let card = *self
            .order
            .get(slot)
            .ok_or(SurfaceError::BadSlot(slot))?;
        let left = self.viewport.left + self.slot_origin(slot) - self.x;
        Ok(Span::new(left, left + self.widths[card]))
    }

    fn gap(&self) -> Result<f32, SurfaceError> {
        Ok(self.gap)
    }

    fn move_to_tail(&mut self, slot: usize) -> Result<(), SurfaceError> {
        let Some(card) = self.order.remove(slot) else {
            return Err(SurfaceError::BadSlot(slot));
        };
        self.order.push_back(card);
        Ok(())
    }

    fn move_to_head(&mut self, slot: usize) -> Result<(), SurfaceError> {
        let Some(card) = self.order.remove(slot) else {
            return Err(SurfaceError::BadSlot(slot));
        };
        self.order.push_front(card);
        Ok(())
    }

    fn set_translation(&mut self, x: f32) {
        self.x = x;
    }
}

/// Validate a probed span before it is used for recycling decisions.
#[inline]
pub(crate) fn checked(span: Span, what: &'static str) -> Result<Span, SurfaceError> {
    if span.is_degenerate() {
        Err(SurfaceError::Degenerate(what))
    } else {
        Ok(span)
    }
}

/// Validate a probed gap. Zero is fine (cards may abut); NaN is not.
#[inline]
pub(crate) fn checked_gap(gap: f32) -> Result<f32, SurfaceError> {
    if gap.is_finite() && gap >= 0.0 {
        Ok(gap)
    } else {
        Err(SurfaceError::Degenerate("gap"))
    }
}
