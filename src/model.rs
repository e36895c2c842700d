use std::collections::VecDeque;

/* ───────────────────────── cards / sequence ─────────────────────── */

/// One visual card. The reel only reorders cards, it never creates or
/// destroys them; the rendered content lives in the caller's surface.
#[derive(Clone, Debug)]
pub struct Card {
    /// Caller-assigned stable identity.
    pub id: u64,
    /// Navigation target fired when a press on this card is classified
    /// as a click.
    pub target: Option<String>,
}

impl Card {
    pub fn new(id: u64) -> Self {
        Self { id, target: None }
    }

    pub fn with_target(id: u64, target: impl Into<String>) -> Self {
        Self {
            id,
            target: Some(target.into()),
        }
    }
}

/// Ordered, logically circular list of cards. Length is fixed for the
/// lifetime of the reel; the only permitted mutation is rotation, in
/// lockstep with the surface reparenting the matching element.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    cards: VecDeque<Card>,
}

impl Sequence {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<&Card> {
        self.cards.get(slot)
    }

    /// Head card moves to the tail (forward recycle).
    pub fn rotate_forward(&mut self) {
        if let Some(head) = self.cards.pop_front() {
            self.cards.push_back(head);
        }
    }

    /// Tail card moves to the head (reverse recycle).
    pub fn rotate_back(&mut self) {
        if let Some(tail) = self.cards.pop_back() {
            self.cards.push_front(tail);
        }
    }

    /// Card ids in current visual order, head first.
    pub fn ids(&self) -> Vec<u64> {
        self.cards.iter().map(|c| c.id).collect()
    }

    pub fn find(&self, id: u64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

/* ───────────────────────── offset state ─────────────────────────── */

/// Single source of truth for the strip position. `x` is the magnitude of
/// leftward translation already applied; `velocity` is signed, positive
/// meaning the contents drift left ("forward").
#[derive(Clone, Copy, Debug)]
pub struct OffsetModel {
    x: f32,
    velocity: f32,
    pub paused: bool,
    pub dragging: bool,
}

impl OffsetModel {
    pub fn new(velocity: f32) -> Self {
        Self {
            x: 0.0,
            velocity,
            paused: false,
            dragging: false,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Integrate passive motion. Returns whether `x` actually changed, so
    /// the caller knows to re-apply the translation. A non-finite result
    /// leaves `x` untouched.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.paused || self.dragging {
            return false;
        }
        let next = self.x + self.velocity * dt;
        if !next.is_finite() || next == self.x {
            return false;
        }
        self.x = next;
        true
    }

    /// Set `x` directly (drag and wheel paths). Non-finite input is ignored.
    pub fn set_absolute(&mut self, x: f32) {
        if x.is_finite() {
            self.x = x;
        }
    }

    /// Shift `x` by `dx` (recycle compensation). Non-finite results are
    /// ignored.
    pub fn shift(&mut self, dx: f32) {
        self.set_absolute(self.x + dx);
    }

    /// Point `velocity` in `direction` (sign only), keeping its magnitude.
    pub fn set_direction(&mut self, direction: f32) {
        if direction < 0.0 {
            self.velocity = -self.velocity.abs();
        } else {
            self.velocity = self.velocity.abs();
        }
    }

    /// Restore the default forward drift.
    pub fn restore_forward(&mut self) {
        self.velocity = self.velocity.abs();
    }
}

/* ───────────────────────── drag session ─────────────────────────── */

/// Transient state for one pointer-press-to-release gesture.
#[derive(Clone, Copy, Debug)]
pub struct DragSession {
    pub start_pointer_x: f32,
    pub start_offset_x: f32,
    /// Distance of the *latest* move from the press point, not a running
    /// maximum.
    pub moved: f32,
    /// Card under the pointer at press time, if any.
    pub pressed_card: Option<u64>,
}

impl DragSession {
    pub fn begin(pointer_x: f32, offset_x: f32, pressed_card: Option<u64>) -> Self {
        Self {
            start_pointer_x: pointer_x,
            start_offset_x: offset_x,
            moved: 0.0,
            pressed_card,
        }
    }
}
