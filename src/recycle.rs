use crate::model::{OffsetModel, Sequence};
use crate::surface::{checked, checked_gap, Surface, SurfaceError};

/* ───────────────────────── tuneables ────────────────────────────── */

// Hard cap on card moves per pass; more than this in one frame means the
// frame time or velocity is producing over one full card transit per frame.
pub const MAX_RECYCLES_PER_PASS: usize = 6;

// A card counts as fully exited once its edge is within this of the bound.
pub const EDGE_TOLERANCE: f32 = 0.5;

/* ───────────────────────── pass result ──────────────────────────── */

/// What one recycle pass did. `hit_cap` is a diagnostic, not an error; the
/// remainder is caught up on later frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecyclePass {
    pub forward: usize,
    pub backward: usize,
    pub hit_cap: bool,
}

impl RecyclePass {
    #[inline]
    pub fn total(&self) -> usize {
        self.forward + self.backward
    }
}

/* ───────────────────────── the pass ─────────────────────────────── */

/// Move cards between the ends of the order as they exit the viewport,
/// compensating the offset by one pitch (card width + gap) per move so no
/// rendered position changes. Forward motion recycles the head to the tail
/// once its trailing edge is at or before the container's leading edge;
/// reverse motion mirrors that with the tail card. The sequence rotates in
/// lockstep with the surface so both always agree on the order.
pub fn run_pass<S: Surface>(
    surface: &mut S,
    seq: &mut Sequence,
    offset: &mut OffsetModel,
) -> Result<RecyclePass, SurfaceError> {
    let mut pass = RecyclePass::default();
    if seq.len() <= 1 {
        return Ok(pass);
    }

    let container = checked(surface.container()?, "container")?;
    let gap = checked_gap(surface.gap()?)?;
    let velocity = offset.velocity();

    if velocity > 0.0 {
        // Several cards can exit between frames; loop until the head is
        // back in view or the cap trips.
        while pass.forward < MAX_RECYCLES_PER_PASS {
            let head = checked(surface.card_bounds(0)?, "head card")?;
            if head.right > container.left + EDGE_TOLERANCE {
                break;
            }
            let pitch = head.width() + gap;
            surface.move_to_tail(0)?;
            seq.rotate_forward();
            offset.shift(-pitch);
            surface.set_translation(offset.x());
            pass.forward += 1;
        }
        pass.hit_cap = pass.forward >= MAX_RECYCLES_PER_PASS;
    } else if velocity < 0.0 {
        while pass.backward < MAX_RECYCLES_PER_PASS {
            let tail_slot = seq.len() - 1;
            let tail = checked(surface.card_bounds(tail_slot)?, "tail card")?;
            if tail.left < container.right - EDGE_TOLERANCE {
                break;
            }
            let pitch = tail.width() + gap;
            surface.move_to_head(tail_slot)?;
            seq.rotate_back();
            offset.shift(pitch);
            surface.set_translation(offset.x());
            pass.backward += 1;
        }
        pass.hit_cap = pass.backward >= MAX_RECYCLES_PER_PASS;
    }

    Ok(pass)
}
