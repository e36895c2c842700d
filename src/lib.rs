//! Endlessly recycling horizontal card strip.
//!
//! A `Reel` shows a finite set of cards as a strip that scrolls forever in
//! either direction: as a card fully exits one end of the viewport it is
//! reparented to the other end and the translation is compensated by one
//! pitch, so nothing visibly jumps and no card is ever cloned or dropped.
//! The strip drifts on its own, follows pointer drags and wheel input,
//! distinguishes clicks from drags, and parks its frame loop whenever it is
//! scrolled out of view or the window is hidden.
//!
//! The core is render-agnostic: hosts supply a [`Surface`] (measure,
//! reorder, translate) and a [`FrameScheduler`] (frame callbacks plus a
//! clock). [`gui::CardStrip`] wires the core to egui; [`ManualScheduler`]
//! drives it deterministically for tests or headless use.

pub mod gate;
pub mod gui;
pub mod input;
pub mod model;
pub mod recycle;
pub mod reel;
pub mod sched;
pub mod surface;

pub use gate::{GateCommand, VisibilityGate};
pub use model::{Card, DragSession, OffsetModel, Sequence};
pub use recycle::{RecyclePass, MAX_RECYCLES_PER_PASS};
pub use reel::{Reel, ReelConfig};
pub use sched::{FrameScheduler, FrameToken, ManualScheduler};
pub use surface::{Span, StripLayout, Surface, SurfaceError};
