use std::time::Instant;

use egui::{pos2, vec2, Align2, Color32, CursorIcon, FontId, Rect, Rounding, Sense, Ui, Vec2};

use crate::model::Card;
use crate::reel::{Reel, ReelConfig};
use crate::sched::{FrameScheduler, FrameToken};
use crate::surface::{Span, StripLayout, Surface};

/* ───────────────────────── UI tuneables ─────────────────────────── */

const STRIP_HEIGHT: f32 = 210.0; // allocated strip height
const CARD_INSET_Y: f32 = 10.0; // vertical padding inside the strip
const CARD_ROUNDING: f32 = 14.0;
const CARD_GAP: f32 = 20.0; // uniform spacing between cards
const FALLBACK_CARD_WIDTH: f32 = 220.0; // for non-finite caller widths

/* ───────────────────────── card faces ───────────────────────────── */

/// Visual description of one card. The caller owns these for the life of
/// the strip; the reel only reorders them.
#[derive(Clone, Debug)]
pub struct CardFace {
    pub title: String,
    pub caption: String,
    pub fill: Color32,
    pub width: f32,
    /// Opened (same tab) when a press on this card is classified as a
    /// click.
    pub href: Option<String>,
}

impl CardFace {
    pub fn new(
        title: impl Into<String>,
        caption: impl Into<String>,
        fill: Color32,
        width: f32,
    ) -> Self {
        Self {
            title: title.into(),
            caption: caption.into(),
            fill,
            width,
            href: None,
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/* ───────────────────────── scheduling ───────────────────────────── */

/// Frame scheduling over egui repaints. `schedule` asks for a repaint and
/// hands out a token; revocation works by the reel ignoring stale tokens,
/// since a requested repaint itself cannot be taken back.
pub struct RepaintScheduler {
    ctx: egui::Context,
    next_token: FrameToken,
}

impl RepaintScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx, next_token: 0 }
    }
}

impl FrameScheduler for RepaintScheduler {
    fn schedule(&mut self) -> FrameToken {
        self.next_token += 1;
        self.ctx.request_repaint();
        self.next_token
    }

    fn cancel(&mut self, _token: FrameToken) {}

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/* ───────────────────────── the widget ───────────────────────────── */

/// egui front-end for the reel: owns the card faces and a `Reel` over a
/// `StripLayout`, translates egui input into core calls, and paints the
/// cards at the positions the layout reports.
pub struct CardStrip {
    faces: Vec<CardFace>,
    reel: Reel<StripLayout, RepaintScheduler>,
    hovered: bool,
    page_visible: bool,
}

pub struct StripOutput {
    pub response: egui::Response,
    /// Target of a click-classified gesture this frame, if any. The strip
    /// has already asked egui to open it.
    pub navigated: Option<String>,
}

impl CardStrip {
    pub fn new(ctx: &egui::Context, faces: Vec<CardFace>, cfg: ReelConfig) -> Self {
        let widths = faces
            .iter()
            .map(|f| {
                if f.width.is_finite() {
                    f.width.max(1.0)
                } else {
                    FALLBACK_CARD_WIDTH
                }
            })
            .collect();
        let cards = faces
            .iter()
            .enumerate()
            .map(|(i, f)| Card {
                id: i as u64,
                target: f.href.clone(),
            })
            .collect();
        let reel = Reel::new(
            StripLayout::new(widths, CARD_GAP),
            RepaintScheduler::new(ctx.clone()),
            cards,
            cfg,
        );
        Self {
            faces,
            reel,
            hovered: false,
            page_visible: true,
        }
    }

    #[inline]
    pub fn reel(&self) -> &Reel<StripLayout, RepaintScheduler> {
        &self.reel
    }

    pub fn show(&mut self, ui: &mut Ui) -> StripOutput {
        let width = ui.available_width().max(1.0);
        let (rect, response) =
            ui.allocate_exact_size(vec2(width, STRIP_HEIGHT), Sense::click_and_drag());

        self.reel
            .surface_mut()
            .set_viewport(Span::new(rect.left(), rect.right()));

        // Visibility: fraction of the strip inside the clip rect stands in
        // for viewport intersection; a minimized window for a hidden tab.
        let shown = ui.clip_rect().intersect(rect);
        let fraction = if rect.area() > 0.0 {
            (shown.width().max(0.0) * shown.height().max(0.0)) / rect.area()
        } else {
            0.0
        };
        self.reel.set_intersection(fraction);
        // Page visibility is an edge-triggered signal, like its DOM
        // counterpart; re-sending `visible` every repaint would override
        // the intersection gate.
        let visible = !ui.input(|i| i.viewport().minimized.unwrap_or(false));
        if visible != self.page_visible {
            self.page_visible = visible;
            self.reel.set_page_visible(visible);
        }

        // Hover/focus pause on edges only, so an event-set pause is not
        // stomped every repaint.
        if response.hovered() != self.hovered {
            self.hovered = response.hovered();
            self.reel.set_hovered(self.hovered);
        }
        if response.gained_focus() {
            self.reel.set_focused(true);
        }
        if response.lost_focus() {
            self.reel.set_focused(false);
        }

        // Pointer gestures.
        let (pressed, released, any_down, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.any_down(),
                i.pointer.latest_pos(),
            )
        });
        let mut navigated = None;
        if pressed {
            if let Some(p) = pos {
                if rect.contains(p) {
                    self.reel.pointer_down(p.x);
                }
            }
        }
        if self.reel.dragging() {
            if let Some(p) = pos {
                self.reel.pointer_move(p.x);
            }
            if released {
                navigated = self.reel.pointer_up();
            } else if !any_down {
                // The release never reached us (focus loss, touch cancel).
                navigated = self.reel.pointer_cancel();
            }
        }

        // Wheel over the strip moves it instead of scrolling the page.
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta);
            if scroll != Vec2::ZERO {
                // egui deltas are positive when content moves down/right;
                // the reel follows the opposite wheel convention.
                self.reel.wheel(-scroll.x, -scroll.y);
            }
        }

        if self.reel.dragging() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }

        // Fire the frame the scheduler promised for this repaint.
        if let Some(token) = self.reel.pending_frame() {
            self.reel.frame(token);
        }

        self.paint(ui, rect);

        if let Some(url) = &navigated {
            ui.ctx().open_url(egui::OpenUrl::same_tab(url));
        }

        StripOutput {
            response,
            navigated,
        }
    }

    fn paint(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        for slot in 0..self.reel.card_count() {
            let Ok(span) = self.reel.surface().card_bounds(slot) else {
                continue;
            };
            if span.right < rect.left() || span.left > rect.right() {
                continue;
            }
            let Some(card) = self.reel.surface().slot_card(slot) else {
                continue;
            };
            let face = &self.faces[card];
            let card_rect = Rect::from_min_max(
                pos2(span.left, rect.top() + CARD_INSET_Y),
                pos2(span.right, rect.bottom() - CARD_INSET_Y),
            );
            painter.rect_filled(card_rect, Rounding::same(CARD_ROUNDING), face.fill);
            painter.text(
                pos2(card_rect.left() + 14.0, card_rect.bottom() - 32.0),
                Align2::LEFT_BOTTOM,
                &face.title,
                FontId::proportional(18.0),
                Color32::WHITE,
            );
            painter.text(
                pos2(card_rect.left() + 14.0, card_rect.bottom() - 14.0),
                Align2::LEFT_BOTTOM,
                &face.caption,
                FontId::proportional(12.0),
                Color32::from_white_alpha(200),
            );
        }
    }
}
