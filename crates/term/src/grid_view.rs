//! GridView: maps a [`QuizSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{Catalog, CellView, DataOrigin, QuizSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{InteractionMode, Position};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Host-side state shown next to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostStatus<'a> {
    pub cursor: Position,
    pub mode: InteractionMode,
    pub round: u32,
    pub origin: DataOrigin,
    /// One-line message from the last action (rejections, audio).
    pub notice: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

pub struct GridView {
    /// Terminal columns per grid cell, including one gap column.
    cell_w: u16,
    /// Terminal rows per grid cell, including one gap row.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GridView {
    fn default() -> Self {
        Self {
            cell_w: 8,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GridView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(
        &self,
        snap: &QuizSnapshot,
        catalog: &Catalog,
        status: &HostStatus<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).into_cell(' '));

        let Frame { x0, y0, w: frame_w, h: frame_h } = self.frame(snap, viewport);

        fb.fill_rect(x0 + 1, y0 + 1, frame_w - 2, frame_h - 2, ' ', CellStyle::new(BG, BG));
        draw_border(fb, x0, y0, frame_w, frame_h, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        let reveal = snap.submitted || snap.is_complete;
        for cell in &snap.cells {
            let under_cursor = cell.position == status.cursor;
            self.draw_cell(fb, catalog, cell, x0, y0, under_cursor, reveal);
        }

        if snap.is_complete {
            let text = if snap.locked { " SOLVED " } else { " COMPLETE " };
            let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
            fb.put_str_centered(x0, y0.saturating_add(frame_h - 1), frame_w, text, style);
        }

        self.draw_side_panel(fb, snap, status, viewport, x0.saturating_add(frame_w).saturating_add(2), y0);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &QuizSnapshot,
        catalog: &Catalog,
        status: &HostStatus<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, catalog, status, viewport, &mut fb);
        fb
    }

    /// Grid position under terminal column `x`, row `y`, for pointer hosts.
    pub fn hit_test(&self, snap: &QuizSnapshot, viewport: Viewport, x: u16, y: u16) -> Option<Position> {
        let Frame { x0, y0, .. } = self.frame(snap, viewport);
        let dx = x.checked_sub(x0.saturating_add(2))?;
        let dy = y.checked_sub(y0.saturating_add(1))?;
        let position = Position::new(dy / self.cell_h, dx / self.cell_w);
        (position.row < snap.height && position.col < snap.width).then_some(position)
    }

    /// Frame geometry, computed wide and saturated so long rows clip instead of overflowing.
    fn frame(&self, snap: &QuizSnapshot, viewport: Viewport) -> Frame {
        let w = span(snap.width, self.cell_w, 3);
        let h = span(snap.height, self.cell_h, 2);
        let x0 = viewport.width.saturating_sub(w.saturating_add(26)) / 2;
        let y0 = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x0, y0, w, h }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        catalog: &Catalog,
        cell: &CellView,
        x0: u16,
        y0: u16,
        under_cursor: bool,
        reveal: bool,
    ) {
        let px = u32::from(x0) + 2 + u32::from(cell.position.col) * u32::from(self.cell_w);
        let py = u32::from(y0) + 1 + u32::from(cell.position.row) * u32::from(self.cell_h);
        // Off-screen cells are skipped.
        if px >= u32::from(fb.width()) || py >= u32::from(fb.height()) {
            return;
        }
        let (px, py) = (px as u16, py as u16);
        let box_w = self.cell_w - 1;

        let mut fg = Rgb::new(220, 220, 230);
        if reveal && !cell.occupants.is_empty() {
            fg = if cell.is_correct {
                Rgb::new(100, 220, 120)
            } else {
                Rgb::new(220, 90, 90)
            };
        }
        let bg = if cell.is_active {
            Rgb::new(120, 100, 30)
        } else if under_cursor {
            Rgb::new(70, 70, 110)
        } else {
            Rgb::new(45, 45, 58)
        };
        let mut style = CellStyle::new(fg, bg);
        if cell.is_active {
            style = style.bold();
        }

        fb.fill_rect(px, py, box_w, 1, ' ', style);
        if cell.occupants.is_empty() {
            fb.put_str_centered(px, py, box_w, "·", style.dim());
        } else {
            fb.put_str_centered(px, py, box_w, &catalog.joined_labels(&cell.occupants), style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &QuizSnapshot,
        status: &HostStatus<'_>,
        viewport: Viewport,
        panel_x: u16,
        top: u16,
    ) {
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }
        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = top;
        let mut field = |fb: &mut FrameBuffer, name: &str, text: &str| {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, text, value);
            y += 3;
        };

        field(fb, "MODE", status.mode.as_str());
        field(fb, "PLACED", &format!("{}/{}", snap.correct, snap.total));
        let score = if snap.submitted {
            snap.score.to_string()
        } else {
            "-".to_string()
        };
        field(fb, "SCORE", &score);
        field(fb, "ROUND", &status.round.to_string());

        if let Some(tier) = snap.feedback {
            fb.put_str(panel_x, y, tier.message(), label);
            y += 2;
        }
        if status.origin == DataOrigin::Placeholder {
            fb.put_str(panel_x, y, "built-in vowels", hint);
            y += 1;
        }
        if let Some(notice) = status.notice {
            fb.put_str(panel_x, y, notice, value);
            y += 1;
        }

        y += 1;
        for line in ["space grab/drop", "esc cancel  p cue", "f submit  r reset", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }
}

/// Geometry of the grid frame in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x0: u16,
    y0: u16,
    w: u16,
    h: u16,
}

/// `count * per + border`, saturated to `u16::MAX`.
fn span(count: u16, per: u16, border: u32) -> u16 {
    let wide = u32::from(count) * u32::from(per) + border;
    u16::try_from(wide).unwrap_or(u16::MAX)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for cx in x + 1..right.min(fb.width()) {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom.min(fb.height()) {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}
