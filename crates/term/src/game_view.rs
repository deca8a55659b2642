//! GameView: lays a [`GameSnapshot`] out on a framebuffer.
//!
//! Pure (no I/O), so frames can be checked in tests.

use crate::core::{GameSnapshot, MinoOffset, Shape};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const WELL_BG: Rgb = Rgb::new(18, 18, 28);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Width of the side panel, including its left margin
const PANEL_W: u16 = 14;

pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
    /// Terminal rows per board cell
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self::new(2, 1)
    }
}

/// Screen position of the well's top-left interior cell.
#[derive(Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn well_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// `banner` is a short transient message (line clear names, level ups).
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        banner: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let (frame_w, frame_h) = self.well_size();
        let total_w = frame_w + PANEL_W;
        let left = viewport.width.saturating_sub(total_w) / 2;
        let top = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let origin = Origin {
            x: left + 1,
            y: top + 1,
        };

        let well = Style::plain(Rgb::new(60, 60, 75), WELL_BG);
        fb.fill_rect(
            origin.x,
            origin.y,
            frame_w - 2,
            frame_h - 2,
            ' ',
            well,
        );
        draw_frame(
            fb,
            left,
            top,
            frame_w,
            frame_h,
            Style::plain(Rgb::new(170, 170, 190), SCREEN_BG),
        );

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                match PieceKind::from_code(code) {
                    Some(kind) => self.block(fb, origin, (x as i8, y as i8), block_style(kind)),
                    None => self.paint(fb, origin, (x as i8, y as i8), '·', well.dim()),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = Style::plain(Rgb::of_piece(active.kind).scaled(1, 2), WELL_BG);
                for cell in active.ghost_minos(ghost_y) {
                    self.paint(fb, origin, cell, '░', ghost);
                }
            }
            for cell in active.minos {
                self.block(fb, origin, cell, block_style(active.kind).bold());
            }
        }

        self.draw_panel(fb, snap, viewport, left + frame_w + 2, top);

        let overlay = if snap.game_over {
            Some(("GAME OVER", "ENTER: NEW GAME"))
        } else if snap.paused {
            Some(("PAUSED", "P: RESUME"))
        } else {
            None
        };
        if let Some((title, hint)) = overlay {
            let mid = top + frame_h / 2;
            centered(fb, left, frame_w, mid, title, Style::default().bold());
            centered(fb, left, frame_w, mid + 1, hint, Style::default().dim());
        } else if let Some(text) = banner {
            let style = Style::plain(Rgb::new(255, 255, 255), WELL_BG).bold();
            centered(fb, left, frame_w, top + frame_h / 3, text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, banner: Option<&str>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, banner, viewport, &mut fb);
        fb
    }

    fn block(&self, fb: &mut FrameBuffer, origin: Origin, cell: MinoOffset, style: Style) {
        self.paint(fb, origin, cell, '█', style);
    }

    /// Fill one board cell; cells outside the well (e.g. above it) are skipped.
    fn paint(&self, fb: &mut FrameBuffer, origin: Origin, (x, y): MinoOffset, ch: char, style: Style) {
        if !(0..BOARD_WIDTH as i8).contains(&x) || !(0..BOARD_HEIGHT as i8).contains(&y) {
            return;
        }
        fb.fill_rect(
            origin.x + x as u16 * self.cell_w,
            origin.y + y as u16 * self.cell_h,
            self.cell_w,
            self.cell_h,
            ch,
            style,
        );
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, x: u16, top: u16) {
        if x.saturating_add(PANEL_W - 2) > viewport.width {
            return;
        }
        let label = Style::default().bold();
        let value = Style::default();

        let mut y = top;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "HOLD", label);
        if let Some(kind) = snap.hold {
            // A spent hold is drawn greyed out until the next spawn.
            let style = if snap.can_hold {
                block_style(kind)
            } else {
                block_style(kind).dim()
            };
            draw_preview(fb, x, y + 1, kind, style);
        }
        y += 4;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        for &kind in &snap.next_queue {
            draw_preview(fb, x, y, kind, block_style(kind));
            y += 3;
        }
    }
}

fn block_style(kind: PieceKind) -> Style {
    Style::plain(Rgb::of_piece(kind), WELL_BG)
}

/// Draw a piece in its spawn orientation, two columns per cell.
///
/// Empty leading rows are skipped so every preview fits in two lines.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, style: Style) {
    let minos = Shape::of(kind).minos();
    let min_row = minos.iter().map(|&(_, r)| r).min().unwrap_or(0);
    for (col, row) in minos {
        let px = x + col as u16 * 2;
        let py = y + (row - min_row) as u16;
        fb.put_str(px, py, "██", Style { bg: SCREEN_BG, ..style });
    }
}

fn draw_frame(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, bottom, '═', style);
    }
    for dy in 0..h - 1 {
        fb.put_char(x, y + dy, '║', style);
        fb.put_char(right, y + dy, '║', style);
    }
    fb.put_char(x, bottom, '╚', style);
    fb.put_char(right, bottom, '╝', style);
}

fn centered(fb: &mut FrameBuffer, left: u16, w: u16, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    fb.put_str(left + w.saturating_sub(len) / 2, y, text, style);
}
