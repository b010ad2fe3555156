//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, RankedScore};
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{Position, Tile, DEFAULT_WIN_VALUE, EMPTY};

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

/// Screen geometry of one board in one viewport.
///
/// Two frames drawn with equal layouts differ only inside `regions()`, which
/// is what lets the renderer repaint tile by tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    pub viewport: Viewport,
    pub size: usize,
    pub cell_w: u16,
    pub cell_h: u16,
    /// Board including its border
    pub frame: Rect,
    pub panel: Option<Rect>,
}

impl BoardLayout {
    /// Frame without the border.
    pub fn interior(&self) -> Rect {
        Rect::new(
            self.frame.x.saturating_add(1),
            self.frame.y.saturating_add(1),
            self.frame.w.saturating_sub(2),
            self.frame.h.saturating_sub(2),
        )
    }

    pub fn tile(&self, pos: Position) -> Rect {
        let inner = self.interior();
        let col = u16::try_from(pos.col).unwrap_or(u16::MAX);
        let row = u16::try_from(pos.row).unwrap_or(u16::MAX);
        Rect::new(
            inner.x.saturating_add(col.saturating_mul(self.cell_w)),
            inner.y.saturating_add(row.saturating_mul(self.cell_h)),
            self.cell_w,
            self.cell_h,
        )
    }

    /// The two rows across the middle of the board that carry the banners.
    pub fn banner_band(&self) -> Rect {
        let inner = self.interior();
        let mid = self.frame.y.saturating_add(self.frame.h / 2);
        Rect::new(inner.x, mid.saturating_sub(1), inner.w, 2)
    }

    /// Every part of the screen whose content can change while the layout
    /// stays the same: tiles in row-major order, then the side panel.
    /// Banners are drawn over tiles, so the tiles cover them.
    pub fn regions(&self) -> impl Iterator<Item = Rect> + '_ {
        let n = self.size;
        (0..n * n)
            .map(move |i| self.tile(Position::new(i / n, i % n)))
            .chain(self.panel)
    }
}

/// Presentation state that lives outside the engine.
///
/// `merged` and `spawned` come from the last `MoveOutcome` and are cleared by
/// the front end once the transition has played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOverlay {
    pub merged: Vec<Position>,
    pub spawned: Option<Position>,
    pub best: Option<u64>,
    pub top_scores: Vec<RankedScore>,
    /// Show the win banner
    pub won: bool,
    pub win_value: Tile,
    pub undo_enabled: bool,
}

impl Default for ViewOverlay {
    fn default() -> Self {
        Self {
            merged: Vec::new(),
            spawned: None,
            best: None,
            top_scores: Vec::new(),
            won: false,
            win_value: DEFAULT_WIN_VALUE,
            undo_enabled: true,
        }
    }
}

impl ViewOverlay {
    pub fn clear_highlights(&mut self) {
        self.merged.clear();
        self.spawned = None;
    }

    pub fn has_highlights(&self) -> bool {
        !self.merged.is_empty() || self.spawned.is_some()
    }

    fn is_merged(&self, pos: Position) -> bool {
        self.merged.contains(&pos)
    }
}

/// Rows of ranked scores shown in the side panel
const TOP_SCORE_ROWS: usize = 5;

/// Narrowest side panel worth drawing.
const PANEL_MIN_WIDTH: u16 = 10;

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 keeps tiles roughly square with typical glyph aspect ratio.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

/// Fallback tile size when the default does not fit the viewport.
const COMPACT_CELL: (u16, u16) = (5, 1);

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Tile dimensions used for a board of `size` in `viewport`.
    pub fn cell_dims(&self, size: usize, viewport: Viewport) -> (u16, u16) {
        let n = size as u16;
        let fits = |w: u16, h: u16| {
            n.saturating_mul(w).saturating_add(2) <= viewport.width
                && n.saturating_mul(h).saturating_add(2) <= viewport.height
        };
        if fits(self.cell_w, self.cell_h) {
            (self.cell_w, self.cell_h)
        } else {
            COMPACT_CELL
        }
    }

    /// Where the frame, every tile and the side panel sit for a board of
    /// `size` in `viewport`.
    pub fn layout(&self, size: usize, viewport: Viewport) -> BoardLayout {
        let n = u16::try_from(size).unwrap_or(u16::MAX);
        let (cell_w, cell_h) = self.cell_dims(size, viewport);
        let frame_w = n.saturating_mul(cell_w).saturating_add(2);
        let frame_h = n.saturating_mul(cell_h).saturating_add(2);
        let frame = Rect::new(
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        );

        let panel_x = frame.right().saturating_add(2);
        let panel = (panel_x < viewport.width && viewport.width - panel_x >= PANEL_MIN_WIDTH)
            .then(|| {
                Rect::new(
                    panel_x,
                    frame.y,
                    viewport.width - panel_x,
                    viewport.height.saturating_sub(frame.y),
                )
            });

        BoardLayout {
            viewport,
            size,
            cell_w,
            cell_h,
            frame,
            panel,
        }
    }

    /// Render the current game state into an existing framebuffer and return
    /// the layout it was drawn with.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: &ViewOverlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> BoardLayout {
        let layout = self.layout(snap.size, viewport);
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default());

        let frame = layout.frame;
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));
        fb.fill(layout.interior(), CellStyle::new(DARK_TEXT, BOARD_BG));

        for row in 0..snap.size {
            for col in 0..snap.size {
                let pos = Position::new(row, col);
                let rect = layout.tile(pos);
                let value = snap.tile(row, col);
                if value == EMPTY {
                    draw_empty_tile(fb, rect);
                } else {
                    let highlight = if overlay.is_merged(pos) {
                        Highlight::Merged
                    } else if overlay.spawned == Some(pos) {
                        Highlight::Spawned
                    } else {
                        Highlight::None
                    };
                    draw_tile(fb, rect, value, highlight);
                }
            }
        }

        if let Some(panel) = layout.panel {
            draw_side_panel(fb, snap, overlay, panel);
        }

        // Overlays.
        let band = layout.banner_band();
        let mid_y = band.y + 1;
        if snap.game_over {
            draw_banner(fb, band, mid_y, "GAME OVER");
        }
        if overlay.won {
            let text = format!("{}!", overlay.win_value);
            let y = if snap.game_over { band.y } else { mid_y };
            draw_banner(fb, band, y, &text);
        }
        layout
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, overlay: &ViewOverlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }
}

fn draw_side_panel(fb: &mut FrameBuffer, snap: &GameSnapshot, overlay: &ViewOverlay, panel: Rect) {
    let label = CellStyle::default().bold();
    let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
    let x = panel.x;
    let mut y = panel.y;

    // The running game counts toward the best shown.
    let best = overlay.best.unwrap_or(0).max(snap.score);
    for (name, number) in [("SCORE", snap.score), ("BEST", best), ("MOVES", u64::from(snap.moves))] {
        fb.put_str(x, y, name, label);
        fb.put_u64(x, y.saturating_add(1), number, value);
        y = y.saturating_add(3);
    }

    let undo = match (overlay.undo_enabled, snap.can_undo) {
        (false, _) => "OFF",
        (true, true) => "YES",
        (true, false) => "NO",
    };
    fb.put_str(x, y, "UNDO", label);
    fb.put_str(x, y.saturating_add(1), undo, value);
    y = y.saturating_add(3);

    if overlay.top_scores.is_empty() {
        return;
    }
    fb.put_str(x, y, "TOP", label);
    let rows = panel.rows().skip(usize::from(y - panel.y) + 1);
    for (y, entry) in rows.zip(overlay.top_scores.iter().take(TOP_SCORE_ROWS)) {
        let cx = fb.put_u64(x, y, entry.place as u64, value.dim());
        let cx = fb.put_str(cx, y, ". ", value.dim());
        fb.put_u64(cx, y, entry.score, value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Highlight {
    None,
    Merged,
    Spawned,
}

fn draw_border(fb: &mut FrameBuffer, frame: Rect, style: CellStyle) {
    if frame.w < 2 || frame.h < 2 {
        return;
    }
    let (left, top) = (frame.x, frame.y);
    let (right, bottom) = (frame.right() - 1, frame.bottom() - 1);

    for x in left + 1..right {
        fb.put_char(x, top, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in top + 1..bottom {
        fb.put_char(left, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
    for (x, y, ch) in [(left, top, '┌'), (right, top, '┐'), (left, bottom, '└'), (right, bottom, '┘')] {
        fb.put_char(x, y, ch, style);
    }
}

fn draw_empty_tile(fb: &mut FrameBuffer, rect: Rect) {
    let style = CellStyle::new(Rgb::new(170, 158, 146), EMPTY_BG).dim();
    fb.fill(rect, style);
    fb.put_char(rect.x + rect.w / 2, rect.y + rect.h / 2, '·', style);
}

fn draw_tile(fb: &mut FrameBuffer, rect: Rect, value: Tile, highlight: Highlight) {
    let (fg, bg) = tile_colors(value);
    let style = match highlight {
        Highlight::None => CellStyle::new(fg, bg).bold(),
        Highlight::Merged => CellStyle::new(LIGHT_TEXT, bg.lighten(40)).bold(),
        Highlight::Spawned => CellStyle::new(fg, bg.lighten(24)),
    };

    fb.fill(rect, style);
    fb.put_str_centered(rect, rect.y + rect.h / 2, &tile_label(value, rect.w), style);
}

/// Decimal value, or `2^k` when the digits do not fit the tile width.
fn tile_label(value: Tile, width: u16) -> String {
    let digits = value.to_string();
    if digits.len() as u16 <= width {
        digits
    } else {
        format!("2^{}", value.trailing_zeros())
    }
}

/// Foreground and background for a tile value (classic palette).
pub fn tile_colors(value: Tile) -> (Rgb, Rgb) {
    let bg = match value {
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        _ => Rgb::new(60, 58, 50),
    };
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    (fg, bg)
}

/// Centre `text` on row `y` of `band`, cut to the band width.
fn draw_banner(fb: &mut FrameBuffer, band: Rect, y: u16, text: &str) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    let shown = text
        .char_indices()
        .nth(usize::from(band.w))
        .map_or(text, |(end, _)| &text[..end]);
    fb.put_str_centered(band, y, shown, style);
}
