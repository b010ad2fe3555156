//! Character grid the board is painted into before it reaches the terminal.
//!
//! Everything here is plain data. Regions are addressed with [`Rect`] so the
//! view and the renderer agree on which cells belong to which tile.

use std::ops::Range;

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Move each channel `amount` steps toward white.
    pub const fn lighten(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
        )
    }
}

/// Text weight of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub weight: Weight,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            weight: Weight::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        self.with_weight(Weight::Bold)
    }

    pub const fn dim(self) -> Self {
        self.with_weight(Weight::Dim)
    }

    pub const fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub const fn cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().cell(' ')
    }
}

/// Axis-aligned block of cells, `w` columns by `h` rows from `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }

    pub fn rows(&self) -> Range<u16> {
        self.y..self.bottom()
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Part of `self` that lies inside a `width` by `height` grid.
    pub fn clip(&self, width: u16, height: u16) -> Rect {
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        let x = self.x.min(right);
        let y = self.y.min(bottom);
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Row-major grid of styled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rect anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Change dimensions, keeping the allocation. Contents are unspecified
    /// afterwards; callers repaint.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Cells of row `y` between columns `x` and `x + w`, clipped to the buffer.
    pub fn span(&self, x: u16, y: u16, w: u16) -> &[Cell] {
        let r = Rect::new(x, y, w, 1).clip(self.width, self.height);
        match self.offset(r.x, r.y) {
            Some(start) => &self.cells[start..start + usize::from(r.w)],
            None => &[],
        }
    }

    /// Whether any cell inside `rect` differs from the same cell in `other`.
    /// Buffers of different size always differ.
    pub fn differs_in(&self, other: &FrameBuffer, rect: Rect) -> bool {
        if self.width != other.width || self.height != other.height {
            return true;
        }
        rect.rows()
            .any(|y| self.span(rect.x, y, rect.w) != other.span(rect.x, y, rect.w))
    }

    /// Paint every cell with `style` and a blank.
    pub fn clear(&mut self, style: CellStyle) {
        self.cells.fill(style.cell(' '));
    }

    /// Paint the cells of `rect` (clipped) with `style` and a blank.
    pub fn fill(&mut self, rect: Rect, style: CellStyle) {
        let r = rect.clip(self.width, self.height);
        for y in r.rows() {
            if let Some(start) = self.offset(r.x, y) {
                self.cells[start..start + usize::from(r.w)].fill(style.cell(' '));
            }
        }
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.cell(ch));
    }

    /// Write `s` from `(x, y)`, clipped at the right edge. Returns the column
    /// after the last character written.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars().take(usize::from(self.width.saturating_sub(x))) {
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
        cx
    }

    /// Write `s` centred within the columns of `rect` on row `y`.
    pub fn put_str_centered(&mut self, rect: Rect, y: u16, s: &str, style: CellStyle) {
        let len = u16::try_from(s.chars().count()).unwrap_or(u16::MAX);
        let x = rect.x.saturating_add(rect.w.saturating_sub(len) / 2);
        self.put_str(x, y, s, style);
    }

    /// Write a decimal number without allocating.
    pub fn put_u64(&mut self, x: u16, y: u16, value: u64, style: CellStyle) -> u16 {
        let mut digits = [0u8; 20];
        let mut rest = value;
        let mut n = 0;
        loop {
            digits[n] = b'0' + (rest % 10) as u8;
            n += 1;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        digits[..n].reverse();

        let mut cx = x;
        for &d in &digits[..n] {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, char::from(d), style);
            cx += 1;
        }
        cx
    }

    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        self.put_u64(x, y, u64::from(value), style)
    }

    /// Characters of row `y` as a string (test and debug helper).
    pub fn row_text(&self, y: u16) -> String {
        self.span(0, y, self.width).iter().map(|c| c.ch).collect()
    }
}
