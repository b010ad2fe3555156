//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame, and any frame whose `BoardLayout` differs from the last
//! one, is painted in full. Otherwise the renderer walks the layout's regions
//! and repaints only the tiles (and the banner band or side panel) whose cells
//! changed, so a move costs a few tiles' worth of escape sequences.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb, Weight};
use crate::game_view::{BoardLayout, Viewport};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Tracks the style last sent to the terminal so runs of equally styled
/// cells emit one set of colour commands.
#[derive(Debug, Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn paint(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, rect: Rect) -> Result<()> {
        let rect = rect.clip(fb.width(), fb.height());
        if rect.is_empty() {
            return Ok(());
        }
        for y in rect.rows() {
            out.queue(cursor::MoveTo(rect.x, y))?;
            for cell in fb.span(rect.x, y, rect.w) {
                if self.style != Some(cell.style) {
                    set_style(out, cell.style)?;
                    self.style = Some(cell.style);
                }
                out.queue(Print(cell.ch))?;
            }
        }
        Ok(())
    }
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(style.fg.into()))?;
    out.queue(SetBackgroundColor(style.bg.into()))?;
    match style.weight {
        Weight::Normal => {}
        Weight::Bold => {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        Weight::Dim => {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
    }
    Ok(())
}

fn reset(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a clear-and-repaint of the whole buffer into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    Pen::default().paint(out, fb, fb.bounds())?;
    reset(out)
}

/// Encode a repaint of the regions of `layout` where `next` differs from
/// `prev`. Returns how many regions were repainted.
///
/// Both buffers must have been drawn with `layout`; cells outside its regions
/// are assumed unchanged.
pub fn encode_regions_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    layout: &BoardLayout,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let mut pen = Pen::default();
    let mut repainted = 0;
    for rect in layout.regions() {
        if next.differs_in(prev, rect) {
            pen.paint(out, next, rect)?;
            repainted += 1;
        }
    }
    if repainted > 0 {
        reset(out)?;
    }
    Ok(repainted)
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Previous frame and the layout it was drawn with.
    last: Option<(FrameBuffer, BoardLayout)>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Current terminal size as a viewport.
    pub fn viewport() -> Result<Viewport> {
        let (w, h) = terminal::size().context("query terminal size")?;
        Ok(Viewport::new(w, h))
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        reset(&mut self.buf)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")
    }

    /// Force the next draw to be a full redraw (terminal resized).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, rendered with `layout`, then keep it as the previous frame.
    ///
    /// The caller gets the older buffer back in `fb` to render the next frame
    /// into, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer, layout: &BoardLayout) -> Result<()> {
        self.buf.clear();
        let prev = match self.last.take() {
            Some((prev, last_layout)) if last_layout == *layout => {
                encode_regions_into(&prev, fb, layout, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                stale.map(|(prev, _)| prev).unwrap_or_else(|| FrameBuffer::new(0, 0))
            }
        };
        self.flush_buf()?;

        self.last = Some((std::mem::replace(fb, prev), layout.clone()));
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout
            .write_all(&self.buf)
            .context("write frame to stdout")?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
