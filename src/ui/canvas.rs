//! Clipping drawing surface over a ratatui [`Buffer`]
//!
//! A [`Canvas`] is a rectangular region of the frame buffer. Coordinates passed
//! to it are relative to the region's top-left corner. Child regions are always
//! intersected with their parent, so a widget can never draw outside the area it
//! was given.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("write at ({col}, {row}) is outside a {width}x{height} region")]
    OutOfBounds {
        col: u16,
        row: u16,
        width: u16,
        height: u16,
    },
}

/// A drawable region of a frame buffer
pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    /// Absolute area, always inside `buf.area`
    area: Rect,
    /// Style every write is layered on top of
    base: Style,
}

impl<'a> Canvas<'a> {
    /// Canvas covering `area` of `buf` (clamped to the buffer)
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self {
            buf,
            area,
            base: Style::default(),
        }
    }

    /// Canvas covering the whole buffer
    pub fn full(buf: &'a mut Buffer) -> Self {
        let area = buf.area;
        Self::new(buf, area)
    }

    /// Sub-region at `rect`, given relative to this canvas
    pub fn region(&mut self, rect: Rect) -> Canvas<'_> {
        let absolute = Rect {
            x: self.area.x.saturating_add(rect.x),
            y: self.area.y.saturating_add(rect.y),
            width: rect.width,
            height: rect.height,
        };
        Canvas {
            area: absolute.intersection(self.area),
            buf: &mut *self.buf,
            base: self.base,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Set the background style applied beneath every later write
    pub fn set_base_style(&mut self, style: Style) {
        self.base = style;
    }

    /// Write `text` at (`col`, `row`), truncated at the region's right edge.
    ///
    /// Fails without touching the buffer when the starting cell is outside the region.
    pub fn put_str(&mut self, col: u16, row: u16, text: &str, style: Style) -> Result<(), SurfaceError> {
        if col >= self.area.width || row >= self.area.height {
            return Err(SurfaceError::OutOfBounds {
                col,
                row,
                width: self.area.width,
                height: self.area.height,
            });
        }
        let room = usize::from(self.area.width - col);
        self.buf.set_stringn(
            self.area.x + col,
            self.area.y + row,
            text,
            room,
            self.base.patch(style),
        );
        Ok(())
    }

    /// Like [`Canvas::put_str`] but drops writes that fall outside the region
    pub fn put_str_clipped(&mut self, col: u16, row: u16, text: &str, style: Style) {
        if let Err(err) = self.put_str(col, row, text, style) {
            tracing::trace!(%err, "clipped write");
        }
    }

    /// Overwrite every row with blanks in the base style
    pub fn clear(&mut self) {
        let blank = " ".repeat(usize::from(self.area.width));
        for row in 0..self.area.height {
            self.put_str_clipped(0, row, &blank, Style::default());
        }
    }
}
