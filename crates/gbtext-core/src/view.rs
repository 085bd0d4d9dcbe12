//! Rectangular text regions with a draw cursor, and the wrap algorithm that
//! keeps the cursor inside them.

use fb565::{Geometry, Rgb565};

use crate::{
    error::RenderError,
    glyph::{ASCII_CELL_WIDTH, CELL_HEIGHT},
};

/// Spaces emitted for one tab.
pub const TAB_SPACES: usize = 2;

/// Corrective passes `resolve` may need: one horizontal, one vertical.
const MAX_CORRECTIONS: usize = 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Intersection with the surface rectangle, `None` when empty.
    pub fn clip_to(&self, geometry: Geometry) -> Option<Rect> {
        let right = self.right().min(geometry.width);
        let bottom = self.bottom().min(geometry.height);
        if right <= self.x || bottom <= self.y {
            return None;
        }

        Some(Rect::new(self.x, self.y, right - self.x, bottom - self.y))
    }
}

/// A text region carved out of a shared pixel cache.
///
/// The rectangle is fixed at creation. The cursor marks where the next glyph
/// lands and, after any successful draw or move, lies inside the region's
/// intersection with the surface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct View {
    area: Rect,
    cursor: Point,
    color: Rgb565,
}

impl View {
    pub const fn new(area: Rect, color: Rgb565) -> Self {
        Self {
            area,
            cursor: area.origin(),
            color,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb565) {
        self.color = color;
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = self.area.origin();
    }

    pub(crate) fn set_cursor(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    /// Maps a candidate draw position to one where a `glyph_width` cell fits.
    ///
    /// A cell that would reach the right edge moves to the start of the next
    /// text row. A row at or past the bottom edge wraps to the top of the
    /// view, so the view behaves as a circular text buffer. Candidates left
    /// of or above the origin are pulled onto it.
    ///
    /// Resolving an already-resolved point returns it unchanged.
    pub fn resolve(
        &self,
        geometry: Geometry,
        candidate: Point,
        glyph_width: usize,
    ) -> Result<Point, RenderError> {
        let area = self.effective_area(geometry, glyph_width)?;
        let (right, bottom) = (area.right(), area.bottom());

        let mut x = candidate.x.max(area.x);
        let mut y = candidate.y.max(area.y);

        for _ in 0..=MAX_CORRECTIONS {
            let mut corrected = false;

            if x >= right || x.saturating_add(glyph_width) >= right {
                y = y.saturating_add(CELL_HEIGHT);
                x = area.x;
                corrected = true;
            }

            if y >= bottom {
                y = area.y;
                corrected = true;
            }

            if !corrected {
                return Ok(Point::new(x, y));
            }
        }

        Err(too_small(area, glyph_width))
    }

    /// Effective rectangle, checked to hold at least one `glyph_width` cell.
    fn effective_area(&self, geometry: Geometry, glyph_width: usize) -> Result<Rect, RenderError> {
        let area = self
            .area
            .clip_to(geometry)
            .ok_or(too_small(Rect::default(), glyph_width))?;

        if area.width <= glyph_width || area.height < CELL_HEIGHT {
            return Err(too_small(area, glyph_width));
        }
        Ok(area)
    }

    /// Moves the cursor one ASCII cell right, without painting.
    pub fn space(&mut self, geometry: Geometry) -> Result<(), RenderError> {
        let candidate = Point::new(self.cursor.x.saturating_add(ASCII_CELL_WIDTH), self.cursor.y);
        self.cursor = self.resolve(geometry, candidate, ASCII_CELL_WIDTH)?;
        Ok(())
    }

    /// Moves the cursor [`TAB_SPACES`] cells right.
    pub fn tab(&mut self, geometry: Geometry) -> Result<(), RenderError> {
        for _ in 0..TAB_SPACES {
            self.space(geometry)?;
        }
        Ok(())
    }

    /// Moves the cursor to the start of the next text row.
    pub fn newline(&mut self, geometry: Geometry) -> Result<(), RenderError> {
        let candidate = Point::new(self.area.x, self.cursor.y.saturating_add(CELL_HEIGHT));
        self.cursor = self.resolve(geometry, candidate, ASCII_CELL_WIDTH)?;
        Ok(())
    }
}

fn too_small(area: Rect, glyph_width: usize) -> RenderError {
    RenderError::ViewTooSmall {
        width: area.width,
        height: area.height,
        glyph_width,
    }
}
