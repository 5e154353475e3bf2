//! Shape primitives and their per-pixel containment predicates
//!
//! All geometry is expressed in integer pixel coordinates. Fractional values
//! derived from a scale factor are truncated towards zero before use, so a
//! shape always covers the same pixels for the same parameters.
use crate::{Error, PixelBuffer, RGBA, Scalar};
use std::ops::Range;

/// Largest absolute coordinate a shape is allowed to reach
const COORD_LIMIT: i64 = i32::MAX as i64;

/// Common interface of all fillable primitives
pub trait Fill {
    /// Blend color of the shape into every contained pixel of the image.
    ///
    /// Pixels that are not contained are left untouched.
    fn fill(&self, img: &mut PixelBuffer) -> Result<(), Error>;
}

/// Truncate `value * scale` to integer pixels
#[inline]
fn scaled(value: Scalar, scale: Scalar) -> i64 {
    (value * scale) as i64
}

/// Restrict iteration range to the pixels that exist in the image
#[inline]
fn clip(range: Range<i64>, size: usize) -> Range<i64> {
    range.start.max(0)..range.end.min(size as i64)
}

fn check_scale(scale: Scalar) -> Result<(), Error> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(Error::geometry(format!(
            "scale must be a non-negative number, got {}",
            scale
        )));
    }
    if scaled(300.0, scale) > COORD_LIMIT {
        return Err(Error::geometry(format!("scale {} is too large", scale)));
    }
    Ok(())
}

fn check_center(cx: i64, cy: i64) -> Result<(), Error> {
    if cx.abs() > COORD_LIMIT || cy.abs() > COORD_LIMIT {
        return Err(Error::geometry(format!(
            "center ({}, {}) is out of range",
            cx, cy
        )));
    }
    Ok(())
}

/// Whether `(x, y)` is within `radius` of the corner arc center `(cx, cy)`
#[inline]
pub fn within_arc(x: i64, y: i64, cx: i64, cy: i64, radius: i64) -> bool {
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= radius * radius
}

/// Arc center of the top corner zone containing `(x, y)` if any.
///
/// Left zone takes precedence over the right one when they overlap. Right
/// centers are shifted by one pixel to the left so that arcs stay symmetric
/// for the half-open box `[x1, x2)`.
#[inline]
pub fn top_corner_center(x: i64, y: i64, x1: i64, y1: i64, x2: i64, radius: i64) -> Option<(i64, i64)> {
    if y >= y1 + radius {
        None
    } else if x < x1 + radius {
        Some((x1 + radius, y1 + radius))
    } else if x >= x2 - radius {
        Some((x2 - radius - 1, y1 + radius))
    } else {
        None
    }
}

/// Arc center of the bottom corner zone containing `(x, y)` if any.
#[inline]
pub fn bottom_corner_center(x: i64, y: i64, x1: i64, x2: i64, y2: i64, radius: i64) -> Option<(i64, i64)> {
    if y < y2 - radius {
        None
    } else if x < x1 + radius {
        Some((x1 + radius, y2 - radius - 1))
    } else if x >= x2 - radius {
        Some((x2 - radius - 1, y2 - radius - 1))
    } else {
        None
    }
}

/// Containment predicate of a rounded rectangle `[x1, x2) x [y1, y2)`.
///
/// Only the first matching corner zone (top-left, top-right, bottom-left,
/// bottom-right) is tested, even if the zones overlap for a large radius.
pub fn rounded_rect_contains(
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    radius: i64,
) -> bool {
    if x < x1 || x >= x2 || y < y1 || y >= y2 {
        return false;
    }
    top_corner_center(x, y, x1, y1, x2, radius)
        .or_else(|| bottom_corner_center(x, y, x1, x2, y2, radius))
        .is_none_or(|(cx, cy)| within_arc(x, y, cx, cy, radius))
}

/// Half width of the bookmark notch triangle `rel_y` rows below its base
#[inline]
pub fn notch_half_width(rel_y: i64, notch: i64, half_width: i64) -> i64 {
    ((rel_y as Scalar / notch as Scalar) * half_width as Scalar) as i64
}

/// Half width of the arrow head `rel_y` rows below its base
#[inline]
pub fn arrow_head_half_width(rel_y: i64, head_width: i64, head_height: i64) -> i64 {
    (head_width as Scalar * (1.0 - rel_y as Scalar / head_height as Scalar) / 2.0) as i64
}

/// Filled rectangle `[x1, x2) x [y1, y2)` with circular corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
    pub radius: i64,
    pub color: RGBA,
}

impl RoundedRect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64, radius: i64, color: impl Into<RGBA>) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            radius,
            color: color.into(),
        }
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        rounded_rect_contains(x, y, self.x1, self.y1, self.x2, self.y2, self.radius)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.x2 < self.x1 || self.y2 < self.y1 {
            return Err(Error::geometry(format!(
                "rectangle ({}, {})-({}, {}) has negative size",
                self.x1, self.y1, self.x2, self.y2
            )));
        }
        if self.radius < 0 {
            return Err(Error::geometry(format!(
                "corner radius {} is negative",
                self.radius
            )));
        }
        for coord in [self.x1, self.y1, self.x2, self.y2, self.radius] {
            if coord.abs() > COORD_LIMIT {
                return Err(Error::geometry(format!("coordinate {} is out of range", coord)));
            }
        }
        Ok(())
    }
}

impl Fill for RoundedRect {
    fn fill(&self, img: &mut PixelBuffer) -> Result<(), Error> {
        self.validate()?;
        let size = img.size();
        for y in clip(self.y1..self.y2, size) {
            for x in clip(self.x1..self.x2, size) {
                if self.contains(x, y) {
                    img.blend(x, y, self.color);
                }
            }
        }
        Ok(())
    }
}

/// Bookmark silhouette: tall rounded body ending with a triangular notch.
///
/// Reference dimensions are `200 x 300` with an `80` pixel notch, multiplied
/// by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bookmark {
    pub cx: i64,
    pub cy: i64,
    pub scale: Scalar,
    pub color: RGBA,
}

/// Integer geometry of a bookmark at a particular scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkGeometry {
    pub width: i64,
    pub height: i64,
    pub notch: i64,
    pub radius: i64,
    pub tail: i64,
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    /// Row where the notch triangle starts
    pub y2: i64,
}

impl Bookmark {
    pub fn new(cx: i64, cy: i64, scale: Scalar, color: impl Into<RGBA>) -> Self {
        Self {
            cx,
            cy,
            scale,
            color: color.into(),
        }
    }

    pub fn geometry(&self) -> BookmarkGeometry {
        let width = scaled(200.0, self.scale);
        let height = scaled(300.0, self.scale);
        let notch = scaled(80.0, self.scale);
        BookmarkGeometry {
            width,
            height,
            notch,
            radius: scaled(20.0, self.scale),
            tail: scaled(50.0, self.scale),
            x1: self.cx - width / 2,
            y1: self.cy - height / 2,
            x2: self.cx + width / 2,
            y2: self.cy + height / 2 - notch,
        }
    }

    /// Body of the bookmark, including the rows occupied by the notch
    pub fn body(&self) -> RoundedRect {
        let geom = self.geometry();
        RoundedRect::new(
            geom.x1,
            geom.y1,
            geom.x2,
            geom.y2 + geom.notch,
            geom.radius,
            self.color,
        )
    }

    /// Containment predicate of the notch re-scan pass
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let geom = self.geometry();
        if x < geom.x1 || x >= geom.x2 || y < geom.y1 || y >= geom.y2 + geom.notch + geom.tail {
            return false;
        }
        if y > geom.y2 {
            if geom.notch == 0 || y > geom.y2 + geom.notch {
                return false;
            }
            let half_width = notch_half_width(y - geom.y2, geom.notch, geom.width / 2);
            if x < self.cx - half_width || x > self.cx + half_width {
                return false;
            }
        }
        top_corner_center(x, y, geom.x1, geom.y1, geom.x2, geom.radius)
            .is_none_or(|(cx, cy)| within_arc(x, y, cx, cy, geom.radius))
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_scale(self.scale)?;
        check_center(self.cx, self.cy)
    }
}

impl Fill for Bookmark {
    fn fill(&self, img: &mut PixelBuffer) -> Result<(), Error> {
        self.validate()?;
        self.body().fill(img)?;

        // second pass covers the body again (same color, same result) and
        // then the notch rows below it
        let geom = self.geometry();
        let size = img.size();
        let rows = clip(geom.y1..geom.y2 + geom.notch + geom.tail, size);
        for y in rows {
            for x in clip(geom.x1..geom.x2, size) {
                if self.contains(x, y) {
                    img.blend(x, y, self.color);
                }
            }
        }
        Ok(())
    }
}

/// Downward arrow: rectangular shaft ending at `cy`, triangular head below.
///
/// Reference shaft is `60 x 80`, head is `100` wide and `50` tall, multiplied
/// by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub cx: i64,
    pub cy: i64,
    pub scale: Scalar,
    pub color: RGBA,
}

impl Arrow {
    pub fn new(cx: i64, cy: i64, scale: Scalar, color: impl Into<RGBA>) -> Self {
        Self {
            cx,
            cy,
            scale,
            color: color.into(),
        }
    }

    fn shaft(&self) -> (Range<i64>, Range<i64>) {
        let width = scaled(60.0, self.scale);
        let height = scaled(80.0, self.scale);
        (
            self.cx - width / 2..self.cx + width / 2,
            self.cy - height..self.cy,
        )
    }

    fn head(&self) -> (i64, i64) {
        (scaled(100.0, self.scale), scaled(50.0, self.scale))
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        let (cols, rows) = self.shaft();
        if rows.contains(&y) {
            return cols.contains(&x);
        }
        let (head_width, head_height) = self.head();
        let rel_y = y - self.cy;
        if rel_y < 0 || rel_y >= head_height {
            return false;
        }
        let half_width = arrow_head_half_width(rel_y, head_width, head_height);
        (self.cx - half_width..self.cx + half_width).contains(&x)
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_scale(self.scale)?;
        check_center(self.cx, self.cy)
    }
}

impl Fill for Arrow {
    fn fill(&self, img: &mut PixelBuffer) -> Result<(), Error> {
        self.validate()?;
        let size = img.size();

        let (cols, rows) = self.shaft();
        for y in clip(rows, size) {
            for x in clip(cols.clone(), size) {
                img.blend(x, y, self.color);
            }
        }

        let (head_width, head_height) = self.head();
        for y in clip(self.cy..self.cy + head_height, size) {
            let half_width = arrow_head_half_width(y - self.cy, head_width, head_height);
            for x in clip(self.cx - half_width..self.cx + half_width, size) {
                img.blend(x, y, self.color);
            }
        }
        Ok(())
    }
}

/// Any of the supported primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    RoundedRect(RoundedRect),
    Bookmark(Bookmark),
    Arrow(Arrow),
}

impl Fill for Shape {
    fn fill(&self, img: &mut PixelBuffer) -> Result<(), Error> {
        match self {
            Shape::RoundedRect(rect) => rect.fill(img),
            Shape::Bookmark(bookmark) => bookmark.fill(img),
            Shape::Arrow(arrow) => arrow.fill(img),
        }
    }
}

impl From<RoundedRect> for Shape {
    fn from(rect: RoundedRect) -> Self {
        Shape::RoundedRect(rect)
    }
}

impl From<Bookmark> for Shape {
    fn from(bookmark: Bookmark) -> Self {
        Shape::Bookmark(bookmark)
    }
}

impl From<Arrow> for Shape {
    fn from(arrow: Arrow) -> Self {
        Shape::Arrow(arrow)
    }
}
