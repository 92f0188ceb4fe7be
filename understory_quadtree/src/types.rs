// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: rectangles, quadrants, and query modes.

/// Axis-aligned rectangle in 2D, `f64` coordinates.
///
/// The y axis points up: `max_y` is the top edge. Zero-area rectangles are legal
/// and describe points or axis-aligned segments.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    /// Minimum x (left)
    pub min_x: f64,
    /// Minimum y (bottom)
    pub min_y: f64,
    /// Maximum x (right)
    pub max_x: f64,
    /// Maximum y (top)
    pub max_y: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::from_point(0.0, 0.0);

    /// Create a rectangle from two opposite corners given in any order.
    ///
    /// NaN coordinates are kept, so [`Rect::is_finite`] reports them.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (min_x, max_x) = ordered(x0, x1);
        let (min_y, max_y) = ordered(y0, y1);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle from its anchor corner and size.
    ///
    /// Negative sizes are normalized like [`Rect::new`].
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Create a zero-area rectangle at a point.
    pub const fn from_point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Width (`max_x - min_x`).
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height (`max_y - min_y`).
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Area of the rectangle.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center point as `(x, y)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (mid(self.min_x, self.max_x), mid(self.min_y, self.max_y))
    }

    /// True if the rectangle has no area.
    pub fn is_point(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// True if all coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Whether `other` lies fully inside this rectangle. Touching edges count as inside.
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Whether the two rectangles overlap. Touching edges count as overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Coordinate equality within `eps` on every edge.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        near(self.min_x, other.min_x, eps)
            && near(self.min_y, other.min_y, eps)
            && near(self.max_x, other.max_x, eps)
            && near(self.max_y, other.max_y, eps)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow by `dx` horizontally and `dy` vertically on each side.
    pub fn inflate(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.min_x - dx,
            self.min_y - dy,
            self.max_x + dx,
            self.max_y + dy,
        )
    }

    /// Squared distance between the centers of two rectangles.
    pub fn center_distance_sq(&self, other: &Self) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        let dx = ax - bx;
        let dy = ay - by;
        dx * dx + dy * dy
    }

    /// The sub-rectangle covering quadrant `q`, split at the center.
    pub fn quadrant(&self, q: Quadrant) -> Self {
        let (cx, cy) = self.center();
        match q {
            Quadrant::LeftTop => Self {
                min_x: self.min_x,
                min_y: cy,
                max_x: cx,
                max_y: self.max_y,
            },
            Quadrant::RightTop => Self {
                min_x: cx,
                min_y: cy,
                max_x: self.max_x,
                max_y: self.max_y,
            },
            Quadrant::LeftBottom => Self {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: cx,
                max_y: cy,
            },
            Quadrant::RightBottom => Self {
                min_x: cx,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: cy,
            },
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(r.min_x, r.min_y, r.max_x, r.max_y)
    }
}

impl From<kurbo::Point> for Rect {
    fn from(p: kurbo::Point) -> Self {
        Self::from_point(p.x, p.y)
    }
}

/// One of the four equal sub-rectangles a node's bound splits into.
///
/// The discriminant is the child slot index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper left (`min_x..cx`, `cy..max_y`).
    LeftTop = 0,
    /// Upper right (`cx..max_x`, `cy..max_y`).
    RightTop = 1,
    /// Lower left (`min_x..cx`, `min_y..cy`).
    LeftBottom = 2,
    /// Lower right (`cx..max_x`, `min_y..cy`).
    RightBottom = 3,
}

impl Quadrant {
    /// All quadrants in slot order.
    pub const ALL: [Self; 4] = [
        Self::LeftTop,
        Self::RightTop,
        Self::LeftBottom,
        Self::RightBottom,
    ];

    /// Child slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The single-bit mask for this quadrant.
    pub const fn flag(self) -> Quadrants {
        match self {
            Self::LeftTop => Quadrants::LEFT_TOP,
            Self::RightTop => Quadrants::RIGHT_TOP,
            Self::LeftBottom => Quadrants::LEFT_BOTTOM,
            Self::RightBottom => Quadrants::RIGHT_BOTTOM,
        }
    }

    pub(crate) const fn is_top(self) -> bool {
        matches!(self, Self::LeftTop | Self::RightTop)
    }

    pub(crate) const fn is_left(self) -> bool {
        matches!(self, Self::LeftTop | Self::LeftBottom)
    }

    /// Mirror across the horizontal split line (top <-> bottom).
    pub(crate) const fn flip_vertical(self) -> Self {
        match self {
            Self::LeftTop => Self::LeftBottom,
            Self::RightTop => Self::RightBottom,
            Self::LeftBottom => Self::LeftTop,
            Self::RightBottom => Self::RightTop,
        }
    }

    /// Mirror across the vertical split line (left <-> right).
    pub(crate) const fn flip_horizontal(self) -> Self {
        match self {
            Self::LeftTop => Self::RightTop,
            Self::RightTop => Self::LeftTop,
            Self::LeftBottom => Self::RightBottom,
            Self::RightBottom => Self::LeftBottom,
        }
    }
}

bitflags::bitflags! {
    /// Set of quadrants, used when classifying a rectangle against a node's children.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Quadrants: u8 {
        /// [`Quadrant::LeftTop`]
        const LEFT_TOP     = 0b0001;
        /// [`Quadrant::RightTop`]
        const RIGHT_TOP    = 0b0010;
        /// [`Quadrant::LeftBottom`]
        const LEFT_BOTTOM  = 0b0100;
        /// [`Quadrant::RightBottom`]
        const RIGHT_BOTTOM = 0b1000;
    }
}

impl Quadrants {
    /// The quadrant if exactly one is set.
    pub fn single(self) -> Option<Quadrant> {
        if self.bits().count_ones() != 1 {
            return None;
        }
        Quadrant::ALL.into_iter().find(|q| self.contains(q.flag()))
    }
}

/// How a region query or removal matches entities.
///
/// Mirrors interactive rectangle selection in CAD tools.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectMode {
    /// Window selection: the region must fully contain the entity.
    Contains,
    /// Crossing selection: any overlap with the region, touching edges included.
    #[default]
    Intersects,
}

impl SelectMode {
    /// Whether an entity with bounds `entity` is selected by `region`.
    #[inline]
    pub fn matches(self, region: &Rect, entity: &Rect) -> bool {
        match self {
            Self::Contains => region.contains(entity),
            Self::Intersects => region.intersects(entity),
        }
    }
}

/// Direction for [`QuadTree::find_neighbor`](crate::QuadTree::find_neighbor).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FindMode {
    /// Towards `max_y`.
    Top,
    /// Towards `min_y`.
    Bottom,
    /// Towards `min_x`.
    Left,
    /// Towards `max_x`.
    Right,
}

#[inline]
pub(crate) fn mid(a: f64, b: f64) -> f64 {
    0.5 * (a + b)
}

#[inline]
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[inline]
fn near(a: f64, b: f64, eps: f64) -> bool {
    let d = a - b;
    -eps <= d && d <= eps
}
