//! Points and rectangles in logical pixels.

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Create a size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::new(0.0, 0.0),
    };

    /// Create a rectangle from position and extent.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Width.
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Height.
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Whether `point` lies inside. The left and top edges are inclusive,
    /// the right and bottom edges exclusive, so adjacent rectangles never
    /// both contain a point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.size.width
            && point.y < self.origin.y + self.size.height
    }

    /// Translate a point into this rectangle's local coordinates.
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(point.x - self.origin.x, point.y - self.origin.y)
    }
}
