//! Geometry primitives in container-local coordinates.
//!
//! - [`Point`]: a position.
//! - [`Size`]: a width/height pair.
//! - [`Bounds`]: an axis-aligned bounding box used as the collision proxy
//!   for every generated shape.

/// A 2D point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Returns the point reached by travelling `distance` from this point
    /// along `angle` (radians, measured from the positive x-axis).
    pub fn polar_offset(self, angle: f32, distance: f32) -> Self {
        Self {
            x: angle.cos().mul_add(distance, self.x),
            y: angle.sin().mul_add(distance, self.y),
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds, and the size
    /// is distributed equally in all directions around that center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;

        Bounds {
            min_x: self.x - half_width,
            min_y: self.y - half_height,
            max_x: self.x + half_width,
            max_y: self.y + half_height,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the shorter of the two sides
    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }

    /// Returns the geometric center of an area of this size anchored at the origin
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size
    pub fn new_from_top_left(point: Point, size: Size) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x + size.width,
            max_y: point.y + size.height,
        }
    }

    /// Creates the smallest bounds enclosing every point.
    ///
    /// Returns default (empty) bounds for an empty slice.
    pub fn enclosing(points: &[Point]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };

        rest.iter().fold(
            Self {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |acc, p| Self {
                min_x: acc.min_x.min(p.x),
                min_y: acc.min_y.min(p.y),
                max_x: acc.max_x.max(p.x),
                max_y: acc.max_y.max(p.y),
            },
        )
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Grows the bounds by `amount` on every side
    pub fn expand(self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Returns true if the two boxes share any point.
    ///
    /// Edges are inclusive: boxes that merely touch are reported as
    /// intersecting.
    pub fn intersects(self, other: Bounds) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_polar_offset() {
        let p = Point::new(10.0, 10.0).polar_offset(std::f32::consts::FRAC_PI_2, 5.0);
        assert_approx_eq!(f32, p.x(), 10.0, epsilon = 1e-5);
        assert_approx_eq!(f32, p.y(), 15.0, epsilon = 1e-5);
    }

    #[test]
    fn test_point_to_bounds() {
        let bounds = Point::new(50.0, 40.0).to_bounds(Size::new(20.0, 10.0));
        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 35.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 45.0);
    }

    #[test]
    fn test_size_min_side_and_center() {
        let size = Size::new(800.0, 600.0);
        assert_eq!(size.min_side(), 600.0);
        assert_eq!(size.center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_bounds_enclosing() {
        let bounds = Bounds::enclosing(&[
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(1.0, 1.0),
        ]);
        assert_eq!(bounds.min_x(), -2.0);
        assert_eq!(bounds.min_y(), -1.0);
        assert_eq!(bounds.width(), 5.0);
        assert_eq!(bounds.height(), 5.0);
    }

    #[test]
    fn test_bounds_enclosing_empty() {
        assert_eq!(Bounds::enclosing(&[]), Bounds::default());
    }

    #[test]
    fn test_bounds_expand() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(4.0, 2.0)).expand(1.5);
        assert_eq!(bounds.min_x(), 8.5);
        assert_eq!(bounds.max_y(), 13.5);
    }

    #[test]
    fn test_bounds_intersects() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let overlapping = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let touching = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
        let apart = Bounds::new_from_top_left(Point::new(10.5, 0.0), Size::new(10.0, 10.0));
        let below = Bounds::new_from_top_left(Point::new(0.0, 11.0), Size::new(10.0, 10.0));

        assert!(a.intersects(overlapping));
        assert!(overlapping.intersects(a));
        assert!(a.intersects(touching));
        assert!(!a.intersects(apart));
        assert!(!a.intersects(below));
    }

    #[test]
    fn test_bounds_intersects_contained() {
        let outer = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        let inner = Bounds::new_from_top_left(Point::new(40.0, 40.0), Size::new(5.0, 5.0));
        assert!(outer.intersects(inner));
        assert!(inner.intersects(outer));
    }
}
