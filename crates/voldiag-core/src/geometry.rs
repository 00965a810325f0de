//! Geometric primitives for the native layout.
//!
//! Coordinates follow SVG conventions: the origin is the top-left corner and
//! `y` grows downward. All values are in pixels.

/// A point in 2D space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y coordinate.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the bounds of a box of `size` centered at this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the component-wise maximum of two sizes.
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// An axis-aligned rectangle described by its corners.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds of `size` centered at `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the smallest bounds containing both `self` and `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Returns the point where the segment from the center toward `target`
    /// crosses the boundary.
    ///
    /// If `target` is the center itself, the center is returned.
    pub fn boundary_point_toward(&self, target: Point) -> Point {
        let center = self.center();
        let dx = target.x - center.x;
        let dy = target.y - center.y;
        if dx == 0.0 && dy == 0.0 {
            return center;
        }

        let half_width = self.width() / 2.0;
        let half_height = self.height() / 2.0;
        let scale_x = if dx == 0.0 {
            f32::INFINITY
        } else {
            half_width / dx.abs()
        };
        let scale_y = if dy == 0.0 {
            f32::INFINITY
        } else {
            half_height / dy.abs()
        };
        let scale = scale_x.min(scale_y);

        Point::new(center.x + dx * scale, center.y + dy * scale)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_bounds_from_center() {
        let bounds = Point::new(50.0, 40.0).to_bounds(Size::new(20.0, 10.0));
        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 35.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 45.0);
        assert_eq!(bounds.center(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_boundary_point_horizontal() {
        let bounds = Point::new(0.0, 0.0).to_bounds(Size::new(100.0, 50.0));
        let point = bounds.boundary_point_toward(Point::new(300.0, 0.0));
        assert!(approx_eq!(f32, point.x(), 50.0, ulps = 2));
        assert!(approx_eq!(f32, point.y(), 0.0, ulps = 2));
    }

    #[test]
    fn test_boundary_point_vertical() {
        let bounds = Point::new(0.0, 0.0).to_bounds(Size::new(100.0, 50.0));
        let point = bounds.boundary_point_toward(Point::new(0.0, -200.0));
        assert!(approx_eq!(f32, point.x(), 0.0, ulps = 2));
        assert!(approx_eq!(f32, point.y(), -25.0, ulps = 2));
    }

    #[test]
    fn test_boundary_point_at_center() {
        let bounds = Point::new(5.0, 5.0).to_bounds(Size::new(10.0, 10.0));
        assert_eq!(
            bounds.boundary_point_toward(Point::new(5.0, 5.0)),
            Point::new(5.0, 5.0)
        );
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Point::new(x, y).to_bounds(Size::new(w, h)))
    }

    proptest! {
        #[test]
        fn merge_contains_both(a in bounds_strategy(), b in bounds_strategy()) {
            let merged = a.merge(&b);
            prop_assert!(merged.min_x() <= a.min_x() && merged.min_x() <= b.min_x());
            prop_assert!(merged.min_y() <= a.min_y() && merged.min_y() <= b.min_y());
            prop_assert!(merged.max_x() >= a.max_x() && merged.max_x() >= b.max_x());
            prop_assert!(merged.max_y() >= a.max_y() && merged.max_y() >= b.max_y());
        }

        #[test]
        fn boundary_point_lies_on_edge(
            bounds in bounds_strategy(),
            tx in -5000.0f32..5000.0,
            ty in -5000.0f32..5000.0,
        ) {
            let target = Point::new(tx, ty);
            prop_assume!(target != bounds.center());
            let point = bounds.boundary_point_toward(target);
            let on_vertical = (point.x() - bounds.min_x()).abs() < 0.01
                || (point.x() - bounds.max_x()).abs() < 0.01;
            let on_horizontal = (point.y() - bounds.min_y()).abs() < 0.01
                || (point.y() - bounds.max_y()).abs() < 0.01;
            prop_assert!(on_vertical || on_horizontal);
        }
    }
}
