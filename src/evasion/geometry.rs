// evasion/geometry.rs

use std::fmt;

/// A point in viewport space: pixels from the top-left corner, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of the vector pointing from `self` towards `other`
    pub fn angle_to(self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

/// On-screen bounding box of the target, as measured from what is rendered
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetBox {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        TargetBox {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_anchor(anchor: Point, size: Size) -> Self {
        TargetBox::new(anchor.x, anchor.y, size.width, size.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

/// Current window dimensions. Read fresh for every sample, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportBounds {
    pub width: f32,
    pub height: f32,
}

impl ViewportBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        ViewportBounds { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Clamp one anchor coordinate into `[padding, extent - size - padding]`.
///
/// The lower bound wins when the range collapses, so a viewport too small for
/// the target still pins it at `padding` instead of producing a NaN or a
/// negative offset.
pub fn clamp_axis(value: f32, size: f32, extent: f32, padding: f32) -> f32 {
    value.min(extent - size - padding).max(padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_of_box() {
        let target = TargetBox::new(500.0, 400.0, 100.0, 60.0);
        assert_eq!(target.center(), Point::new(550.0, 430.0));
    }

    #[test]
    fn test_distance_and_angle() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);

        // Straight down the screen is +90 degrees because y grows downward
        let angle = a.angle_to(Point::new(0.0, 10.0));
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_axis_inside_range() {
        assert_eq!(clamp_axis(300.0, 100.0, 1920.0, 100.0), 300.0);
        assert_eq!(clamp_axis(50.0, 100.0, 1920.0, 100.0), 100.0);
        assert_eq!(clamp_axis(1900.0, 100.0, 1920.0, 100.0), 1720.0);
    }

    #[test]
    fn test_clamp_axis_collapsed_range_pins_to_padding() {
        // 250 wide target in a 300 wide viewport: upper bound is -50
        assert_eq!(clamp_axis(900.0, 250.0, 300.0, 100.0), 100.0);
        assert_eq!(clamp_axis(-900.0, 250.0, 300.0, 100.0), 100.0);
    }

    #[test]
    fn test_box_contains() {
        let target = TargetBox::new(10.0, 10.0, 20.0, 20.0);
        assert!(target.contains(Point::new(15.0, 29.0)));
        assert!(!target.contains(Point::new(31.0, 15.0)));
    }
}
