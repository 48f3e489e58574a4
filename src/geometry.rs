//! Rectangles, edge insets and affine transforms.
//!
//! Sizes are plain `Vector2<f64>` values and transforms are 2D affine transforms stored as
//! homogeneous 3×3 matrices (column vectors, so `b * a` applies `a` first).

use cgmath::{EuclideanSpace, Matrix3, Point2, SquareMatrix, Vector2, Vector3, Zero};
use std::ops;

/// A width/height pair.
pub type Size = Vector2<f64>;

/// A 2D affine transform.
pub type Transform = Matrix3<f64>;

/// Converts degrees to radians the same way rotation modifiers always have.
pub const DEGREES_TO_RADIANS: f64 = 0.017_453_3;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a rectangle from its components.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            origin: Point2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::origin(),
            size: Vector2::zero(),
        }
    }

    /// Returns a new rectangle shrunk by the given insets. Never produces a negative size.
    pub fn inset_by(&self, insets: EdgeInsets) -> Rect {
        Rect {
            origin: Point2::new(self.origin.x + insets.leading, self.origin.y + insets.top),
            size: Vector2::new(
                (self.size.x - insets.horizontal()).max(0.),
                (self.size.y - insets.vertical()).max(0.),
            ),
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::zero()
    }
}

impl ops::Add<Vector2<f64>> for Rect {
    type Output = Rect;
    fn add(self, offset: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin + offset,
            size: self.size,
        }
    }
}

/// Insets from each edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f64,
    pub leading: f64,
    pub bottom: f64,
    pub trailing: f64,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.,
        leading: 0.,
        bottom: 0.,
        trailing: 0.,
    };

    pub fn new(top: f64, leading: f64, bottom: f64, trailing: f64) -> EdgeInsets {
        EdgeInsets {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    /// The same inset on every edge.
    pub fn uniform(value: f64) -> EdgeInsets {
        EdgeInsets::new(value, value, value, value)
    }

    /// Sum of the leading and trailing insets.
    pub fn horizontal(&self) -> f64 {
        self.leading + self.trailing
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl ops::Add for EdgeInsets {
    type Output = EdgeInsets;
    fn add(self, other: EdgeInsets) -> EdgeInsets {
        EdgeInsets {
            top: self.top + other.top,
            leading: self.leading + other.leading,
            bottom: self.bottom + other.bottom,
            trailing: self.trailing + other.trailing,
        }
    }
}

/// A set of rectangle edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: bool,
    pub leading: bool,
    pub bottom: bool,
    pub trailing: bool,
}

impl Edges {
    pub const NONE: Edges = Edges::new(false, false, false, false);
    pub const ALL: Edges = Edges::new(true, true, true, true);
    pub const TOP: Edges = Edges::new(true, false, false, false);
    pub const BOTTOM: Edges = Edges::new(false, false, true, false);
    pub const VERTICAL: Edges = Edges::new(true, false, true, false);
    pub const HORIZONTAL: Edges = Edges::new(false, true, false, true);

    pub const fn new(top: bool, leading: bool, bottom: bool, trailing: bool) -> Edges {
        Edges {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    /// Keeps only the insets on edges in this set.
    pub fn select(self, insets: EdgeInsets) -> EdgeInsets {
        let pick = |on: bool, value: f64| if on { value } else { 0. };
        EdgeInsets {
            top: pick(self.top, insets.top),
            leading: pick(self.leading, insets.leading),
            bottom: pick(self.bottom, insets.bottom),
            trailing: pick(self.trailing, insets.trailing),
        }
    }
}

/// The identity transform.
pub fn identity() -> Transform {
    Matrix3::identity()
}

/// A translation by `(x, y)`.
pub fn translation(x: f64, y: f64) -> Transform {
    Matrix3::new(1., 0., 0., 0., 1., 0., x, y, 1.)
}

/// A rotation by `radians` around the origin.
pub fn rotation(radians: f64) -> Transform {
    let (sin, cos) = radians.sin_cos();
    Matrix3::new(cos, sin, 0., -sin, cos, 0., 0., 0., 1.)
}

/// A non-uniform scale.
pub fn scale(x: f64, y: f64) -> Transform {
    Matrix3::new(x, 0., 0., 0., y, 0., 0., 0., 1.)
}

/// Returns a transform that applies `first` and then `then`.
pub fn concat(first: Transform, then: Transform) -> Transform {
    then * first
}

/// Applies a transform to a point.
pub fn apply(transform: Transform, point: Point2<f64>) -> Point2<f64> {
    let v = transform * Vector3::new(point.x, point.y, 1.);
    Point2::new(v.x, v.y)
}

#[test]
fn test_inset_never_negative() {
    let rect = Rect::from_xywh(0., 0., 10., 4.);
    let inset = rect.inset_by(EdgeInsets::uniform(3.));
    assert_eq!(inset.origin, Point2::new(3., 3.));
    assert_eq!(inset.size, Vector2::new(4., 0.));
}

#[test]
fn test_concat_applies_in_order() {
    let t = concat(scale(2., 2.), translation(5., 0.));
    assert_eq!(apply(t, Point2::new(1., 1.)), Point2::new(7., 2.));

    let r = rotation(std::f64::consts::FRAC_PI_2);
    let p = apply(r, Point2::new(1., 0.));
    assert!((p.x).abs() < 1e-9 && (p.y - 1.).abs() < 1e-9);
}
