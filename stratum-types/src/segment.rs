//! Straight line segments and linear interpolation along them.

use num_traits::Float;

use crate::cartesian::{CartesianPoint2d, Point2};

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<N: Float, P: CartesianPoint2d<Num = N>> Segment<'_, P> {
    /// Planar point at parameter `t` along the segment.
    ///
    /// Computed as `t * end + (1 - t) * start`, so `t = 0` gives exactly the start point and `t = 1` gives exactly
    /// the end point.
    pub fn interpolate(&self, t: N) -> Point2<N> {
        let s = N::one() - t;
        Point2::new(
            t * self.1.x() + s * self.0.x(),
            t * self.1.y() + s * self.0.y(),
        )
    }
}
