use num_traits::{Bounded, FromPrimitive, Num};

use crate::cartesian::{Point2, Vector2};

/// A point in 2d cartesian coordinate space.
///
/// Three dimensional points implement this trait too, exposing their planar (map view) coordinates. This allows
/// planar algorithms like nearest neighbor search to run on elevation points directly.
pub trait CartesianPoint2d {
    /// Numeric type used to represent coordinates.
    type Num: Num + Copy + PartialOrd + Bounded + FromPrimitive;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Returns vector from the `other` point to this one.
    fn sub(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Vector2<Self::Num> {
        Vector2::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Squared euclidean distance between the points.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        self.sub(other).magnitude_sq()
    }

    /// Returns the planar part of the point as a new 2d point.
    fn to_point2(&self) -> Point2<Self::Num> {
        Point2::new(self.x(), self.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::{Point2d, Point3d};

    #[test]
    fn distance_between_planar_and_elevated_points() {
        let a = Point3d::new(0.0, 0.0, 100.0);
        let b = Point2d::new(3.0, 4.0);

        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!(b.distance_sq(&a), 25.0);
        assert_eq!(a.to_point2(), Point2d::new(0.0, 0.0));
    }
}
