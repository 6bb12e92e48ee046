//! Contour is a sequence of points.
//!
//! Contours can be:
//! * **open** - the first and the last points of the contour are not connected. Strike lines (lines of equal
//!   elevation along a layer boundary) are open contours.
//! * **closed** - the first and the last points of the contour are connected. For example, the border of a model
//!   extent is a closed contour.
//!
//! A closed contour does not duplicate its first point at the end.

use serde::{Deserialize, Serialize};

use crate::cartesian::Point3d;
use crate::error::StratumTypesError;

/// Sequence of points. See module level documentation for details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour<Point> {
    points: Vec<Point>,
    is_closed: bool,
}

impl<Point> Contour<Point> {
    /// Creates an open contour.
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            is_closed: false,
        }
    }

    /// Creates a closed contour.
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            is_closed: true,
        }
    }

    /// Creates an open contour, checking that it has at least two points and so defines a line.
    pub fn try_open(points: Vec<Point>) -> Result<Self, StratumTypesError> {
        if points.len() < 2 {
            return Err(StratumTypesError::Conversion(format!(
                "a line needs at least 2 points, got {}",
                points.len()
            )));
        }

        Ok(Self::open(points))
    }

    /// Whether the contour is closed.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Points of the contour.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate over the points of the contour. The first point is not repeated at the end of closed contours.
    pub fn iter_points(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl Contour<Point3d> {
    /// Elevation shared by all points of the contour.
    ///
    /// Returns `None` if the contour is empty or its points lie at different elevations.
    pub fn elevation(&self) -> Option<f64> {
        let first = self.points.first()?.z();
        self.points
            .iter()
            .all(|p| p.z() == first)
            .then_some(first)
    }
}
