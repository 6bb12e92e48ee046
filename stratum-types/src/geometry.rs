//! Geometry of a feature record.
//!
//! Survey records carry either a single point or a line. Instead of inspecting the geometry at runtime, records store
//! a [`Geom`] and algorithms `match` on its variant (or on its [`GeometryKind`]).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Rect};
use crate::contour::Contour;

/// Geometry kind tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// Single point.
    Point,
    /// Line (open or closed contour).
    Contour,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryKind::Point => write!(f, "point"),
            GeometryKind::Contour => write!(f, "contour"),
        }
    }
}

/// Point or line geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom<P> {
    /// Point geometry.
    Point(P),
    /// Line geometry.
    Contour(Contour<P>),
}

impl<P> Geom<P> {
    /// Kind of the geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geom::Point(_) => GeometryKind::Point,
            Geom::Contour(_) => GeometryKind::Contour,
        }
    }

    /// Iterates over all vertices of the geometry. A point geometry yields exactly one vertex.
    pub fn iter_points(&self) -> std::slice::Iter<'_, P> {
        match self {
            Geom::Point(p) => std::slice::from_ref(p).iter(),
            Geom::Contour(c) => c.iter_points(),
        }
    }

    /// Returns the point if this is a point geometry.
    pub fn as_point(&self) -> Option<&P> {
        match self {
            Geom::Point(p) => Some(p),
            Geom::Contour(_) => None,
        }
    }
}

impl<P: CartesianPoint2d> Geom<P> {
    /// Planar bounding rectangle. Returns `None` for a contour without points.
    pub fn bounding_rect(&self) -> Option<Rect<P::Num>> {
        match self {
            Geom::Point(p) => Some(Rect::from_point(p)),
            Geom::Contour(c) => Rect::from_points(c.iter_points()),
        }
    }
}

impl<P> From<P> for Geom<P> {
    fn from(value: P) -> Self {
        Geom::Point(value)
    }
}

impl<P> From<Contour<P>> for Geom<P> {
    fn from(value: Contour<P>) -> Self {
        Geom::Contour(value)
    }
}
