//! Geometry primitives for geological survey data.
//!
//! All geometries live in a cartesian coordinate space. Points carry an elevation as their `z`
//! coordinate; strike lines and other polylines are represented by [`Contour`]. Records that can
//! hold either kind of geometry use the tagged [`Geom`] enum.

pub mod cartesian;
pub mod contour;
pub mod error;
pub mod geometry;
pub mod segment;

pub use contour::Contour;
pub use geometry::{Geom, GeometryKind};
pub use segment::Segment;
