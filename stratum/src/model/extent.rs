use serde::{Deserialize, Serialize};
use stratum_types::cartesian::{Point2d, Rect};
use stratum_types::Contour;

use crate::error::{Result, StratumError};
use crate::feature::Feature;

/// Bounds of a model: planar bounds and an optional elevation range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Left border.
    pub x_min: f64,
    /// Right border.
    pub x_max: f64,
    /// Bottom border.
    pub y_min: f64,
    /// Top border.
    pub y_max: f64,
    /// Elevation range `(min, max)`.
    pub z_range: Option<(f64, f64)>,
}

impl Extent {
    /// Creates a planar extent.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        check_range("x", x_min, x_max)?;
        check_range("y", y_min, y_max)?;

        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_range: None,
        })
    }

    /// Returns the extent with the given elevation range.
    pub fn with_z(self, z_min: f64, z_max: f64) -> Result<Self> {
        check_range("z", z_min, z_max)?;
        Ok(Self {
            z_range: Some((z_min, z_max)),
            ..self
        })
    }

    /// Planar bounds of all feature geometries, rounded to 2 decimal places.
    pub fn from_features(features: &[Feature]) -> Result<Self> {
        let rect = Rect::merge_all(features.iter().filter_map(|f| f.geometry.bounding_rect()))
            .ok_or_else(|| {
                StratumError::invalid_input("cannot calculate extent of an empty feature set")
            })?;

        Self::new(
            round2(rect.x_min()),
            round2(rect.x_max()),
            round2(rect.y_min()),
            round2(rect.y_max()),
        )
    }

    /// Extent values in the `[x_min, x_max, y_min, y_max, z_min, z_max]` order. Elevations are only included if set.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = vec![self.x_min, self.x_max, self.y_min, self.y_max];
        if let Some((z_min, z_max)) = self.z_range {
            values.extend([z_min, z_max]);
        }

        values
    }

    /// Planar bounds as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x_min, self.y_min, self.x_max, self.y_max)
    }

    /// Bounding box polygon of the extent, counterclockwise.
    pub fn bbox(&self) -> Contour<Point2d> {
        self.rect().into_contour()
    }
}

fn check_range(axis: &str, min: f64, max: f64) -> Result<()> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(StratumError::invalid_input(format!(
            "invalid {axis} bounds: {min}..{max}"
        )))
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Number of model grid cells along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Cells along x.
    pub x: u32,
    /// Cells along y.
    pub y: u32,
    /// Cells along z.
    pub z: u32,
}

impl Resolution {
    /// Creates a resolution. All values must be positive.
    pub fn new(x: u32, y: u32, z: u32) -> Result<Self> {
        if x == 0 || y == 0 || z == 0 {
            return Err(StratumError::invalid_input(format!(
                "resolution must be positive, got [{x}, {y}, {z}]"
            )));
        }

        Ok(Self { x, y, z })
    }

    /// Resolution as `[x, y, z]`.
    pub fn to_array(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }
}
