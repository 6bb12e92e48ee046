use serde::{Deserialize, Serialize};

use crate::error::{Result, StratumError};
use crate::feature::{extract_xy, Feature};
use crate::orientation::Orientation;

/// Interface point of a geological surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceRow {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Elevation.
    pub z: f64,
    /// Name of the geological surface.
    pub formation: String,
}

/// Converts features into interface points. Lines contribute one row per vertex.
pub fn to_interfaces(features: &[Feature]) -> Result<Vec<InterfaceRow>> {
    extract_xy(features)
        .into_iter()
        .map(|row| {
            if row.formation.is_empty() {
                return Err(StratumError::invalid_input(format!(
                    "interface point ({}, {}, {}) has no formation",
                    row.x, row.y, row.z
                )));
            }

            Ok(InterfaceRow {
                x: row.x,
                y: row.y,
                z: row.z,
                formation: row.formation,
            })
        })
        .collect()
}

/// Checks the orientations for out-of-range dip and azimuth values.
pub fn validate_orientations(orientations: &[Orientation]) -> Result<()> {
    orientations.iter().try_for_each(Orientation::validate)
}
