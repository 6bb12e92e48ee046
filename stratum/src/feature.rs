//! Feature records and coordinate extraction.

use serde::{Deserialize, Serialize};
use stratum_types::cartesian::Point3d;
use stratum_types::{Contour, Geom, GeometryKind};

use crate::error::{Result, StratumError};

/// A row of a survey table: geometry of a geological surface observation with its formation, elevation and id.
///
/// `z` is the elevation the record is grouped by. For point records it is the elevation of the point, for strike
/// lines it is the elevation shared by all line vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Point or line geometry.
    pub geometry: Geom<Point3d>,
    /// Name of the geological surface.
    pub formation: String,
    /// Elevation.
    pub z: f64,
    /// Id of the elevation slice (strike line) the record belongs to.
    pub id: Option<u64>,
}

impl Feature {
    /// Creates a point record. Elevation is taken from the point.
    pub fn point(point: Point3d, formation: impl Into<String>, id: Option<u64>) -> Self {
        Self {
            z: point.z(),
            geometry: Geom::Point(point),
            formation: formation.into(),
            id,
        }
    }

    /// Creates a line record at elevation `z`.
    pub fn line(
        contour: Contour<Point3d>,
        formation: impl Into<String>,
        z: f64,
        id: Option<u64>,
    ) -> Self {
        Self {
            geometry: Geom::Contour(contour),
            formation: formation.into(),
            z,
            id,
        }
    }

    /// Creates a line record at elevation `z`, checking that all vertices of the contour lie at `z`.
    pub fn try_line(
        contour: Contour<Point3d>,
        formation: impl Into<String>,
        z: f64,
        id: Option<u64>,
    ) -> Result<Self> {
        let feature = Self::line(contour, formation, z, id);
        feature.check_elevation()?;
        Ok(feature)
    }

    /// Checks that every vertex of the record lies at its elevation `z`.
    pub fn check_elevation(&self) -> Result<()> {
        let elevation = match &self.geometry {
            Geom::Point(p) => Some(p.z()),
            Geom::Contour(c) => c.elevation(),
        };

        if elevation == Some(self.z) {
            Ok(())
        } else {
            Err(StratumError::invalid_input(format!(
                "{} of formation '{}' does not lie at its elevation Z={}",
                self.kind(),
                self.formation,
                self.z
            )))
        }
    }

    /// Returns the same record with a different id.
    pub fn with_id(self, id: u64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// Kind of the record geometry.
    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }

    /// Iterates over geometry vertices.
    pub fn vertices(&self) -> std::slice::Iter<'_, Point3d> {
        self.geometry.iter_points()
    }

    /// Smallest `Y` among the vertices, used as the sort key of the record.
    pub fn min_y(&self) -> f64 {
        self.vertices().map(|p| p.y()).fold(f64::INFINITY, f64::min)
    }

    /// Id of the record, failing if it is not set.
    pub fn require_id(&self) -> Result<u64> {
        self.id.ok_or_else(|| {
            StratumError::invalid_input(format!(
                "record of formation '{}' at Z={} has no id",
                self.formation, self.z
            ))
        })
    }
}

/// A single vertex of a feature with its planar coordinates extracted into columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRow {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Elevation of the feature.
    pub z: f64,
    /// Name of the geological surface.
    pub formation: String,
    /// Id of the feature.
    pub id: Option<u64>,
    /// Index of the feature the vertex was extracted from.
    pub feature_index: usize,
}

impl VertexRow {
    /// Vertex as a 3d point at the feature elevation.
    pub fn point(&self) -> Point3d {
        Point3d::new(self.x, self.y, self.z)
    }
}

/// Extracts `X` and `Y` columns from the feature geometries.
///
/// Point features produce one row each, lines produce one row per vertex. Rows keep the order of the features and of
/// the vertices inside the lines. The elevation of the row is the feature `z`, so extracting from the point features
/// made of the rows gives the same rows again.
pub fn extract_xy(features: &[Feature]) -> Vec<VertexRow> {
    features
        .iter()
        .enumerate()
        .flat_map(|(feature_index, feature)| {
            feature.vertices().map(move |p| VertexRow {
                x: p.x(),
                y: p.y(),
                z: feature.z,
                formation: feature.formation.clone(),
                id: feature.id,
                feature_index,
            })
        })
        .collect()
}

/// Checks that every feature has an id.
pub(crate) fn require_ids(features: &[Feature]) -> Result<()> {
    features.iter().try_for_each(|f| f.require_id().map(|_| ()))
}

/// Checks that every feature has an id and lies at its elevation.
pub(crate) fn require_slices(features: &[Feature]) -> Result<()> {
    require_ids(features)?;
    features.iter().try_for_each(Feature::check_elevation)
}

/// Splits features by formation, keeping the order in which formations first appear.
pub fn group_by_formation(features: &[Feature]) -> Vec<(String, Vec<Feature>)> {
    let mut groups: Vec<(String, Vec<Feature>)> = vec![];
    for feature in features {
        match groups
            .iter_mut()
            .find(|(formation, _)| *formation == feature.formation)
        {
            Some((_, group)) => group.push(feature.clone()),
            None => groups.push((feature.formation.clone(), vec![feature.clone()])),
        }
    }

    groups
}
