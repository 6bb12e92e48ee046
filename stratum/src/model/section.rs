use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stratum_types::cartesian::{CartesianPoint2d, Point2d};
use stratum_types::Geom;

use crate::error::{Result, StratumError};

/// Default resolution of a custom section: `[horizontal, vertical]` cell count.
pub const DEFAULT_SECTION_RESOLUTION: [u32; 2] = [100, 80];

/// Geometry of a named custom section, as digitized on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTrace<P = Point2d> {
    /// Section name.
    pub name: String,
    /// Point or line geometry of the section trace.
    pub geometry: Geom<P>,
}

/// Vertical section of a model between two map points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Start of the section.
    pub start: Point2d,
    /// End of the section.
    pub end: Point2d,
    /// Section resolution, `[horizontal, vertical]`.
    pub resolution: [u32; 2],
}

/// Sections by name.
pub type SectionDict = BTreeMap<String, Section>;

/// Builds sections from the traces.
///
/// All vertices of the traces with the same name are taken in order; the first two of them are the start and the end
/// of the section. Traces can therefore be given either as lines or as pairs of points.
pub fn to_section_dict<P>(traces: &[SectionTrace<P>], resolution: [u32; 2]) -> Result<SectionDict>
where
    P: CartesianPoint2d<Num = f64>,
{
    if resolution.contains(&0) {
        return Err(StratumError::invalid_input(format!(
            "section resolution must be positive, got {resolution:?}"
        )));
    }

    let mut vertices: BTreeMap<&str, Vec<Point2d>> = BTreeMap::new();
    for trace in traces {
        vertices
            .entry(trace.name.as_str())
            .or_default()
            .extend(trace.geometry.iter_points().map(|p| p.to_point2()));
    }

    vertices
        .into_iter()
        .map(|(name, points)| match points[..] {
            [start, end, ..] => Ok((
                name.to_string(),
                Section {
                    start,
                    end,
                    resolution,
                },
            )),
            _ => Err(StratumError::invalid_input(format!(
                "section '{name}' needs at least two points, got {}",
                points.len()
            ))),
        })
        .collect()
}
