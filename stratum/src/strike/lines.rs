use log::debug;
use stratum_types::cartesian::Point3d;
use stratum_types::{Contour, Geom, Segment};

use crate::error::{Result, StratumError};
use crate::feature::Feature;
use crate::options::validate_increment;
use crate::strike::{isopoint_count, nearest_neighbor};

/// Synthesizes strike lines between two elevation levels of the same formation.
///
/// Each of `level_a` and `level_b` is a set of point or line records lying at one elevation; the sets may be given in
/// any order. Every vertex of the lower level is matched with the nearest (in the plane) vertex of the upper level.
/// For every line index `j` in `1..=n`, where `n` is the [`isopoint_count`] of the two elevations, each matched pair
/// contributes a vertex at `t = j / (n + 1)` along the pair segment. The vertices of one `j`, in the order of the lower
/// level, form a synthesized line at elevation `z_min + j * increment`.
///
/// Synthesized records get ids `first_id, first_id + 1, ...` in the order of increasing elevation. A lower level
/// with a single vertex produces point records instead of lines.
///
/// Returns an empty vector if the levels are too close to fit a line between them.
pub fn interpolate_lines(
    level_a: &[Feature],
    level_b: &[Feature],
    increment: f64,
    first_id: u64,
) -> Result<Vec<Feature>> {
    validate_increment(increment)?;

    let z_a = level_elevation(level_a)?;
    let z_b = level_elevation(level_b)?;
    if z_a == z_b {
        return Err(StratumError::invalid_input(format!(
            "cannot interpolate between two levels at the same elevation {z_a}"
        )));
    }

    let (base, top, z_min, z_max) = if z_a < z_b {
        (level_a, level_b, z_a, z_b)
    } else {
        (level_b, level_a, z_b, z_a)
    };

    let base_points: Vec<Point3d> = base.iter().flat_map(|f| f.vertices().copied()).collect();
    let top_points: Vec<Point3d> = top.iter().flat_map(|f| f.vertices().copied()).collect();
    if base_points.is_empty() || top_points.is_empty() {
        return Err(StratumError::invalid_input(format!(
            "levels {z_min} and {z_max} must both have vertices, got {} and {}",
            base_points.len(),
            top_points.len()
        )));
    }

    let count = isopoint_count(z_min, z_max, increment)?;
    if count <= 0 {
        debug!("Levels {z_min} and {z_max} are adjacent, no lines to synthesize");
        return Ok(vec![]);
    }

    let pairs = base_points
        .iter()
        .map(|p| Ok((p, &top_points[nearest_neighbor(p, &top_points)?])))
        .collect::<Result<Vec<_>>>()?;

    if first_id.checked_add(count as u64 - 1).is_none() {
        return Err(StratumError::invalid_input(format!(
            "{count} lines starting at id {first_id} exceed the id range"
        )));
    }

    let formation = &base[0].formation;
    let lines = (1..=count)
        .map(|j| {
            let t = j as f64 / (count + 1) as f64;
            let z = z_min + j as f64 * increment;
            let mut vertices: Vec<Point3d> = pairs
                .iter()
                .map(|(from, to)| {
                    let p = Segment(*from, *to).interpolate(t);
                    Point3d::new(p.x(), p.y(), z)
                })
                .collect();

            let geometry = if vertices.len() == 1 {
                Geom::Point(vertices.remove(0))
            } else {
                Geom::Contour(Contour::open(vertices))
            };

            Feature {
                geometry,
                formation: formation.clone(),
                z,
                id: Some(first_id + (j - 1) as u64),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "Synthesized {} lines of {} vertices between levels {z_min} and {z_max}",
        lines.len(),
        pairs.len()
    );

    Ok(lines)
}

/// Elevation shared by all records of a level.
fn level_elevation(level: &[Feature]) -> Result<f64> {
    let Some(first) = level.first() else {
        return Err(StratumError::invalid_input(
            "cannot interpolate from an empty set of points",
        ));
    };

    if let Some(other) = level.iter().find(|f| f.z != first.z) {
        return Err(StratumError::invalid_input(format!(
            "records of one level must share an elevation, got {} and {}",
            first.z, other.z
        )));
    }

    Ok(first.z)
}
