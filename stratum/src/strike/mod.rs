//! Strike line reconstruction and densification.
//!
//! Strike lines are lines of equal elevation along the boundary of a geological layer. They are usually obtained by
//! intersecting the layer boundary with topographic contours, which gives a set of points per elevation. This module
//! connects such points into lines ([`create_linestrings`]) and fills the gaps between distant elevation levels with
//! synthesized lines ([`interpolate_strike_lines`]), so that orientations can be estimated from evenly spaced data.

mod isopoints;
mod lines;
mod linestrings;
mod nearest;
mod pipeline;

pub use isopoints::isopoint_count;
pub use lines::interpolate_lines;
pub use linestrings::{create_linestring, create_linestrings};
pub use nearest::nearest_neighbor;
pub use pipeline::{dedup_and_renumber, interpolate_strike_lines};

use crate::error::Result;
use crate::feature::{group_by_formation, Feature};
use crate::options::InterpolationOptions;

/// Runs [`interpolate_strike_lines`] for each formation separately and concatenates the results.
///
/// Ids are renumbered per formation. The first failing formation aborts the whole operation.
pub fn interpolate_strike_lines_by_formation(
    features: &[Feature],
    options: &InterpolationOptions,
) -> Result<Vec<Feature>> {
    let mut result = vec![];
    for (formation, group) in group_by_formation(features) {
        log::debug!("Interpolating strike lines of formation '{formation}'");
        result.extend(interpolate_strike_lines(&group, options)?);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_types::cartesian::Point3d;

    #[test]
    fn formations_are_processed_separately() {
        let mut features = vec![];
        for (formation, offset) in [("Shale", 0.0), ("Limestone", 500.0)] {
            for (id, z) in [(1, 100.0), (2, 80.0)] {
                features.push(Feature::point(Point3d::new(offset, 0.0, z), formation, Some(id)));
                features.push(Feature::point(
                    Point3d::new(offset + 10.0, 0.0, z),
                    formation,
                    Some(id),
                ));
            }
        }

        let options = InterpolationOptions::new(10.0).expect("valid increment");
        let result = interpolate_strike_lines_by_formation(&features, &options).expect("valid input");

        // each formation: 4 original points and one synthesized line at Z=90
        assert_eq!(result.len(), 10);
        assert_eq!(result.iter().filter(|f| f.formation == "Shale").count(), 5);
        assert_eq!(
            result
                .iter()
                .filter(|f| f.formation == "Limestone" && f.z == 90.0)
                .count(),
            1
        );
    }
}
