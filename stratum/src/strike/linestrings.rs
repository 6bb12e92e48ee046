use log::debug;
use stratum_types::cartesian::Point3d;
use stratum_types::Contour;

use crate::error::{Result, StratumError};
use crate::feature::Feature;

/// Connects the point records of `formation` lying exactly at elevation `z` into one line, in input order.
///
/// Fails if any of the records is not a point, or if fewer than two points match.
pub fn create_linestring(features: &[Feature], formation: &str, z: f64) -> Result<Contour<Point3d>> {
    let points = collect_points(features)?
        .into_iter()
        .filter(|(f, _)| f.formation == formation && f.z == z)
        .map(|(_, p)| *p)
        .collect::<Vec<_>>();

    Ok(Contour::try_open(points)?)
}

/// Reconstructs strike lines from intersection points of layer boundaries with elevation contours.
///
/// Points are sorted by elevation. For each formation (in order of first appearance among the sorted points) and each
/// distinct elevation (ascending) a line is built from the matching points. Lines get ids `1..` in that order.
/// Formation/elevation combinations with a single point cannot form a line and are skipped.
pub fn create_linestrings(features: &[Feature]) -> Result<Vec<Feature>> {
    let mut sorted = collect_points(features)?;
    sorted.sort_by(|(a, _), (b, _)| a.z.total_cmp(&b.z));

    let mut formations: Vec<&str> = vec![];
    let mut elevations: Vec<f64> = vec![];
    for (feature, _) in &sorted {
        if !formations.contains(&feature.formation.as_str()) {
            formations.push(&feature.formation);
        }
        if !elevations.contains(&feature.z) {
            elevations.push(feature.z);
        }
    }

    let mut lines = vec![];
    for formation in formations {
        for &z in &elevations {
            let points: Vec<Point3d> = sorted
                .iter()
                .filter(|(f, _)| f.formation == formation && f.z == z)
                .map(|(_, p)| **p)
                .collect();

            if points.len() < 2 {
                debug!(
                    "Skipping formation '{formation}' at Z={z}: {} points do not form a line",
                    points.len()
                );
                continue;
            }

            let id = lines.len() as u64 + 1;
            lines.push(Feature::try_line(Contour::open(points), formation, z, Some(id))?);
        }
    }

    Ok(lines)
}

fn collect_points(features: &[Feature]) -> Result<Vec<(&Feature, &Point3d)>> {
    features
        .iter()
        .map(|f| {
            f.geometry.as_point().map(|p| (f, p)).ok_or_else(|| {
                StratumError::invalid_input(format!(
                    "lines can only be built from points, got a {} of formation '{}'",
                    f.kind(),
                    f.formation
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn point(x: f64, y: f64, z: f64, formation: &str) -> Feature {
        Feature::point(Point3d::new(x, y, z), formation, None)
    }

    #[test]
    fn linestring_keeps_input_order() {
        let features = vec![
            point(0.0, 0.0, 100.0, "Shale"),
            point(5.0, 0.0, 90.0, "Shale"),
            point(10.0, 2.0, 100.0, "Shale"),
            point(3.0, 1.0, 100.0, "Limestone"),
            point(20.0, 3.0, 100.0, "Shale"),
        ];

        let line = create_linestring(&features, "Shale", 100.0).expect("valid input");
        assert_eq!(
            line.points(),
            &[
                Point3d::new(0.0, 0.0, 100.0),
                Point3d::new(10.0, 2.0, 100.0),
                Point3d::new(20.0, 3.0, 100.0),
            ]
        );
        assert_eq!(line.elevation(), Some(100.0));
    }

    #[test]
    fn linestring_needs_two_points() {
        let features = vec![point(0.0, 0.0, 100.0, "Shale")];
        assert_matches!(
            create_linestring(&features, "Shale", 100.0),
            Err(StratumError::Types(_))
        );
    }

    #[test]
    fn lines_from_points() {
        let features = vec![
            point(0.0, 0.0, 100.0, "Shale"),
            point(10.0, 0.0, 100.0, "Shale"),
            point(0.0, 5.0, 90.0, "Shale"),
            point(10.0, 5.0, 90.0, "Shale"),
            point(4.0, 4.0, 80.0, "Shale"),
        ];

        let lines = create_linestrings(&features).expect("valid input");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].z, 90.0);
        assert_eq!(lines[0].id, Some(1));
        assert_eq!(lines[1].z, 100.0);
        assert_eq!(lines[1].id, Some(2));
        assert!(lines.iter().all(|l| l.formation == "Shale"));
    }

    #[test]
    fn lines_from_lines_are_rejected() {
        let features = vec![Feature::line(
            Contour::open(vec![Point3d::new(0.0, 0.0, 1.0), Point3d::new(1.0, 0.0, 1.0)]),
            "Shale",
            1.0,
            Some(1),
        )];
        assert_matches!(
            create_linestrings(&features),
            Err(StratumError::InvalidInput(_))
        );
    }
}
