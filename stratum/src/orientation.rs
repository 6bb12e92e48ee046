//! Orientation of geological surfaces from strike lines.
//!
//! A plane is fitted to the points of two neighbouring strike lines with principal component analysis: the normal of
//! the plane is the eigenvector of the point covariance matrix with the smallest eigenvalue. The normal is then
//! converted into dip and azimuth.

use log::trace;
use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use serde::{Deserialize, Serialize};
use stratum_types::cartesian::Point3d;

use crate::error::{Result, StratumError};
use crate::feature::{group_by_formation, require_slices, Feature};

/// Orientation measurement of a geological surface at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// X coordinate of the location.
    pub x: f64,
    /// Y coordinate of the location.
    pub y: f64,
    /// Elevation of the location.
    pub z: f64,
    /// Angle between the surface and the horizontal plane in degrees, `0..=90`.
    pub dip: f64,
    /// Compass bearing of the steepest descent direction in degrees, `0..360`.
    pub azimuth: f64,
    /// Sign convention of the surface normal. Always `1` for estimated orientations.
    pub polarity: i32,
    /// Name of the geological surface.
    pub formation: String,
}

impl Orientation {
    /// Checks that dip and azimuth are within their ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=90.0).contains(&self.dip) {
            return Err(StratumError::OutOfRange(format!(
                "dip must be within 0..=90 degrees, got {}",
                self.dip
            )));
        }
        if !(0.0..=360.0).contains(&self.azimuth) {
            return Err(StratumError::OutOfRange(format!(
                "azimuth must be within 0..=360 degrees, got {}",
                self.azimuth
            )));
        }

        Ok(())
    }
}

/// Plane fitted to a point cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFit {
    /// Mean of the cluster points.
    pub centroid: Point3d,
    /// Unit normal of the plane. Its sign is arbitrary.
    pub normal: Vector3<f64>,
}

/// Fits a plane to the points using the eigen decomposition of their covariance matrix.
///
/// Fails if there are fewer than 3 points or if the points are collinear (or coincident), so that no unique plane
/// passes through them.
pub fn fit_plane(points: &[Point3d]) -> Result<PlaneFit> {
    if points.len() < 3 {
        return Err(StratumError::invalid_input(format!(
            "at least 3 points are needed to fit a plane, got {}",
            points.len()
        )));
    }

    let n = points.len() as f64;
    let sum: Vector3<f64> = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + Vector3::from(*p));
    let mean = sum / n;

    let mut covariance = Matrix3::<f64>::zeros();
    for p in points {
        let d = Vector3::from(*p) - mean;
        covariance += d * d.transpose();
    }
    covariance /= n - 1.0;

    let eigen = SymmetricEigen::new(covariance);
    let mut order = [0, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

    let largest = eigen.eigenvalues[order[2]];
    if eigen.eigenvalues[order[1]] <= largest * 1e-12 {
        return Err(StratumError::invalid_input(format!(
            "cannot fit a plane to {} collinear points",
            points.len()
        )));
    }

    Ok(PlaneFit {
        centroid: Point3d::new(mean.x, mean.y, mean.z),
        normal: eigen.eigenvectors.column(order[0]).into_owned(),
    })
}

/// Converts a plane normal into `(dip, azimuth)` in degrees.
///
/// The normal is first flipped to point upwards, so the result does not depend on its sign. For a vertical plane
/// (`nz == 0`) the normal is flipped to point east (or north, if it points exactly along the y axis).
///
/// For a horizontal plane dip is 0 and azimuth carries no information.
pub fn dip_and_azimuth(normal: &Vector3<f64>) -> (f64, f64) {
    let (nx, ny, nz) = (normal.x, normal.y, normal.z);
    let sign = if nz > 0.0 {
        1.0
    } else if nz < 0.0 {
        -1.0
    } else if nx > 0.0 || (nx == 0.0 && ny > 0.0) {
        1.0
    } else {
        -1.0
    };

    let dip = (nx * nx + ny * ny).sqrt().atan2(nz.abs()).to_degrees();
    let azimuth = (sign * nx).atan2(sign * ny).to_degrees().rem_euclid(360.0);

    // rem_euclid of a tiny negative angle rounds up to 360
    let azimuth = if azimuth >= 360.0 { 0.0 } else { azimuth + 0.0 };

    (dip, azimuth)
}

/// Estimates orientations of one formation from its strike lines.
///
/// Features are grouped into slices by `id`. With exactly two slices all points form one cluster; otherwise every
/// pair of consecutive slices (by id) forms a cluster, giving `slices - 1` orientations. Each orientation is located
/// at the centroid of its cluster and carries the formation of the first feature.
///
/// Fails if any feature has no id or does not lie at its elevation, if there are fewer than two slices, or if a
/// cluster has fewer than 3 points or its points are collinear.
pub fn calculate_orientations(features: &[Feature]) -> Result<Vec<Orientation>> {
    require_slices(features)?;
    let Some(first) = features.first() else {
        return Err(StratumError::invalid_input(
            "cannot calculate orientations of an empty feature set",
        ));
    };

    let mut ids: Vec<u64> = features.iter().filter_map(|f| f.id).collect();
    ids.sort_unstable();
    ids.dedup();

    let clusters: Vec<Vec<Point3d>> = match ids.len() {
        0 | 1 => {
            return Err(StratumError::invalid_input(format!(
                "orientations need at least two strike lines, got {}",
                ids.len()
            )))
        }
        2 => vec![cluster_points(features, &ids)],
        _ => ids
            .windows(2)
            .map(|pair| cluster_points(features, pair))
            .collect(),
    };

    clusters
        .iter()
        .map(|points| {
            let plane = fit_plane(points)?;
            let (dip, azimuth) = dip_and_azimuth(&plane.normal);
            trace!(
                "Cluster of {} points: dip {dip:.2}, azimuth {azimuth:.2}",
                points.len()
            );

            Ok(Orientation {
                x: plane.centroid.x(),
                y: plane.centroid.y(),
                z: plane.centroid.z(),
                dip,
                azimuth,
                polarity: 1,
                formation: first.formation.clone(),
            })
        })
        .collect()
}

/// Runs [`calculate_orientations`] for each formation separately and concatenates the results.
///
/// The first failing formation aborts the whole operation.
pub fn calculate_orientations_by_formation(features: &[Feature]) -> Result<Vec<Orientation>> {
    let mut result = vec![];
    for (_, group) in group_by_formation(features) {
        result.extend(calculate_orientations(&group)?);
    }

    Ok(result)
}

/// Vertices of all features with one of the `ids`. Vertices are placed at the feature elevation.
fn cluster_points(features: &[Feature], ids: &[u64]) -> Vec<Point3d> {
    features
        .iter()
        .filter(|f| f.id.is_some_and(|id| ids.contains(&id)))
        .flat_map(|f| f.vertices().map(move |p| p.with_z(f.z)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use stratum_types::Contour;

    fn strike_line(points: &[(f64, f64)], z: f64, id: u64) -> Feature {
        Feature::line(
            Contour::open(points.iter().map(|&(x, y)| Point3d::new(x, y, z)).collect()),
            "Sandstone",
            z,
            Some(id),
        )
    }

    fn angular_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn horizontal_plane() {
        // azimuth of a horizontal plane is undefined, only dip is checked
        let (dip, azimuth) = dip_and_azimuth(&Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(dip, 0.0);
        assert!((0.0..360.0).contains(&azimuth));
    }

    #[test]
    fn vertical_plane() {
        let (dip, azimuth) = dip_and_azimuth(&Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(dip, 90.0);
        assert_eq!(azimuth, 90.0);

        let (dip, azimuth) = dip_and_azimuth(&Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(dip, 90.0);
        assert_eq!(azimuth, 90.0);
    }

    #[test]
    fn sign_of_normal_does_not_matter() {
        let normals = [
            Vector3::new(0.3, 0.2, 0.9),
            Vector3::new(-0.5, 0.1, 0.4),
            Vector3::new(0.0, -0.7, -0.2),
            Vector3::new(-0.1, -0.1, -0.98),
            Vector3::new(0.0, 1.0, 0.0),
        ];

        for normal in normals {
            let (dip, azimuth) = dip_and_azimuth(&normal);
            let (flipped_dip, flipped_azimuth) = dip_and_azimuth(&-normal);
            assert_abs_diff_eq!(dip, flipped_dip, epsilon = 1e-12);
            assert_abs_diff_eq!(azimuth, flipped_azimuth, epsilon = 1e-12);
        }
    }

    #[test]
    fn results_are_normalized() {
        for i in 0..36 {
            let angle = (i as f64 * 10.0).to_radians();
            for nz in [-0.9, -0.2, 0.0, 0.4, 1.0] {
                let (dip, azimuth) = dip_and_azimuth(&Vector3::new(angle.sin(), angle.cos(), nz));
                assert!((0.0..=90.0).contains(&dip));
                assert!((0.0..360.0).contains(&azimuth));
            }
        }

        let (_, azimuth) = dip_and_azimuth(&Vector3::new(-1e-300, 1.0, 1.0));
        assert!((0.0..360.0).contains(&azimuth));
    }

    #[test]
    fn plane_dipping_east() {
        // surface drops 10 m per 10 m towards east: dip 45, azimuth 90
        let features = vec![
            strike_line(&[(0.0, 0.0), (0.0, 10.0), (0.0, 20.0)], 100.0, 1),
            strike_line(&[(10.0, 0.0), (10.0, 10.0), (10.0, 20.0)], 90.0, 2),
        ];

        let orientations = calculate_orientations(&features).expect("valid input");
        assert_eq!(orientations.len(), 1);

        let o = &orientations[0];
        assert_abs_diff_eq!(o.dip, 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(o.azimuth, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(o.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(o.y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(o.z, 95.0, epsilon = 1e-9);
        assert_eq!(o.polarity, 1);
        assert_eq!(o.formation, "Sandstone");
        assert!(o.validate().is_ok());
    }

    #[test]
    fn one_orientation_per_neighbouring_slices() {
        // surface dipping south: elevation decreases with decreasing y
        let features = vec![
            strike_line(&[(0.0, 0.0), (10.0, 0.0)], 70.0, 3),
            strike_line(&[(0.0, 20.0), (10.0, 20.0)], 90.0, 1),
            strike_line(&[(0.0, 10.0), (10.0, 10.0)], 80.0, 2),
        ];

        let orientations = calculate_orientations(&features).expect("valid input");
        assert_eq!(orientations.len(), 2);
        for o in &orientations {
            assert_abs_diff_eq!(o.dip, 45.0, epsilon = 1e-9);
            assert!(angular_distance(o.azimuth, 180.0) < 1e-9);
        }
        assert_abs_diff_eq!(orientations[0].z, 85.0, epsilon = 1e-9);
        assert_abs_diff_eq!(orientations[1].z, 75.0, epsilon = 1e-9);
    }

    #[test]
    fn orientations_by_formation() {
        let mut features = vec![
            strike_line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1),
            strike_line(&[(0.0, 10.0), (10.0, 10.0)], 90.0, 2),
        ];
        let mut other = strike_line(&[(0.0, 0.0), (0.0, 10.0)], 50.0, 1);
        other.formation = "Shale".into();
        features.push(other);
        let mut other = strike_line(&[(10.0, 0.0), (10.0, 10.0)], 40.0, 2);
        other.formation = "Shale".into();
        features.push(other);

        let orientations = calculate_orientations_by_formation(&features).expect("valid input");
        assert_eq!(orientations.len(), 2);
        assert_eq!(orientations[0].formation, "Sandstone");
        assert!(angular_distance(orientations[0].azimuth, 0.0) < 1e-9);
        assert_eq!(orientations[1].formation, "Shale");
        assert_abs_diff_eq!(orientations[1].azimuth, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn invalid_input() {
        assert_matches!(calculate_orientations(&[]), Err(StratumError::InvalidInput(_)));

        let single_slice = vec![strike_line(&[(0.0, 0.0), (10.0, 0.0), (5.0, 5.0)], 100.0, 1)];
        assert_matches!(
            calculate_orientations(&single_slice),
            Err(StratumError::InvalidInput(_))
        );

        let sparse = vec![
            Feature::point(Point3d::new(0.0, 0.0, 100.0), "Sandstone", Some(1)),
            Feature::point(Point3d::new(10.0, 0.0, 90.0), "Sandstone", Some(2)),
        ];
        assert_matches!(
            calculate_orientations(&sparse),
            Err(StratumError::InvalidInput(_))
        );

        let missing_id = vec![Feature::point(Point3d::new(0.0, 0.0, 100.0), "Sandstone", None)];
        assert_matches!(
            calculate_orientations(&missing_id),
            Err(StratumError::InvalidInput(_))
        );

        let mut off_level = strike_line(&[(0.0, 10.0), (10.0, 10.0)], 90.0, 2);
        off_level.z = 80.0;
        let features = vec![strike_line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1), off_level];
        assert_matches!(
            calculate_orientations(&features),
            Err(StratumError::InvalidInput(_))
        );
    }

    #[test]
    fn collinear_cluster() {
        let features = vec![
            Feature::point(Point3d::new(0.0, 0.0, 100.0), "Sandstone", Some(1)),
            Feature::point(Point3d::new(0.0, 0.0, 100.0), "Sandstone", Some(1)),
            Feature::point(Point3d::new(10.0, 0.0, 90.0), "Sandstone", Some(2)),
        ];
        assert_matches!(
            calculate_orientations(&features),
            Err(StratumError::InvalidInput(_))
        );

        let coincident = [Point3d::new(1.0, 2.0, 3.0); 4];
        assert_matches!(fit_plane(&coincident), Err(StratumError::InvalidInput(_)));

        let on_line: Vec<Point3d> = (0..5)
            .map(|i| Point3d::new(i as f64, 2.0 * i as f64, 100.0 - i as f64))
            .collect();
        assert_matches!(fit_plane(&on_line), Err(StratumError::InvalidInput(_)));
    }

    #[test]
    fn out_of_range_orientation() {
        let orientation = Orientation {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            dip: 95.0,
            azimuth: 10.0,
            polarity: 1,
            formation: "Sandstone".into(),
        };
        assert_matches!(orientation.validate(), Err(StratumError::OutOfRange(_)));
    }
}
