use std::collections::HashSet;

use log::debug;
use stratum_types::GeometryKind;

use crate::error::{Result, StratumError};
use crate::feature::{require_slices, Feature};
use crate::options::InterpolationOptions;
use crate::strike::interpolate_lines;

/// Densifies the strike lines of one formation.
///
/// Features are grouped by `id`, each group being one elevation slice. For every pair of consecutive groups whose
/// elevations differ by more than the increment, the missing lines are synthesized with [`interpolate_lines`]. The
/// pairs are processed independently and their results concatenated, then [`dedup_and_renumber`] sorts the result by
/// `Y`, drops duplicated geometries and assigns ids `1..=M`.
///
/// Fails if any feature has no id or does not lie at its elevation, or if there are fewer than two distinct ids.
pub fn interpolate_strike_lines(
    features: &[Feature],
    options: &InterpolationOptions,
) -> Result<Vec<Feature>> {
    require_slices(features)?;

    let mut sorted = features.to_vec();
    sorted.sort_by_key(|f| f.id);
    let groups = split_by_id(sorted);
    if groups.len() < 2 {
        return Err(StratumError::invalid_input(format!(
            "strike line interpolation needs at least two distinct ids, got {}",
            groups.len()
        )));
    }

    let increment = options.increment();
    let max_id = features.iter().filter_map(|f| f.id).max().unwrap_or(0);
    let mut next_id = advance_id(max_id, 1)?;
    let mut pairs = Vec::with_capacity(groups.len() - 1);
    for window in groups.windows(2) {
        let (lower, upper) = (&window[0], &window[1]);
        let lines = fill_gap(lower, upper, increment, next_id)?;
        next_id = advance_id(next_id, lines.len())?;

        pairs.push([lower.clone(), lines, upper.clone()].concat());
    }

    Ok(dedup_and_renumber(pairs.into_iter().flatten().collect()))
}

fn advance_id(id: u64, by: usize) -> Result<u64> {
    id.checked_add(by as u64).ok_or_else(|| {
        StratumError::invalid_input(format!("no ids are left for synthesized lines after id {id}"))
    })
}

/// Lines missing between two consecutive slices. Empty if the slices are no more than `increment` apart.
fn fill_gap(
    current: &[Feature],
    next: &[Feature],
    increment: f64,
    first_id: u64,
) -> Result<Vec<Feature>> {
    let diff = current[0].z - next[0].z;
    if diff.abs() > increment {
        interpolate_lines(current, next, increment, first_id)
    } else {
        debug!(
            "Slices at Z={} and Z={} are within {increment}, concatenating without interpolation",
            current[0].z, next[0].z
        );
        Ok(vec![])
    }
}

/// Splits features sorted by id into groups of equal id. Groups are never empty.
fn split_by_id(sorted: Vec<Feature>) -> Vec<Vec<Feature>> {
    let mut groups: Vec<Vec<Feature>> = vec![];
    for feature in sorted {
        match groups.last_mut() {
            Some(group) if group[0].id == feature.id => group.push(feature),
            _ => groups.push(vec![feature]),
        }
    }

    groups
}

/// Sorts features by their smallest `Y`, drops features with exactly the same geometry as an earlier one and
/// renumbers ids as `1..=M` in the resulting order.
///
/// Applying it to its own output changes nothing.
pub fn dedup_and_renumber(mut features: Vec<Feature>) -> Vec<Feature> {
    features.sort_by(|a, b| a.min_y().total_cmp(&b.min_y()));

    let mut seen = HashSet::new();
    let total = features.len();
    let unique: Vec<Feature> = features
        .into_iter()
        .filter(|f| seen.insert(geometry_key(f)))
        .enumerate()
        .map(|(index, f)| f.with_id(index as u64 + 1))
        .collect();

    debug!("Dropped {} duplicated geometries", total - unique.len());
    unique
}

fn geometry_key(feature: &Feature) -> (GeometryKind, Vec<[u64; 3]>) {
    // 0.0 and -0.0 are the same coordinate
    let bits = |v: f64| if v == 0.0 { 0 } else { v.to_bits() };
    (
        feature.kind(),
        feature
            .vertices()
            .map(|p| [bits(p.x()), bits(p.y()), bits(p.z())])
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use stratum_types::cartesian::Point3d;
    use stratum_types::{Contour, Geom};

    fn line(points: &[(f64, f64)], z: f64, id: u64) -> Feature {
        Feature::line(
            Contour::open(points.iter().map(|&(x, y)| Point3d::new(x, y, z)).collect()),
            "Sandstone",
            z,
            Some(id),
        )
    }

    fn options(increment: f64) -> InterpolationOptions {
        InterpolationOptions::new(increment).expect("valid increment")
    }

    #[test]
    fn fills_single_gap() {
        let features = vec![
            line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1),
            line(&[(0.0, 0.0), (10.0, 0.0)], 80.0, 2),
        ];

        let result = interpolate_strike_lines(&features, &options(10.0)).expect("valid input");
        assert_eq!(result.len(), 3);

        let mut elevations: Vec<f64> = result.iter().map(|f| f.z).collect();
        elevations.sort_by(f64::total_cmp);
        assert_eq!(elevations, vec![80.0, 90.0, 100.0]);

        let synthesized = result.iter().find(|f| f.z == 90.0).expect("no line at 90");
        assert_eq!(
            synthesized.geometry,
            Geom::Contour(Contour::open(vec![
                Point3d::new(0.0, 0.0, 90.0),
                Point3d::new(10.0, 0.0, 90.0),
            ]))
        );
    }

    #[test]
    fn ids_are_dense_and_follow_y() {
        let features = vec![
            line(&[(0.0, 30.0), (10.0, 30.0)], 130.0, 3),
            line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1),
            line(&[(0.0, 10.0), (10.0, 10.0)], 110.0, 2),
        ];

        let result = interpolate_strike_lines(&features, &options(10.0)).expect("valid input");
        assert_eq!(
            result.iter().map(|f| f.id).collect::<Vec<_>>(),
            (1..=result.len() as u64).map(Some).collect::<Vec<_>>()
        );
        assert_eq!(
            result.iter().map(|f| f.z).collect::<Vec<_>>(),
            vec![100.0, 110.0, 120.0, 130.0]
        );
    }

    #[test]
    fn shared_slices_are_not_duplicated() {
        let features = vec![
            line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1),
            line(&[(0.0, 5.0), (10.0, 5.0)], 105.0, 2),
            line(&[(0.0, 8.0), (10.0, 8.0)], 108.0, 3),
        ];

        let result = interpolate_strike_lines(&features, &options(10.0)).expect("valid input");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn adjacent_levels_are_snapped_together() {
        // 15 m apart with 10 m increment: the gap is larger than the increment but too small to fit a line
        let features = vec![
            line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1),
            line(&[(0.0, 5.0), (10.0, 5.0)], 115.0, 2),
        ];

        let result = interpolate_strike_lines(&features, &options(10.0)).expect("valid input");
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn dedup_is_idempotent() {
        let features = vec![
            line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1),
            line(&[(0.0, 0.0), (10.0, 0.0)], 70.0, 2),
            line(&[(5.0, -3.0), (10.0, 0.0)], 60.0, 3),
        ];

        let once = interpolate_strike_lines(&features, &options(10.0)).expect("valid input");
        let twice = dedup_and_renumber(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn dedup_treats_signed_zero_as_equal() {
        let features = vec![
            Feature::point(Point3d::new(0.0, 1.0, 5.0), "Shale", Some(7)),
            Feature::point(Point3d::new(-0.0, 1.0, 5.0), "Shale", Some(8)),
        ];
        let result = dedup_and_renumber(features);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, Some(1));
    }

    #[test]
    fn invalid_input() {
        let single = vec![line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1)];
        assert_matches!(
            interpolate_strike_lines(&single, &options(10.0)),
            Err(StratumError::InvalidInput(_))
        );

        let mut missing_id = single.clone();
        missing_id.push(Feature::point(Point3d::new(0.0, 0.0, 80.0), "Sandstone", None));
        assert_matches!(
            interpolate_strike_lines(&missing_id, &options(10.0)),
            Err(StratumError::InvalidInput(_))
        );

        let highest_id = vec![
            line(&[(0.0, 0.0), (10.0, 0.0)], 100.0, 1),
            line(&[(0.0, 0.0), (10.0, 0.0)], 70.0, u64::MAX),
        ];
        assert_matches!(
            interpolate_strike_lines(&highest_id, &options(10.0)),
            Err(StratumError::InvalidInput(_))
        );

        let mut off_level = single.clone();
        let mut lower = line(&[(0.0, 0.0), (10.0, 0.0)], 70.0, 2);
        lower.z = 60.0;
        off_level.push(lower);
        assert_matches!(
            interpolate_strike_lines(&off_level, &options(10.0)),
            Err(StratumError::InvalidInput(_))
        );
    }
}
