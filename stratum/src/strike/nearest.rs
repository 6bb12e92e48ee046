use stratum_types::cartesian::CartesianPoint2d;

use crate::error::{Result, StratumError};

/// Index of the candidate closest to `query` in the plane.
///
/// Elevation of 3d points is ignored. If several candidates are at the same distance, the first one wins.
pub fn nearest_neighbor<P, Q>(query: &P, candidates: &[Q]) -> Result<usize>
where
    P: CartesianPoint2d<Num = f64>,
    Q: CartesianPoint2d<Num = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let distance = candidate.distance_sq(query);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index).ok_or_else(|| {
        StratumError::invalid_input("cannot find nearest neighbor in an empty point set")
    })
}
