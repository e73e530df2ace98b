use crate::engine::distance_matrix::{DistanceMatrix, PairDistance};
use crate::engine::network::{Contact, ContactSet};

/// Selects the evaluated pairs with `0 < d < cutoff`, renumbered to 1-based.
pub fn run(matrix: &DistanceMatrix, cutoff: f64) -> ContactSet {
    matrix
        .pairs()
        .filter_map(|(i, j, value)| match value {
            PairDistance::Evaluated(d) if d > 0.0 && d < cutoff => Contact::new(i + 1, j + 1),
            _ => None,
        })
        .collect()
}
