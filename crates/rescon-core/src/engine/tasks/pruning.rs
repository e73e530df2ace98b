use crate::core::utils::geometry::distance;
use crate::engine::distance_matrix::{DistanceMatrix, PairDistance};
use itertools::Itertools;
use nalgebra::Point3;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct PruningOutcome {
    pub matrix: DistanceMatrix,
    /// Pairs `(i, j)`, `i < j`, left for full evaluation.
    pub candidates: Vec<(usize, usize)>,
}

/// Classifies every residue pair by the distance between their anchors.
///
/// `anchors[i]` is the anchor coordinate of residue `i`, or `None` if it has
/// no usable anchor. Pairs involving such a residue stay `Unknown`; pairs
/// whose anchors are farther apart than `pruning_bound` become `Pruned`; all
/// others become `Candidate`.
#[instrument(skip_all, name = "pruning_task")]
pub fn run(anchors: &[Option<Point3<f64>>], pruning_bound: f64) -> PruningOutcome {
    let mut matrix = DistanceMatrix::new(anchors.len());
    let mut candidates = Vec::new();

    for (i, j) in (0..anchors.len()).tuple_combinations() {
        let (Some(anchor_i), Some(anchor_j)) = (&anchors[i], &anchors[j]) else {
            continue;
        };
        if distance(anchor_i, anchor_j) > pruning_bound {
            matrix.set(i, j, PairDistance::Pruned);
        } else {
            matrix.set(i, j, PairDistance::Candidate);
            candidates.push((i, j));
        }
    }

    debug!(
        residues = anchors.len(),
        candidates = candidates.len(),
        pruning_bound,
        "Pruning pass complete."
    );

    PruningOutcome { matrix, candidates }
}
