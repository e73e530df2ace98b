use crate::core::models::residue::Residue;
use crate::core::utils::geometry::scan_atom_pairs;
use crate::engine::distance_matrix::{DistanceMatrix, PairDistance};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationStats {
    pub atom_pairs_evaluated: usize,
    pub coincident_atom_pairs: usize,
}

/// Replaces every candidate pair with its minimum inter-atomic distance.
///
/// The minimum is taken over strictly positive distances. Atom pairs at the
/// exact same coordinate are counted and logged; a residue pair whose atom
/// pairs all coincide is stored as `Evaluated(0.0)`.
#[instrument(skip_all, name = "evaluation_task")]
pub fn run(
    residues: &[Residue],
    matrix: &mut DistanceMatrix,
    candidates: &[(usize, usize)],
    reporter: &ProgressReporter,
) -> EvaluationStats {
    let mut stats = EvaluationStats::default();
    if candidates.is_empty() {
        return stats;
    }

    reporter.report(Progress::TaskStart {
        total_steps: candidates.len() as u64,
    });

    for &(i, j) in candidates {
        let scan = scan_atom_pairs(residues[i].atoms(), residues[j].atoms());
        stats.atom_pairs_evaluated += scan.pairs_evaluated;
        if scan.coincident_pairs > 0 {
            stats.coincident_atom_pairs += scan.coincident_pairs;
            warn!(
                residue_a = i + 1,
                residue_b = j + 1,
                coincident_pairs = scan.coincident_pairs,
                "Atoms of different residues share identical coordinates."
            );
        }
        matrix.set(i, j, PairDistance::Evaluated(scan.min_positive.unwrap_or(0.0)));
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    stats
}
