use crate::core::models::atom::Atom;
use crate::core::models::residue::Residue;
use nalgebra::Point3;

/// Result of scanning every atom pair between two residues.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtomPairScan {
    /// Smallest strictly positive finite distance, if any pair has one.
    pub min_positive: Option<f64>,
    /// Pairs whose atoms sit at exactly the same coordinate.
    pub coincident_pairs: usize,
    /// Number of atom pairs whose distance was computed.
    pub pairs_evaluated: usize,
}

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Computes all pairwise distances between the atoms of `a` and `b`.
///
/// Atoms with non-finite coordinates are skipped. Exactly coincident pairs are
/// counted separately and do not contribute to `min_positive`.
pub fn scan_atom_pairs(a: &[Atom], b: &[Atom]) -> AtomPairScan {
    let mut scan = AtomPairScan::default();
    for atom_a in a.iter().filter(|atom| atom.has_finite_position()) {
        for atom_b in b.iter().filter(|atom| atom.has_finite_position()) {
            let d = distance(&atom_a.position, &atom_b.position);
            scan.pairs_evaluated += 1;
            if d == 0.0 {
                scan.coincident_pairs += 1;
            } else if scan.min_positive.is_none_or(|min| d < min) {
                scan.min_positive = Some(d);
            }
        }
    }
    scan
}

/// The largest distance from a residue's anchor to any of its atoms.
///
/// Returns `None` for residues without a usable anchor. Atoms with
/// non-finite coordinates are ignored.
pub fn residue_radius(residue: &Residue) -> Option<f64> {
    let anchor = residue.anchor_position()?;
    Some(
        residue
            .atoms()
            .iter()
            .filter(|a| a.has_finite_position())
            .map(|a| distance(&anchor, &a.position))
            .fold(0.0, f64::max),
    )
}
