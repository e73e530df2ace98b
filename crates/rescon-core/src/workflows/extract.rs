use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::residue_radius;
use crate::engine::config::{ContactConfig, ContactConfigBuilder};
use crate::engine::distance_matrix::PairDistance;
use crate::engine::network::{
    ContactNetwork, ContactSet, ExcludedResidue, ExclusionReason, ExtractionStats,
};
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks;
use std::borrow::Cow;
use tracing::{debug, info, instrument, warn};

/// Extracts the residue contact network of one structure.
///
/// Residues without a usable anchor are listed in [`ContactNetwork::excluded`]
/// and take part in no pair. A cutoff that is not strictly positive yields an
/// empty contact set.
#[instrument(skip_all, name = "extract_workflow", fields(structure = %structure.id))]
pub fn run(
    structure: &Structure,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> ContactNetwork {
    let structure = if structure.anchor_atom() == config.anchor_atom {
        Cow::Borrowed(structure)
    } else {
        Cow::Owned(structure.clone().with_anchor_atom(&config.anchor_atom))
    };
    let residues = structure.residues();

    let excluded = excluded_residues(residues);
    for residue in &excluded {
        debug!(
            position = residue.position,
            name = %residue.name,
            reason = %residue.reason,
            "Residue excluded from contact extraction."
        );
    }

    let n = residues.len();
    let mut stats = ExtractionStats {
        residue_pairs: n * n.saturating_sub(1) / 2,
        ..ExtractionStats::default()
    };

    if config.cutoff.is_nan() || config.cutoff <= 0.0 {
        warn!(cutoff = config.cutoff, "Non-positive cutoff; no contacts possible.");
        return ContactNetwork {
            structure_id: structure.id.clone(),
            contacts: ContactSet::new(),
            excluded,
            stats,
        };
    }

    let anchors: Vec<_> = residues.iter().map(Residue::anchor_position).collect();
    let pruning_bound = config
        .pruning
        .resolve(config.cutoff, || measured_radius(residues));

    let tasks::pruning::PruningOutcome {
        mut matrix,
        candidates,
    } = tasks::pruning::run(&anchors, pruning_bound);
    let evaluation = tasks::evaluation::run(residues, &mut matrix, &candidates, reporter);
    let contacts = tasks::thresholding::run(&matrix, config.cutoff);

    stats.unknown_pairs = matrix.count(|e| matches!(e, PairDistance::Unknown));
    stats.pruned_pairs = matrix.count(|e| matches!(e, PairDistance::Pruned));
    stats.evaluated_pairs = matrix.count(|e| e.evaluated().is_some());
    stats.atom_pairs_evaluated = evaluation.atom_pairs_evaluated;
    stats.coincident_atom_pairs = evaluation.coincident_atom_pairs;
    stats.pruning_bound = Some(pruning_bound);

    info!(
        residues = n,
        excluded = excluded.len(),
        evaluated_pairs = stats.evaluated_pairs,
        pruned_pairs = stats.pruned_pairs,
        contacts = contacts.len(),
        "Contact extraction complete."
    );

    ContactNetwork {
        structure_id: structure.id.clone(),
        contacts,
        excluded,
        stats,
    }
}

/// Extracts the contact set of `structure` at `cutoff` with default settings
/// for everything else.
pub fn extract(structure: &Structure, cutoff: f64) -> ContactSet {
    let config = ContactConfigBuilder::new()
        .cutoff(cutoff)
        .anchor_atom(structure.anchor_atom())
        .build()
        .unwrap_or_default();
    run(structure, &config, &ProgressReporter::new()).contacts
}

fn measured_radius(residues: &[Residue]) -> f64 {
    residues
        .iter()
        .filter_map(residue_radius)
        .fold(0.0, f64::max)
}

fn excluded_residues(residues: &[Residue]) -> Vec<ExcludedResidue> {
    residues
        .iter()
        .enumerate()
        .filter_map(|(idx, residue)| {
            let reason = if residue.is_empty() {
                ExclusionReason::NoAtoms
            } else if residue.anchor().is_none() {
                ExclusionReason::MissingAnchor
            } else if residue.anchor_position().is_none() {
                ExclusionReason::NonFiniteAnchor
            } else {
                return None;
            };
            Some(ExcludedResidue {
                position: idx + 1,
                name: residue.name.clone(),
                number: residue.number,
                reason,
            })
        })
        .collect()
}
