use super::residue::{DEFAULT_ANCHOR_ATOM, Residue};
use super::system::MolecularSystem;

/// One chain's ordered residues, keyed by a structure identifier.
///
/// Residue order defines the 1-based residue numbering used in every contact
/// network; the numbers from the source file are kept on each [`Residue`] but
/// never used for output.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub id: String,
    anchor_atom: String,
    residues: Vec<Residue>,
}

impl Structure {
    /// Creates a structure from residues whose anchors were designated with
    /// the default anchor atom name.
    pub fn new(id: &str, residues: Vec<Residue>) -> Self {
        Self {
            id: id.to_string(),
            anchor_atom: DEFAULT_ANCHOR_ATOM.to_string(),
            residues,
        }
    }

    /// Builds a structure from every residue of `system`, chains in file order.
    pub fn from_system(id: &str, system: &MolecularSystem) -> Self {
        Self::new(id, system.residues().cloned().collect())
    }

    /// Re-designates the anchor of every residue as the atom called `name`.
    pub fn with_anchor_atom(mut self, name: &str) -> Self {
        for residue in &mut self.residues {
            residue.designate_anchor(name);
        }
        self.anchor_atom = name.to_string();
        self
    }

    pub fn anchor_atom(&self) -> &str {
        &self.anchor_atom
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
