use super::atom::Atom;
use super::residue::Residue;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: char,                       // Chain identifier (e.g., 'A', 'B')
    pub(crate) residues: Vec<Residue>, // Residues in file order
}

impl Chain {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.residues.iter().flat_map(|r| r.atoms().iter())
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(|r| r.atoms().len()).sum()
    }

    /// Filters atoms in every residue and drops residues left empty.
    pub(crate) fn retain_atoms<F: FnMut(&Atom) -> bool>(&mut self, mut predicate: F) {
        for residue in &mut self.residues {
            residue.retain_atoms(&mut predicate);
        }
        self.residues.retain(|r| !r.is_empty());
    }
}
