use super::atom::Atom;
use super::chain::Chain;
use super::residue::Residue;

/// Everything read from one structure file: its chains in file order.
///
/// A `MolecularSystem` is what the PDB reader produces and what the
/// preparation workflow filters. Contact extraction works on a [`Structure`]
/// built from it.
///
/// [`Structure`]: super::structure::Structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularSystem {
    pub(crate) chains: Vec<Chain>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Looks up a chain by its single-character identifier.
    pub fn chain(&self, id: char) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn residues(&self) -> impl Iterator<Item = &Residue> {
        self.chains.iter().flat_map(|c| c.residues().iter())
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.chains.iter().flat_map(|c| c.atoms())
    }

    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(Chain::atom_count).sum()
    }

    /// Returns a new system containing only the chain `id`, if present.
    pub fn extract_chain(&self, id: char) -> Option<MolecularSystem> {
        self.chain(id).map(|chain| MolecularSystem {
            chains: vec![chain.clone()],
        })
    }

    /// Filters atoms across all chains, dropping residues and chains left empty.
    pub fn retain_atoms<F: FnMut(&Atom) -> bool>(&mut self, mut predicate: F) {
        for chain in &mut self.chains {
            chain.retain_atoms(&mut predicate);
        }
        self.chains.retain(|c| !c.residues().is_empty());
    }
}
