use super::atom::Atom;
use super::chain::Chain;
use super::residue::{DEFAULT_ANCHOR_ATOM, Residue};
use super::system::MolecularSystem;
use std::collections::HashMap;

/// Incrementally assembles a [`MolecularSystem`] from records in file order.
///
/// Readers open a chain, then a residue, then add atoms to it. Re-opening a
/// chain identifier that was already seen continues that chain; a residue is
/// re-used only while it is the current one, so the file order of residues
/// is preserved even when numbering repeats.
pub struct MolecularSystemBuilder {
    system: MolecularSystem,

    // --- Builder-specific state for efficient construction ---
    chain_id_map: HashMap<char, usize>,
    current_chain_idx: Option<usize>,
    current_residue_key: Option<(Option<isize>, Option<char>)>,
}

impl Default for MolecularSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MolecularSystemBuilder {
    pub fn new() -> Self {
        Self {
            system: MolecularSystem::new(),
            chain_id_map: HashMap::new(),
            current_chain_idx: None,
            current_residue_key: None,
        }
    }

    pub fn start_chain(&mut self, id: char) -> &mut Self {
        let idx = *self.chain_id_map.entry(id).or_insert_with(|| {
            let index = self.system.chains.len();
            self.system.chains.push(Chain::new(id));
            index
        });
        if self.current_chain_idx != Some(idx) {
            self.current_chain_idx = Some(idx);
            self.current_residue_key = None;
        }
        self
    }

    /// Opens a residue in the current chain, opening chain `' '` if none is open.
    ///
    /// Calling this again with the same number and insertion code as the
    /// current residue is a no-op.
    pub fn start_residue(
        &mut self,
        name: &str,
        number: Option<isize>,
        insertion_code: Option<char>,
    ) -> &mut Self {
        if self.current_chain_idx.is_none() {
            self.start_chain(' ');
        }
        let insertion_code = insertion_code.filter(|c| !c.is_whitespace());
        let key = (number, insertion_code);
        if self.current_residue_key == Some(key) {
            return self;
        }
        if let Some(chain_idx) = self.current_chain_idx {
            self.system.chains[chain_idx]
                .residues
                .push(Residue::new(name, number).with_insertion_code(insertion_code));
        }
        self.current_residue_key = Some(key);
        self
    }

    /// Adds an atom to the current residue, opening an unnamed residue if none is open.
    ///
    /// Anchors are always designated on [`DEFAULT_ANCHOR_ATOM`]; other anchor
    /// names are applied to a finished [`Structure`](super::structure::Structure)
    /// so that its anchor label stays in sync with its residues.
    pub fn add_atom(&mut self, atom: Atom) -> &mut Self {
        if self.current_residue_key.is_none() {
            self.start_residue("UNK", None, None);
        }
        if let Some(chain_idx) = self.current_chain_idx {
            if let Some(residue) = self.system.chains[chain_idx].residues.last_mut() {
                residue.push_atom(atom, DEFAULT_ANCHOR_ATOM);
            }
        }
        self
    }

    pub fn build(self) -> MolecularSystem {
        self.system
    }
}
