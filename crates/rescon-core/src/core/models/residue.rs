use super::atom::Atom;
use nalgebra::Point3;

/// The atom used as a residue's anchor unless configured otherwise.
pub const DEFAULT_ANCHOR_ATOM: &str = "CA";

/// An ordered collection of atoms at one chain position.
///
/// Besides its atoms, a residue records the numbering it had in the source
/// file and which of its atoms (if any) is the designated anchor. A residue
/// without an anchor never takes part in contact extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub name: String,                 // Residue name (e.g., "ALA", "GLY")
    pub number: Option<isize>,        // Sequence number from the source file
    pub insertion_code: Option<char>, // PDB insertion code, if any
    atoms: Vec<Atom>,
    anchor: Option<usize>, // Index into `atoms` of the anchor atom
}

impl Residue {
    pub fn new(name: &str, number: Option<isize>) -> Self {
        Self {
            name: name.trim().to_string(),
            number,
            insertion_code: None,
            atoms: Vec::new(),
            anchor: None,
        }
    }

    pub fn with_insertion_code(mut self, code: Option<char>) -> Self {
        self.insertion_code = code.filter(|c| !c.is_whitespace());
        self
    }

    /// Appends an atom, making it the anchor if its name matches `anchor_name`
    /// and no anchor has been designated yet.
    pub fn push_atom(&mut self, atom: Atom, anchor_name: &str) {
        if self.anchor.is_none() && atom.name == anchor_name {
            self.anchor = Some(self.atoms.len());
        }
        self.atoms.push(atom);
    }

    /// Re-designates the anchor as the first atom called `anchor_name`.
    ///
    /// Returns whether such an atom exists.
    pub fn designate_anchor(&mut self, anchor_name: &str) -> bool {
        self.anchor = self.atoms.iter().position(|a| a.name == anchor_name);
        self.anchor.is_some()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    pub fn anchor(&self) -> Option<&Atom> {
        self.anchor.map(|idx| &self.atoms[idx])
    }

    /// The anchor coordinate, if the anchor exists and its coordinates are finite.
    pub fn anchor_position(&self) -> Option<Point3<f64>> {
        self.anchor()
            .filter(|a| a.has_finite_position())
            .map(|a| a.position)
    }

    /// Keeps only the atoms matching `predicate`, re-resolving the anchor by name.
    pub(crate) fn retain_atoms<F: FnMut(&Atom) -> bool>(&mut self, predicate: F) {
        let anchor_name = self.anchor().map(|a| a.name.clone());
        self.atoms.retain(predicate);
        self.anchor = None;
        if let Some(name) = anchor_name {
            self.designate_anchor(&name);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}
