use nalgebra::Point3;
use std::str::FromStr;

/// The PDB record an atom was read from.
///
/// Standard polymer atoms are written as `ATOM` records, everything else
/// (ligands, waters, modified residues) as `HETATM`. Chain preparation keeps
/// only the former.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RecordKind {
    /// A standard `ATOM` record.
    #[default]
    Atom,
    /// A `HETATM` record (heteroatom).
    Hetatm,
}

impl RecordKind {
    /// Returns the six-character-padded record name used by the PDB format.
    pub fn as_record_name(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
        }
    }
}

impl FromStr for RecordKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ATOM" => Ok(RecordKind::Atom),
            "HETATM" => Ok(RecordKind::Hetatm),
            _ => Err(()),
        }
    }
}

/// An atom with its identity and 3-D coordinate.
///
/// Atoms are immutable once parsed; every derived quantity in the contact
/// engine reads `position` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from the source file.
    pub serial: usize,
    /// The atom name (e.g., "CA", "CB", "OG1").
    pub name: String,
    /// The element symbol (e.g., "C", "N", "H"), upper case.
    pub element: String,
    /// Whether the atom came from an `ATOM` or `HETATM` record.
    pub record: RecordKind,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `ATOM`-record atom, inferring the element from its name.
    ///
    /// # Arguments
    ///
    /// * `serial` - The serial number of the atom.
    /// * `name` - The name of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(serial: usize, name: &str, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.trim().to_string(),
            element: infer_element(name),
            record: RecordKind::default(),
            position,
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        let element = element.trim();
        if !element.is_empty() {
            self.element = element.to_ascii_uppercase();
        }
        self
    }

    pub fn with_record(mut self, record: RecordKind) -> Self {
        self.record = record;
        self
    }

    /// Hydrogen and deuterium both count as hydrogens.
    pub fn is_hydrogen(&self) -> bool {
        matches!(self.element.as_str(), "H" | "D")
    }

    pub fn is_hetero(&self) -> bool {
        self.record == RecordKind::Hetatm
    }

    pub fn has_finite_position(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}

/// Guesses the element of an atom from its name when the element columns are blank.
///
/// The first alphabetic character of the name is used, which is correct for
/// the standard amino acid atom names (`CA` is carbon, `HG21` is hydrogen).
pub(crate) fn infer_element(name: &str) -> String {
    name.trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}
