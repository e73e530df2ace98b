use crate::core::io::tables::ContactRow;
use std::collections::BTreeSet;
use std::fmt;

/// An unordered residue pair in contact, stored with 1-based numbers and `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Contact {
    a: usize,
    b: usize,
}

impl Contact {
    /// Builds a contact from two distinct 1-based residue numbers in any order.
    pub fn new(x: usize, y: usize) -> Option<Self> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Some(Self { a: x, b: y }),
            std::cmp::Ordering::Greater => Some(Self { a: y, b: x }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn a(&self) -> usize {
        self.a
    }

    pub fn b(&self) -> usize {
        self.b
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// The contacts of one structure, ordered by `(a, b)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSet {
    contacts: BTreeSet<Contact>,
}

impl ContactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, contact: Contact) -> bool {
        self.contacts.insert(contact)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        Contact::new(x, y).is_some_and(|c| self.contacts.contains(&c))
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn is_subset(&self, other: &ContactSet) -> bool {
        self.contacts.is_subset(&other.contacts)
    }

    /// The contacts as `(a, b)` tuples in ascending order.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.contacts.iter().map(|c| (c.a, c.b)).collect()
    }
}

impl FromIterator<Contact> for ContactSet {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        Self {
            contacts: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    NoAtoms,
    MissingAnchor,
    NonFiniteAnchor,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExclusionReason::NoAtoms => "residue has no atoms",
            ExclusionReason::MissingAnchor => "anchor atom missing",
            ExclusionReason::NonFiniteAnchor => "anchor coordinates are not finite",
        };
        f.write_str(text)
    }
}

/// A residue left out of contact extraction; all of its pairs are `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedResidue {
    /// 1-based position in the structure.
    pub position: usize,
    pub name: String,
    /// Sequence number from the source file.
    pub number: Option<isize>,
    pub reason: ExclusionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtractionStats {
    pub residue_pairs: usize,
    pub unknown_pairs: usize,
    pub pruned_pairs: usize,
    pub evaluated_pairs: usize,
    pub atom_pairs_evaluated: usize,
    pub coincident_atom_pairs: usize,
    /// Anchor distance above which pairs were pruned; `None` if the pruning
    /// pass did not run.
    pub pruning_bound: Option<f64>,
}

/// The result of extracting contacts from one structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactNetwork {
    pub structure_id: String,
    pub contacts: ContactSet,
    pub excluded: Vec<ExcludedResidue>,
    pub stats: ExtractionStats,
}

impl ContactNetwork {
    /// Converts the contacts into output rows tagged with the structure id.
    pub fn rows(&self) -> Vec<ContactRow> {
        self.contacts
            .iter()
            .map(|c| ContactRow::new(&self.structure_id, c.a, c.b))
            .collect()
    }
}
