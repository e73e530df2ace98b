//! # Core Module
//!
//! The stateless foundation of RESCON: structure data models, file I/O, residue
//! lookup tables and geometry helpers.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Atoms, residues, chains, whole files and
//!   the flat residue sequence consumed by contact extraction
//! - **File I/O** ([`io`]) - PDB structures, FASTA sequences and CSV tables
//! - **Residue Knowledge** ([`topology`]) - One-letter codes and peptide backbone checks
//! - **Utilities** ([`utils`]) - Distances between atoms and residues, structure identifiers
//!
//! Nothing in this module depends on the engine or the workflows; the contact engine
//! reads these types but never mutates them.

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
