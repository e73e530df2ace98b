//! # Core Models Module
//!
//! This module contains the data structures used to represent protein structures
//! in RESCON, from individual atoms up to a whole file's worth of chains.
//!
//! ## Overview
//!
//! Two views of the same data exist:
//!
//! - A [`system::MolecularSystem`] is everything a structure file contains, chains in
//!   file order. The preparation workflow filters it (chain selection, heteroatom and
//!   hydrogen removal) and writes it back out.
//! - A [`structure::Structure`] is the flat, ordered residue list of one chain, keyed by
//!   a structure identifier. It is the sole input of contact extraction; its residue
//!   order defines the 1-based numbering of every contact network.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom identity, element, record kind and coordinates
//! - [`residue`] - Residues with source numbering and an explicit optional anchor atom
//! - [`chain`] - Chains of residues
//! - [`system`] - All chains of one file
//! - [`structure`] - The residue sequence consumed by contact extraction
//! - [`builder`] - Incremental construction of a system in file order
//!
//! ## Usage
//!
//! ```
//! use nalgebra::Point3;
//! use rescon::core::models::{atom::Atom, builder::MolecularSystemBuilder, structure::Structure};
//!
//! let mut builder = MolecularSystemBuilder::new();
//! builder.start_chain('A');
//! builder.start_residue("ALA", Some(1), None);
//! builder.add_atom(Atom::new(1, "CA", Point3::new(0.0, 0.0, 0.0)));
//! let system = builder.build();
//!
//! let structure = Structure::from_system("1abc", &system);
//! assert_eq!(structure.len(), 1);
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod residue;
pub mod structure;
pub mod system;
