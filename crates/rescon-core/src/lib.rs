//! # rescon Core Library
//!
//! Residue contact networks for protein families: which residues of a
//! structure touch each other, computed for many structures at once and
//! mapped onto a common alignment.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the three-layer split of data, logic and entry points.
//!
//! - **[`core`]: The Foundation.** Plain data models (`Atom`, `Residue`,
//!   `MolecularSystem`, `Structure`), residue tables, geometry helpers and the
//!   PDB, FASTA and CSV readers and writers.
//!
//! - **[`engine`]: The Logic Core.** Contact extraction proper: the
//!   configuration, the upper-triangular distance matrix, the pruning,
//!   evaluation and thresholding passes, and the resulting `ContactNetwork`.
//!
//! - **[`workflows`]: The Public API.** Complete procedures over files:
//!   batch contact extraction, chain preparation, sequence extraction,
//!   alignment mapping and input validation.
//!
//! ## Example
//!
//! ```
//! use nalgebra::Point3;
//! use rescon::core::models::atom::Atom;
//! use rescon::core::models::residue::{DEFAULT_ANCHOR_ATOM, Residue};
//! use rescon::core::models::structure::Structure;
//! use rescon::workflows::extract::extract;
//!
//! let residues = [0.0, 3.8, 20.0]
//!     .into_iter()
//!     .map(|x| {
//!         let mut residue = Residue::new("GLY", None);
//!         residue.push_atom(Atom::new(1, "CA", Point3::new(x, 0.0, 0.0)), DEFAULT_ANCHOR_ATOM);
//!         residue
//!     })
//!     .collect();
//! let structure = Structure::new("1abc", residues);
//!
//! assert_eq!(extract(&structure, 5.0).pairs(), vec![(1, 2)]);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
