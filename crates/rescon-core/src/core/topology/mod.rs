//! # Topology Module
//!
//! Static knowledge about amino acid residues: their one-letter codes and the
//! backbone atoms a residue needs to be part of a peptide chain.
//!
//! ## Key Components
//!
//! - [`amino_acids`] - Residue name lookup tables (compile-time `phf` maps)
//!
//! ## Usage
//!
//! ```
//! use rescon::core::topology::amino_acids::one_letter_code;
//!
//! assert_eq!(one_letter_code("TRP"), Some('W'));
//! assert_eq!(one_letter_code("HOH"), None);
//! ```

pub mod amino_acids;
