//! Provides input/output functionality for the file formats used by RESCON.
//!
//! Structures are read with [`pdb::PdbFile`], either as a whole
//! [`MolecularSystem`](crate::core::models::system::MolecularSystem) or directly
//! as the [`Structure`](crate::core::models::structure::Structure) consumed by
//! contact extraction. Sequence records use FASTA ([`fasta`]) and every tabular
//! input or output (contact networks, chain selections, residue mappings, the
//! SIFTS chain-to-Pfam table) goes through [`tables`].

pub mod fasta;
pub mod pdb;
pub mod tables;
