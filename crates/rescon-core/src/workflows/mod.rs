//! # Workflows Module
//!
//! High-level entry points tying `core` and `engine` together into the steps
//! of a contact network analysis.
//!
//! ## Overview
//!
//! A typical analysis runs the workflows in this order:
//!
//! - **Validation** ([`validate`]) - checks raw structures, the SIFTS table and the alignment
//! - **Preparation** ([`prepare`]) - extracts the chain carrying a Pfam domain and cleans it
//! - **Sequences** ([`sequences`]) - writes the sequences to align into a reference alignment
//! - **Contacts** ([`contacts`]) - extracts the contact network of every structure
//! - **Mapping** ([`mapping`]) - maps residues onto alignment columns and a reference structure
//!
//! [`extract`] holds the single-structure extraction that [`contacts`] runs
//! for each file.

pub mod contacts;
pub mod extract;
pub mod mapping;
pub mod prepare;
pub mod sequences;
pub mod validate;

use crate::core::io::pdb::{PdbFile, PdbMetadata};
use crate::core::models::structure::Structure;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::identifiers::{file_name_of, structure_id_from_path};
use crate::engine::error::EngineError;
use std::fs;
use std::path::{Path, PathBuf};

/// Lists the regular, non-hidden files of `dir`, sorted by file name.
pub fn list_structure_files(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let io_err = |source| EngineError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn read_structure_file(path: &Path) -> Result<(MolecularSystem, PdbMetadata), EngineError> {
    PdbFile::read_from_path(path).map_err(|source| EngineError::Structure {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_structure(path: &Path, id: &str) -> Result<Structure, EngineError> {
    PdbFile::read_structure(path, id).map_err(|source| EngineError::Structure {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn structure_id(path: &Path) -> Result<String, EngineError> {
    structure_id_from_path(path).ok_or_else(|| {
        EngineError::InvalidInput(format!(
            "cannot derive a structure identifier from '{}'",
            path.display()
        ))
    })
}

pub(crate) fn file_name(path: &Path) -> Result<String, EngineError> {
    file_name_of(path).ok_or_else(|| {
        EngineError::InvalidInput(format!("'{}' has no valid file name", path.display()))
    })
}
