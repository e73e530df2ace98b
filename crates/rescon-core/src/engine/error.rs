use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::fasta::FastaError;
use crate::core::io::pdb::PdbError;
use crate::core::io::tables::TableError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to read structure '{path}': {source}", path = path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to process sequence file '{path}': {source}", path = path.display())]
    Fasta {
        path: PathBuf,
        #[source]
        source: FastaError,
    },

    #[error("Failed to process table '{path}': {source}", path = path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
