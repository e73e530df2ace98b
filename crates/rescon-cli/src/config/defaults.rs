use rescon::engine::config::DEFAULT_CUTOFF;
use rescon::core::models::residue::DEFAULT_ANCHOR_ATOM;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub cutoff: f64,
    pub anchor_atom: String,
    pub network_output: PathBuf,
    pub selection_report: PathBuf,
    pub sequence_output: PathBuf,
    pub mapping_output: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            anchor_atom: DEFAULT_ANCHOR_ATOM.to_string(),
            network_output: PathBuf::from("results/raw_networks.csv"),
            selection_report: PathBuf::from("results/selected_chains_info.csv"),
            sequence_output: PathBuf::from(rescon::workflows::sequences::DEFAULT_SEQUENCE_FILE),
            mapping_output: PathBuf::from("results/mapping.csv"),
        }
    }
}
