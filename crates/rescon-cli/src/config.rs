pub mod defaults;

use crate::cli::ContactsArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use rescon::engine::config::{ContactConfig, ContactConfigBuilder, PruningBound};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialContactsConfig {
    cutoff: Option<f64>,
    #[serde(rename = "anchor-atom")]
    anchor_atom: Option<String>,
    #[serde(rename = "max-residue-radius")]
    max_residue_radius: Option<f64>,
    #[serde(rename = "fixed-pruning-bound")]
    fixed_pruning_bound: Option<f64>,
    output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    contacts: Option<PartialContactsConfig>,
}

/// Everything the `contacts` command needs after merging file, flags and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactsSettings {
    pub contact_config: ContactConfig,
    pub output: PathBuf,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file given with `--config`, or starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Resolves the final settings with precedence `--set` > flags > file > defaults.
    pub fn merge_with_cli(mut self, args: &ContactsArgs) -> Result<ContactsSettings> {
        let defaults = DefaultsConfig::default();
        let mut file = self.contacts.take().unwrap_or_default();

        if let Some(cutoff) = args.cutoff {
            file.cutoff = Some(cutoff);
        }
        if let Some(anchor) = &args.anchor_atom {
            file.anchor_atom = Some(anchor.clone());
        }
        if let Some(bound) = args.fixed_pruning_bound {
            file.fixed_pruning_bound = Some(bound);
            file.max_residue_radius = None;
        }
        if let Some(output) = &args.output {
            file.output = Some(output.clone());
        }
        Self::apply_set_values(&mut file, &args.set_values)?;

        let pruning = match (file.max_residue_radius, file.fixed_pruning_bound) {
            (Some(_), Some(_)) => {
                return Err(CliError::Config(
                    "`contacts.max-residue-radius` and `contacts.fixed-pruning-bound` are mutually exclusive.".to_string(),
                ));
            }
            (Some(radius), None) => PruningBound::Radius(radius),
            (None, Some(bound)) => PruningBound::Fixed(bound),
            (None, None) => PruningBound::Measured,
        };

        let contact_config = ContactConfigBuilder::new()
            .cutoff(file.cutoff.unwrap_or(defaults.cutoff))
            .anchor_atom(file.anchor_atom.as_deref().unwrap_or(&defaults.anchor_atom))
            .pruning(pruning)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(ContactsSettings {
            contact_config,
            output: file.output.unwrap_or(defaults.network_output),
        })
    }

    fn apply_set_values(file: &mut PartialContactsConfig, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let parse_float = || -> Result<f64> {
                value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })
            };

            match key {
                "contacts.cutoff" => file.cutoff = Some(parse_float()?),
                "contacts.anchor-atom" => file.anchor_atom = Some(value_str.to_string()),
                "contacts.max-residue-radius" => {
                    file.max_residue_radius = Some(parse_float()?);
                    file.fixed_pruning_bound = None;
                }
                "contacts.fixed-pruning-bound" => {
                    file.fixed_pruning_bound = Some(parse_float()?);
                    file.max_residue_radius = None;
                }
                "contacts.output" => file.output = Some(PathBuf::from(value_str)),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
