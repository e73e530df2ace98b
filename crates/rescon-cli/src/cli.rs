use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Raphael Peer",
    version,
    about = "rescon - residue contact networks for families of protein structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the residue contact network of every structure in a directory.
    Contacts(ContactsArgs),
    /// Extract the chain carrying a Pfam domain from raw PDB files.
    Prepare(PrepareArgs),
    /// Write the sequence of every structure to a FASTA file.
    Sequences(SequencesArgs),
    /// Map residues onto a reference alignment and a reference structure.
    Map(MapArgs),
    /// Check the input data of an analysis.
    Check(CheckArgs),
}

/// Arguments for the `contacts` subcommand.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Directory with processed PDB files, one chain each.
    #[arg(required = true, value_name = "DIR")]
    pub structure_dir: PathBuf,

    /// Maximum inter-atomic distance (exclusive) for a contact, in Angstroms.
    #[arg(value_name = "CUTOFF", allow_negative_numbers = true)]
    pub cutoff: Option<f64>,

    /// Path of the CSV file to write.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the atom used as residue anchor for pruning.
    #[arg(long, value_name = "NAME")]
    pub anchor_atom: Option<String>,

    /// Prune residue pairs whose anchors are farther apart than this fixed
    /// distance instead of a bound derived from the cutoff.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub fixed_pruning_bound: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S contacts.cutoff=4.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `prepare` subcommand.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Directory with raw PDB files.
    #[arg(required = true, value_name = "RAW_DIR")]
    pub raw_dir: PathBuf,

    /// Pfam identifier of the domain of interest (e.g. PF00071).
    #[arg(required = true, value_name = "PFAM")]
    pub pfam_domain: String,

    /// SIFTS `pdb_chain_pfam.csv` file.
    #[arg(required = true, value_name = "SIFTS_CSV")]
    pub sifts: PathBuf,

    /// Output directory for the processed PDB files.
    #[arg(required = true, value_name = "OUT_DIR")]
    pub output_dir: PathBuf,

    /// Remove existing files from a non-empty output directory.
    #[arg(long)]
    pub overwrite: bool,

    /// Path of the CSV file listing the selected chains.
    #[arg(long, value_name = "PATH")]
    pub selection_report: Option<PathBuf>,
}

/// Arguments for the `sequences` subcommand.
#[derive(Args, Debug)]
pub struct SequencesArgs {
    /// Directory with processed PDB files, one chain each.
    #[arg(required = true, value_name = "DIR")]
    pub structure_dir: PathBuf,

    /// Path of the FASTA file to write.
    #[arg(value_name = "OUTFILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `map` subcommand.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Directory with processed PDB files, one chain each.
    #[arg(required = true, value_name = "DIR")]
    pub structure_dir: PathBuf,

    /// Reference alignment in FASTA format; records are named after the files.
    #[arg(required = true, value_name = "ALIGNMENT")]
    pub alignment: PathBuf,

    /// Identifier of the reference structure (e.g. 1g16).
    #[arg(required = true, value_name = "REFERENCE")]
    pub reference: String,

    /// Path of the CSV file to write.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory with raw PDB files.
    #[arg(required = true, value_name = "RAW_DIR")]
    pub raw_dir: PathBuf,

    /// Reference alignment in FASTA format.
    #[arg(required = true, value_name = "ALIGNMENT")]
    pub alignment: PathBuf,

    /// SIFTS `pdb_chain_pfam.csv` file.
    #[arg(required = true, value_name = "SIFTS_CSV")]
    pub sifts: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn contacts_accepts_positional_cutoff_and_overrides() {
        let cli = Cli::parse_from([
            "rescon",
            "-vv",
            "contacts",
            "processed",
            "4.5",
            "--anchor-atom",
            "CB",
            "-S",
            "contacts.max-residue-radius=6",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Contacts(args) = cli.command else {
            panic!("Expected 'contacts' subcommand");
        };
        assert_eq!(args.structure_dir, PathBuf::from("processed"));
        assert_eq!(args.cutoff, Some(4.5));
        assert_eq!(args.anchor_atom.as_deref(), Some("CB"));
        assert_eq!(args.set_values, vec!["contacts.max-residue-radius=6"]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["rescon", "-q", "-v", "check", "a", "b", "c"]);
        assert!(result.is_err());
    }

    #[test]
    fn prepare_requires_all_positionals() {
        assert!(Cli::try_parse_from(["rescon", "prepare", "raw", "PF00071"]).is_err());
        let cli = Cli::parse_from([
            "rescon",
            "prepare",
            "raw",
            "PF00071",
            "pdb_chain_pfam.csv",
            "processed",
            "--overwrite",
        ]);
        let Commands::Prepare(args) = cli.command else {
            panic!("Expected 'prepare' subcommand");
        };
        assert!(args.overwrite);
        assert_eq!(args.pfam_domain, "PF00071");
    }
}
