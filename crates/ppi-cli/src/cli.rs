use crate::utils::parser::parse_chain_id;
use clap::{Args, Parser, Subcommand};
use ppinterface::engine::config::{ContactStrategy, DEFAULT_CONTACT_CUTOFF};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "PPInterface CLI - Detect protein-protein interface residues in PDB structures, extract the interface and suggest point mutations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
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
    /// Find the residues at the interface between two chains.
    Interface(InterfaceArgs),
    /// Print the mass-weighted center of one chain.
    Center(CenterArgs),
    /// List the chains of a structure with their sizes and display colors.
    Chains(ChainsArgs),
}

/// Arguments for the `interface` subcommand.
#[derive(Args, Debug)]
pub struct InterfaceArgs {
    // --- Core Arguments ---
    /// Path to the input structure in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// First chain of the interface ('_' for a blank chain identifier).
    #[arg(short = 'a', long, required = true, value_name = "CHAIN", value_parser = parse_chain_id)]
    pub chain_a: char,

    /// Second chain of the interface ('_' for a blank chain identifier).
    #[arg(short = 'b', long, required = true, value_name = "CHAIN", value_parser = parse_chain_id)]
    pub chain_b: char,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Contact Overrides ---
    /// Override the contact distance cutoff in Angstroms.
    #[arg(short = 'd', long, value_name = "ANGSTROMS")]
    pub cutoff: Option<f64>,

    /// Override the contact search strategy ('brute-force' or 'kd-tree').
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<ContactStrategy>,

    // --- Mutation Overrides ---
    /// Chain whose interface residues receive mutation suggestions. Defaults to chain A.
    #[arg(short = 'm', long, value_name = "CHAIN", value_parser = parse_chain_id)]
    pub mutation_chain: Option<char>,

    /// Skip mutation suggestions entirely.
    #[arg(long, conflicts_with = "mutation_chain")]
    pub no_mutations: bool,

    // --- Outputs ---
    /// Write the interface residues as a PDB file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the interface residues as a CSV table.
    #[arg(long, value_name = "PATH")]
    pub residues_csv: Option<PathBuf>,

    /// Write the contacting residue pairs as a CSV table.
    #[arg(long, value_name = "PATH")]
    pub pairs_csv: Option<PathBuf>,

    /// Write the mutation suggestions as a CSV table.
    #[arg(long, value_name = "PATH")]
    pub suggestions_csv: Option<PathBuf>,

    /// Write a PyMOL script that colors chains and highlights the interface.
    #[arg(long, value_name = "PATH")]
    pub pymol_script: Option<PathBuf>,

    /// Write one PyMOL script per suggested mutation site into this directory.
    #[arg(long, value_name = "DIR")]
    pub site_scripts: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S contacts.cutoff=4.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `center` subcommand.
#[derive(Args, Debug)]
pub struct CenterArgs {
    /// Path to the input structure in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Chain to compute the center of mass for ('_' for a blank chain identifier).
    #[arg(long, required = true, value_name = "CHAIN", value_parser = parse_chain_id)]
    pub chain: char,

    /// Restrict the calculation to the residues of the interface with this chain.
    #[arg(long, value_name = "CHAIN", value_parser = parse_chain_id)]
    pub partner: Option<char>,

    /// Contact distance cutoff in Angstroms used with --partner.
    #[arg(short = 'd', long, value_name = "ANGSTROMS", requires = "partner", default_value_t = DEFAULT_CONTACT_CUTOFF)]
    pub cutoff: f64,
}

/// Arguments for the `chains` subcommand.
#[derive(Args, Debug)]
pub struct ChainsArgs {
    /// Path to the input structure in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
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
    fn parses_interface_arguments() {
        let cli = Cli::parse_from([
            "ppi", "-vv", "interface", "-i", "1abc.pdb", "-a", "H", "-b", "A", "-d", "4.5",
            "--strategy", "kd-tree", "-S", "output.pairs-csv=pairs.csv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Interface(args) = cli.command else {
            panic!("Expected 'interface' subcommand");
        };
        assert_eq!(args.input, PathBuf::from("1abc.pdb"));
        assert_eq!((args.chain_a, args.chain_b), ('H', 'A'));
        assert_eq!(args.cutoff, Some(4.5));
        assert_eq!(args.strategy, Some(ContactStrategy::KdTree));
        assert_eq!(args.mutation_chain, None);
        assert!(!args.no_mutations);
        assert_eq!(args.set_values, vec!["output.pairs-csv=pairs.csv".to_string()]);
    }

    #[test]
    fn rejects_multi_character_chain() {
        let result = Cli::try_parse_from(["ppi", "interface", "-i", "x.pdb", "-a", "HL", "-b", "A"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_mutations_conflicts_with_mutation_chain() {
        let result = Cli::try_parse_from([
            "ppi", "interface", "-i", "x.pdb", "-a", "H", "-b", "A", "-m", "H", "--no-mutations",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["ppi", "-q", "-v", "chains", "-i", "x.pdb"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_center_with_blank_chain_placeholder() {
        let cli = Cli::parse_from(["ppi", "center", "-i", "x.pdb", "--chain", "_"]);
        let Commands::Center(args) = cli.command else {
            panic!("Expected 'center' subcommand");
        };
        assert_eq!(args.chain, ' ');
        assert_eq!(args.partner, None);
        assert_eq!(args.cutoff, DEFAULT_CONTACT_CUTOFF);
    }

    #[test]
    fn parses_center_with_partner() {
        let cli = Cli::parse_from([
            "ppi", "center", "-i", "x.pdb", "--chain", "H", "--partner", "A", "-d", "4",
        ]);
        let Commands::Center(args) = cli.command else {
            panic!("Expected 'center' subcommand");
        };
        assert_eq!(args.partner, Some('A'));
        assert_eq!(args.cutoff, 4.0);
    }
}
