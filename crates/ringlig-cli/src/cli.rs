use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The ringlig Developers",
    version,
    about = "RINGLIG CLI - Rename the atoms of a small-molecule PDB file and output the bond order and hydrogen-bond annotations used by the RING PyMOL plugin.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    // --- Core Arguments ---
    /// Path to PDB file of the ligand.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Three character code used to rename the ligand.
    #[arg(value_name = "COMPOUND_NAME")]
    pub compound_name: String,

    /// Name of the residue to change. Defaults to UNL.
    #[arg(value_name = "REPLACE_NAME")]
    pub replace_name: Option<String>,

    /// Rename the chain of the ligand or protein/ligand complex. Defaults to A.
    #[arg(value_name = "RENAME_CHAIN")]
    pub rename_chain: Option<String>,

    // --- Outputs ---
    /// Output connection scheme for use with RING.
    #[arg(long)]
    pub connections: bool,

    /// Output hydrogen bond donor and acceptor atoms for use with RING.
    #[arg(long)]
    pub acc_dons: bool,

    /// Output directory. Defaults to the current directory.
    #[arg(long, value_name = "PATH")]
    pub outdir: Option<PathBuf>,

    // --- Behavior ---
    /// Which atom lines receive the new chain identifier.
    #[arg(long, value_enum, value_name = "SCOPE")]
    pub chain_scope: Option<ChainScopeArg>,

    /// How ATOM/HETATM and CONECT fields are located on a line.
    #[arg(long, value_enum, value_name = "MODE")]
    pub parse_mode: Option<ParseModeArg>,

    /// Column layout of the rewritten atom lines.
    #[arg(long, value_enum, value_name = "LAYOUT")]
    pub layout: Option<LayoutArg>,

    /// What to do with a bonded atom that was never renamed.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub dangling: Option<DanglingArg>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ChainScopeArg {
    /// Every ATOM/HETATM line.
    All,
    /// Only atom lines of the replaced residue.
    Ligand,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ParseModeArg {
    /// Fixed PDB column offsets.
    Columns,
    /// Whitespace-separated fields (legacy).
    Whitespace,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutArg {
    /// The RING ligand layout (7-column x coordinate).
    Compact,
    /// PDB v3.3 column offsets.
    Standard,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DanglingArg {
    /// Abort the run.
    Error,
    /// Drop the bond and log a warning.
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_are_optional_after_compound_name() {
        let cli = Cli::parse_from(["ringlig", "ligand.pdb", "LIG"]);
        assert_eq!(cli.file, PathBuf::from("ligand.pdb"));
        assert_eq!(cli.compound_name, "LIG");
        assert_eq!(cli.replace_name, None);
        assert_eq!(cli.rename_chain, None);
        assert!(!cli.connections);
        assert!(!cli.acc_dons);
        assert_eq!(cli.outdir, None);
    }

    #[test]
    fn all_arguments_are_parsed() {
        let cli = Cli::parse_from([
            "ringlig",
            "ligand.pdb",
            "LIG",
            "LG1",
            "L",
            "--connections",
            "--acc-dons",
            "--outdir",
            "out",
            "--chain-scope",
            "ligand",
            "--parse-mode",
            "whitespace",
            "--layout",
            "standard",
            "--dangling",
            "skip",
            "-vv",
        ]);
        assert_eq!(cli.replace_name.as_deref(), Some("LG1"));
        assert_eq!(cli.rename_chain.as_deref(), Some("L"));
        assert!(cli.connections);
        assert!(cli.acc_dons);
        assert_eq!(cli.outdir, Some(PathBuf::from("out")));
        assert_eq!(cli.chain_scope, Some(ChainScopeArg::Ligand));
        assert_eq!(cli.parse_mode, Some(ParseModeArg::Whitespace));
        assert_eq!(cli.layout, Some(LayoutArg::Standard));
        assert_eq!(cli.dangling, Some(DanglingArg::Skip));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["ringlig", "ligand.pdb", "LIG", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn compound_name_is_required() {
        let result = Cli::try_parse_from(["ringlig", "ligand.pdb"]);
        assert!(result.is_err());
    }
}
