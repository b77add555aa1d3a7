use crate::cli::{ChainScopeArg, Cli, DanglingArg, LayoutArg, ParseModeArg};
use crate::error::{CliError, Result};
use ringlig::core::io::pdb::{LineLayout, ParseMode};
use ringlig::engine::config::{
    ChainScope, CorrectionConfig, CorrectionConfigBuilder, DanglingPolicy,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

impl From<ChainScopeArg> for ChainScope {
    fn from(arg: ChainScopeArg) -> Self {
        match arg {
            ChainScopeArg::All => ChainScope::All,
            ChainScopeArg::Ligand => ChainScope::Ligand,
        }
    }
}

impl From<ParseModeArg> for ParseMode {
    fn from(arg: ParseModeArg) -> Self {
        match arg {
            ParseModeArg::Columns => ParseMode::Columns,
            ParseModeArg::Whitespace => ParseMode::Whitespace,
        }
    }
}

impl From<LayoutArg> for LineLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Compact => LineLayout::Compact,
            LayoutArg::Standard => LineLayout::Standard,
        }
    }
}

impl From<DanglingArg> for DanglingPolicy {
    fn from(arg: DanglingArg) -> Self {
        match arg {
            DanglingArg::Error => DanglingPolicy::Error,
            DanglingArg::Skip => DanglingPolicy::Skip,
        }
    }
}

/// Settings read from a TOML configuration file. Every key is optional;
/// values given on the command line take precedence.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialCorrectConfig {
    replace_name: Option<String>,
    rename_chain: Option<String>,
    chain_scope: Option<ChainScopeArg>,
    parse_mode: Option<ParseModeArg>,
    layout: Option<LayoutArg>,
    dangling: Option<DanglingArg>,
    outdir: Option<PathBuf>,
    connections: Option<bool>,
    acc_dons: Option<bool>,
}

impl PartialCorrectConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge_with_cli(self, cli: &Cli) -> Result<CorrectionConfig> {
        let mut builder = CorrectionConfigBuilder::new()
            .input_path(&cli.file)
            .compound_code(cli.compound_name.as_str())
            .connections(cli.connections || self.connections.unwrap_or(false))
            .acc_dons(cli.acc_dons || self.acc_dons.unwrap_or(false));

        if let Some(name) = cli.replace_name.clone().or(self.replace_name) {
            builder = builder.replace_name(name);
        }
        if let Some(chain) = cli.rename_chain.clone().or(self.rename_chain) {
            builder = builder.chain_id(chain);
        }
        if let Some(scope) = cli.chain_scope.or(self.chain_scope) {
            builder = builder.chain_scope(scope.into());
        }
        if let Some(mode) = cli.parse_mode.or(self.parse_mode) {
            builder = builder.parse_mode(mode.into());
        }
        if let Some(layout) = cli.layout.or(self.layout) {
            builder = builder.layout(layout.into());
        }
        if let Some(policy) = cli.dangling.or(self.dangling) {
            builder = builder.dangling_policy(policy.into());
        }
        if let Some(dir) = cli.outdir.clone().or(self.outdir) {
            builder = builder.output_dir(dir);
        }

        Ok(builder.build()?)
    }
}

/// Loads the file named by `--config` (if any) and merges it with the CLI.
pub fn resolve(cli: &Cli) -> Result<CorrectionConfig> {
    let partial = match &cli.config {
        Some(path) => PartialCorrectConfig::from_file(path)?,
        None => PartialCorrectConfig::default(),
    };
    partial.merge_with_cli(cli)
}
