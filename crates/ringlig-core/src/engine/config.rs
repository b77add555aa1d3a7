use crate::core::io::pdb::{LineLayout, ParseMode};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_REPLACE_NAME: &str = "UNL";
pub const DEFAULT_CHAIN_ID: char = 'A';

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error(
        "Compound name '{0}' must be exactly 3 characters between letters and numbers"
    )]
    InvalidCompoundCode(String),

    #[error("Chain code '{0}' must be exactly one non-blank character")]
    InvalidChainCode(String),

    #[error("Residue name to replace '{0}' must be 1 to 3 non-blank characters")]
    InvalidReplaceName(String),
}

/// Which atom lines receive the configured chain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainScope {
    /// Every `ATOM`/`HETATM` line, ligand and co-parsed protein alike.
    #[default]
    All,
    /// Only atom lines of the replaced residue.
    Ligand,
}

/// What to do with a retained `CONECT` partner that was never renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingPolicy {
    /// Abort the run with a dangling-bond error.
    #[default]
    Error,
    /// Drop the partner and log a warning.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameConfig {
    /// The compound code as given; used for output file names and headers.
    pub compound_code: String,
    /// The residue name in the input that identifies the ligand.
    pub replace_name: String,
    pub chain_id: char,
    pub chain_scope: ChainScope,
}

impl RenameConfig {
    /// The residue name written for renamed atoms (the upper-cased compound code).
    pub fn residue_name(&self) -> String {
        self.compound_code.to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub connections: bool,
    pub acc_dons: bool,
    pub layout: LineLayout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionConfig {
    pub input_path: PathBuf,
    pub parse_mode: ParseMode,
    pub dangling_policy: DanglingPolicy,
    pub rename: RenameConfig,
    pub output: OutputConfig,
}

#[derive(Default)]
pub struct CorrectionConfigBuilder {
    input_path: Option<PathBuf>,
    compound_code: Option<String>,
    replace_name: Option<String>,
    chain_id: Option<String>,
    chain_scope: Option<ChainScope>,
    parse_mode: Option<ParseMode>,
    dangling_policy: Option<DanglingPolicy>,
    output_dir: Option<PathBuf>,
    connections: Option<bool>,
    acc_dons: Option<bool>,
    layout: Option<LineLayout>,
}

impl CorrectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }
    pub fn compound_code(mut self, code: impl Into<String>) -> Self {
        self.compound_code = Some(code.into());
        self
    }
    pub fn replace_name(mut self, name: impl Into<String>) -> Self {
        self.replace_name = Some(name.into());
        self
    }
    pub fn chain_id(mut self, chain: impl Into<String>) -> Self {
        self.chain_id = Some(chain.into());
        self
    }
    pub fn chain_scope(mut self, scope: ChainScope) -> Self {
        self.chain_scope = Some(scope);
        self
    }
    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }
    pub fn dangling_policy(mut self, policy: DanglingPolicy) -> Self {
        self.dangling_policy = Some(policy);
        self
    }
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
    pub fn connections(mut self, enabled: bool) -> Self {
        self.connections = Some(enabled);
        self
    }
    pub fn acc_dons(mut self, enabled: bool) -> Self {
        self.acc_dons = Some(enabled);
        self
    }
    pub fn layout(mut self, layout: LineLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn build(self) -> Result<CorrectionConfig, ConfigError> {
        let compound_code = self
            .compound_code
            .ok_or(ConfigError::MissingParameter("compound_code"))?;
        validate_compound_code(&compound_code)?;

        let replace_name = self
            .replace_name
            .unwrap_or_else(|| DEFAULT_REPLACE_NAME.to_string());
        validate_replace_name(&replace_name)?;

        let chain_id = match self.chain_id {
            Some(chain) => parse_chain_code(&chain)?,
            None => DEFAULT_CHAIN_ID,
        };

        let input_path = self
            .input_path
            .ok_or(ConfigError::MissingParameter("input_path"))?;

        Ok(CorrectionConfig {
            input_path,
            parse_mode: self.parse_mode.unwrap_or_default(),
            dangling_policy: self.dangling_policy.unwrap_or_default(),
            rename: RenameConfig {
                compound_code,
                replace_name,
                chain_id,
                chain_scope: self.chain_scope.unwrap_or_default(),
            },
            output: OutputConfig {
                directory: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
                connections: self.connections.unwrap_or(false),
                acc_dons: self.acc_dons.unwrap_or(false),
                layout: self.layout.unwrap_or_default(),
            },
        })
    }
}

fn validate_compound_code(code: &str) -> Result<(), ConfigError> {
    if code.chars().count() == 3 && code.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidCompoundCode(code.to_string()))
    }
}

fn validate_replace_name(name: &str) -> Result<(), ConfigError> {
    let len = name.chars().count();
    if (1..=3).contains(&len) && !name.chars().any(char::is_whitespace) {
        Ok(())
    } else {
        Err(ConfigError::InvalidReplaceName(name.to_string()))
    }
}

fn parse_chain_code(chain: &str) -> Result<char, ConfigError> {
    let mut chars = chain.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Ok(c),
        _ => Err(ConfigError::InvalidChainCode(chain.to_string())),
    }
}
