use super::config::ConfigError;
use crate::core::features::ClassificationError;
use crate::core::io::pdb::PdbError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorrectionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Pdb(#[from] PdbError),

    #[error(
        "Dangling bond reference on line {line}: atom {node} is bonded to atom {partner}, which was never renamed"
    )]
    DanglingBond { line: usize, node: u32, partner: u32 },

    #[error("Bond record references atom {0}, which has no assigned name")]
    UnresolvedSerial(u32),

    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

impl CorrectionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
