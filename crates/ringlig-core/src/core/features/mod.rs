//! Hydrogen-bond donor/acceptor classification.
//!
//! The correction workflow hands the rewritten structure to a
//! [`FeatureClassifier`] and serializes whatever atom names it returns. The
//! crate ships [`rules::RuleBasedClassifier`]; an external chemistry engine can
//! be plugged in by implementing the trait.

pub mod rules;

use crate::core::models::atom::AtomRecord;
use thiserror::Error;

/// Acceptor and donor atom names of one compound, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HBondFeatures {
    pub acceptors: Vec<String>,
    pub donors: Vec<String>,
}

/// The rewritten structure as seen by a classifier.
#[derive(Debug, Clone, Copy)]
pub struct StructureView<'a> {
    /// Every atom record after rewriting, in file order.
    pub atoms: &'a [AtomRecord],
    /// Every bond read from `CONECT` records, as `(low, high)` serial pairs.
    pub bonds: &'a [(u32, u32)],
    /// The residue name whose atoms are classified.
    pub residue_name: &'a str,
}

impl<'a> StructureView<'a> {
    /// Iterates over the atoms belonging to the classified residue.
    pub fn residue_atoms(&self) -> impl Iterator<Item = &'a AtomRecord> + '_ {
        self.atoms
            .iter()
            .filter(move |atom| atom.residue_name == self.residue_name)
    }
}

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Feature classification failed: {0}")]
    Failed(String),
}

/// Classifies the atoms of one residue as hydrogen-bond acceptors and donors.
pub trait FeatureClassifier {
    fn classify(&self, structure: &StructureView<'_>) -> Result<HBondFeatures, ClassificationError>;
}
