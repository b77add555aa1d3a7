use super::{ClassificationError, FeatureClassifier, HBondFeatures, StructureView};
use crate::core::models::atom::AtomRecord;
use crate::core::utils::elements::{covalent_radius, is_hydrogen};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, trace};

/// Distance added to the covalent radius sum when inferring a bond.
pub const DEFAULT_BOND_TOLERANCE: f64 = 0.4;
const MIN_BOND_DISTANCE: f64 = 0.4;

/// Classifies atoms from their element and bonded neighbours.
///
/// - donors are N, O and S atoms carrying at least one hydrogen;
/// - acceptors are O and F atoms, and N atoms without hydrogens that have
///   fewer than three heavy-atom neighbours.
///
/// Bonds come from `CONECT` records. Residue atoms that appear in no record
/// get their bonds inferred from covalent radii.
#[derive(Debug, Clone, Copy)]
pub struct RuleBasedClassifier {
    pub bond_tolerance: f64,
}

impl Default for RuleBasedClassifier {
    fn default() -> Self {
        Self {
            bond_tolerance: DEFAULT_BOND_TOLERANCE,
        }
    }
}

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn neighbours<'a>(
        &self,
        structure: &StructureView<'a>,
    ) -> Vec<(&'a AtomRecord, Vec<&'a AtomRecord>)> {
        let by_serial: HashMap<u32, &AtomRecord> =
            structure.atoms.iter().map(|atom| (atom.serial, atom)).collect();

        let mut explicit: HashMap<u32, BTreeSet<u32>> = HashMap::new();
        for &(a, b) in structure.bonds {
            explicit.entry(a).or_default().insert(b);
            explicit.entry(b).or_default().insert(a);
        }

        let residue: Vec<&AtomRecord> = structure.residue_atoms().collect();
        let mut result = Vec::with_capacity(residue.len());

        for &atom in &residue {
            let mut bonded: BTreeSet<u32> = explicit.get(&atom.serial).cloned().unwrap_or_default();
            if bonded.is_empty() {
                bonded = self.infer_bonds(atom, &residue);
                trace!(
                    atom = %atom.atom_name,
                    count = bonded.len(),
                    "No CONECT bonds, inferred from distances."
                );
            }
            let neighbours = bonded
                .iter()
                .filter_map(|serial| by_serial.get(serial).copied())
                .collect();
            result.push((atom, neighbours));
        }
        result
    }

    fn infer_bonds(&self, atom: &AtomRecord, candidates: &[&AtomRecord]) -> BTreeSet<u32> {
        let element = atom.element();
        let Some(radius) = covalent_radius(&element) else {
            return BTreeSet::new();
        };
        candidates
            .iter()
            .filter(|other| other.serial != atom.serial)
            .filter(|other| !(is_hydrogen(&element) && other.is_hydrogen()))
            .filter(|other| {
                covalent_radius(&other.element()).is_some_and(|other_radius| {
                    let distance = nalgebra::distance(&atom.position, &other.position);
                    distance > MIN_BOND_DISTANCE
                        && distance <= radius + other_radius + self.bond_tolerance
                })
            })
            .map(|other| other.serial)
            .collect()
    }
}

impl FeatureClassifier for RuleBasedClassifier {
    fn classify(
        &self,
        structure: &StructureView<'_>,
    ) -> Result<HBondFeatures, ClassificationError> {
        let mut features = HBondFeatures::default();

        for (atom, neighbours) in self.neighbours(structure) {
            let hydrogens = neighbours.iter().filter(|n| n.is_hydrogen()).count();
            let heavy = neighbours.len() - hydrogens;

            let (is_acceptor, is_donor) = match atom.element().as_str() {
                "O" => (true, hydrogens > 0),
                "N" => (hydrogens == 0 && heavy < 3, hydrogens > 0),
                "S" => (false, hydrogens > 0),
                "F" => (true, false),
                _ => (false, false),
            };

            if is_acceptor {
                features.acceptors.push(atom.atom_name.clone());
            }
            if is_donor {
                features.donors.push(atom.atom_name.clone());
            }
        }

        debug!(
            acceptors = features.acceptors.len(),
            donors = features.donors.len(),
            "Classified hydrogen-bond features of residue {}.",
            structure.residue_name
        );
        Ok(features)
    }
}
