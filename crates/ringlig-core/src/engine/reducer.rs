use super::config::DanglingPolicy;
use super::error::CorrectionError;
use crate::core::models::bonds::{ConectRecord, ReducedBondList, ReducedRecord};
use crate::core::models::rename::AtomRenameMap;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Reduces `CONECT` records to a one-direction bond list over renamed atoms.
///
/// A partner is kept only when its serial is greater than the node serial and
/// the node was renamed. Partners that were never renamed are handled by the
/// dangling policy at the time the record is reduced.
#[derive(Debug, Default)]
pub struct ConnectivityReducer {
    policy: DanglingPolicy,
    kept: ReducedBondList,
    seen: HashSet<(u32, u32)>,
}

impl ConnectivityReducer {
    pub fn new(policy: DanglingPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Reduces one record and returns whether anything was kept.
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::DanglingBond`] under [`DanglingPolicy::Error`]
    /// when a retained partner has no entry in `names`.
    pub fn reduce(
        &mut self,
        record: &ConectRecord,
        names: &AtomRenameMap,
        line_num: usize,
    ) -> Result<bool, CorrectionError> {
        let node = record.node;
        if !names.contains(node) {
            return Ok(false);
        }

        let mut partners: Vec<u32> = Vec::new();
        for &partner in &record.partners {
            if partner <= node
                || partners.contains(&partner)
                || self.seen.contains(&(node, partner))
            {
                continue;
            }
            if !names.contains(partner) {
                match self.policy {
                    DanglingPolicy::Error => {
                        return Err(CorrectionError::DanglingBond {
                            line: line_num,
                            node,
                            partner,
                        });
                    }
                    DanglingPolicy::Skip => {
                        warn!(
                            line = line_num,
                            "Skipping bond {}-{}: atom {} was never renamed.",
                            node,
                            partner,
                            partner
                        );
                        continue;
                    }
                }
            }
            partners.push(partner);
        }

        if partners.is_empty() {
            return Ok(false);
        }
        self.seen.extend(partners.iter().map(|&p| (node, p)));
        debug!(line = line_num, node, ?partners, "Kept bond record.");
        self.kept.push(ReducedRecord { node, partners });
        Ok(true)
    }

    pub fn into_bonds(self) -> ReducedBondList {
        self.kept
    }
}
