use super::config::{ChainScope, RenameConfig};
use crate::core::models::atom::AtomRecord;
use crate::core::models::rename::AtomRenameMap;
use tracing::{debug, warn};

const MAX_ATOM_NAME_LEN: usize = 4;

/// Rewrites atom records of one file.
///
/// Every record gets the configured chain identifier (subject to the chain
/// scope). Records of the replaced residue additionally get a new atom name
/// and the compound residue name.
pub struct AtomRewriter<'a> {
    config: &'a RenameConfig,
    residue_name: String,
    names: AtomRenameMap,
    warned_long_name: bool,
}

impl<'a> AtomRewriter<'a> {
    pub fn new(config: &'a RenameConfig) -> Self {
        Self {
            config,
            residue_name: config.residue_name(),
            names: AtomRenameMap::new(),
            warned_long_name: false,
        }
    }

    /// Rewrites one record in place and returns whether it was renamed.
    pub fn rewrite(&mut self, atom: &mut AtomRecord) -> bool {
        let is_target = atom.residue_name == self.config.replace_name;

        if is_target || self.config.chain_scope == ChainScope::All {
            atom.chain_id = self.config.chain_id;
        }
        if !is_target {
            return false;
        }

        let (new_name, previous) = self.names.assign(atom.serial, &atom.atom_name);
        if let Some(previous) = previous {
            warn!(
                "Atom serial {} appears more than once in residue {}; name '{}' replaces '{}'.",
                atom.serial, self.config.replace_name, new_name, previous
            );
        }
        if new_name.len() > MAX_ATOM_NAME_LEN && !self.warned_long_name {
            warn!(
                "Renamed atom '{}' is longer than {} characters; the output will not be column-aligned.",
                new_name, MAX_ATOM_NAME_LEN
            );
            self.warned_long_name = true;
        }
        debug!(serial = atom.serial, "Renamed atom '{}' to '{}'.", atom.atom_name, new_name);

        atom.atom_name = new_name;
        atom.residue_name.clone_from(&self.residue_name);
        true
    }

    pub fn names(&self) -> &AtomRenameMap {
        &self.names
    }

    pub fn into_names(self) -> AtomRenameMap {
        self.names
    }
}
