use std::collections::HashMap;

/// Maps original atom serials of the replaced residue to their new names.
///
/// The map owns the per-file counter used to build new names, so a fresh map
/// always starts numbering at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRenameMap {
    names: HashMap<u32, String>,
    next_index: usize,
}

impl Default for AtomRenameMap {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomRenameMap {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
            next_index: 1,
        }
    }

    /// Assigns the next name to `serial` and returns it.
    ///
    /// The new name is the first character of `original_name` followed by the
    /// counter value. Returns the previously assigned name as well when the
    /// serial had already been renamed.
    pub fn assign(&mut self, serial: u32, original_name: &str) -> (String, Option<String>) {
        let prefix: String = original_name.trim().chars().take(1).collect();
        let new_name = format!("{}{}", prefix, self.next_index);
        self.next_index += 1;
        let previous = self.names.insert(serial, new_name.clone());
        (new_name, previous)
    }

    pub fn get(&self, serial: u32) -> Option<&str> {
        self.names.get(&serial).map(String::as_str)
    }

    pub fn contains(&self, serial: u32) -> bool {
        self.names.contains_key(&serial)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
