use super::rename::AtomRenameMap;

/// A parsed `CONECT` record: one node serial and the serials bonded to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConectRecord {
    pub node: u32,
    pub partners: Vec<u32>,
}

impl ConectRecord {
    pub fn new(node: u32, partners: Vec<u32>) -> Self {
        Self { node, partners }
    }

    /// Returns every bond of this record as an ordered `(low, high)` pair.
    pub fn bond_pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.partners
            .iter()
            .filter(|&&p| p != self.node)
            .map(|&p| (self.node.min(p), self.node.max(p)))
    }
}

/// One retained entry of the reduced bond list.
///
/// Every partner serial is strictly greater than `node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedRecord {
    pub node: u32,
    pub partners: Vec<u32>,
}

impl ReducedRecord {
    /// Returns the node followed by its partners.
    pub fn serials(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::once(self.node).chain(self.partners.iter().copied())
    }
}

/// The ordered, non-redundant bond list produced by the connectivity reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReducedBondList {
    records: Vec<ReducedRecord>,
}

impl ReducedBondList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ReducedRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ReducedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Translates every record into renamed atom names.
    ///
    /// # Errors
    ///
    /// Returns the first serial that has no entry in `names`.
    pub fn translate(&self, names: &AtomRenameMap) -> Result<Vec<Vec<String>>, u32> {
        self.records
            .iter()
            .map(|record| {
                record
                    .serials()
                    .map(|serial| names.get(serial).map(str::to_string).ok_or(serial))
                    .collect()
            })
            .collect()
    }
}
