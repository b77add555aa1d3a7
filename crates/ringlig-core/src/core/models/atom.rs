use nalgebra::Point3;
use std::fmt;

/// The record keyword an atom line was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RecordType {
    /// Standard polymer atom (`ATOM`).
    Atom,
    /// Hetero atom, used for ligands and other non-polymer groups (`HETATM`).
    #[default]
    Hetatm,
}

impl RecordType {
    /// Returns the PDB keyword for this record type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Atom => "ATOM",
            RecordType::Hetatm => "HETATM",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single `ATOM`/`HETATM` record.
///
/// The serial number is taken from the source file and never reassigned; the
/// rewriter only touches `atom_name`, `residue_name` and `chain_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The keyword the record was read from.
    pub record_type: RecordType,
    /// The atom serial number as assigned by the source file.
    pub serial: u32,
    /// The atom name (at most 4 characters in a well-formed file).
    pub atom_name: String,
    /// The residue name (at most 3 characters in a well-formed file).
    pub residue_name: String,
    /// The chain identifier. A blank column is kept as `' '`.
    pub chain_id: char,
    /// The residue sequence number.
    pub residue_seq: i32,
    /// The Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// The occupancy factor.
    pub occupancy: f64,
    /// The isotropic temperature factor.
    pub temp_factor: f64,
    /// The element symbol, normalized to alphabetic characters only.
    pub element_symbol: String,
}

impl AtomRecord {
    /// Creates a `HETATM` record with unit occupancy and no element symbol.
    pub fn new(serial: u32, atom_name: &str, residue_name: &str, position: Point3<f64>) -> Self {
        Self {
            record_type: RecordType::Hetatm,
            serial,
            atom_name: atom_name.to_string(),
            residue_name: residue_name.to_string(),
            chain_id: ' ',
            residue_seq: 1,
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
            element_symbol: String::new(),
        }
    }

    /// Returns the element symbol, falling back to the leading alphabetic
    /// characters of the atom name when the element column was empty.
    ///
    /// The fallback keeps at most one letter after the first when the name
    /// starts with a known two-letter halogen (`CL`, `BR`), otherwise only the
    /// first letter is used.
    pub fn element(&self) -> String {
        if !self.element_symbol.is_empty() {
            return self.element_symbol.to_ascii_uppercase();
        }
        let letters: String = self
            .atom_name
            .chars()
            .skip_while(|c| c.is_ascii_digit())
            .take_while(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_uppercase();
        if letters.starts_with("CL") || letters.starts_with("BR") {
            letters[..2].to_string()
        } else {
            letters.chars().take(1).collect()
        }
    }

    /// Returns whether this atom is a hydrogen (or deuterium).
    pub fn is_hydrogen(&self) -> bool {
        matches!(self.element().as_str(), "H" | "D")
    }
}

/// Normalizes the trailing element field by removing every non-alphabetic
/// character (e.g. `"O1-"` becomes `"O"`).
pub fn normalize_element_field(field: &str) -> String {
    field.chars().filter(|c| c.is_alphabetic()).collect()
}
