use phf::{Map, phf_map};

/// Single-bond covalent radii in Angstroms, keyed by upper-case symbol.
static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.31, "D" => 0.31,
    "B" => 0.84, "C" => 0.76, "N" => 0.71, "O" => 0.66, "F" => 0.57,
    "SI" => 1.11, "P" => 1.07, "S" => 1.05, "CL" => 1.02,
    "SE" => 1.20, "BR" => 1.20, "I" => 1.39,
};

pub fn covalent_radius(element: &str) -> Option<f64> {
    COVALENT_RADII.get(element.trim().to_ascii_uppercase().as_str()).copied()
}

pub fn is_hydrogen(element: &str) -> bool {
    matches!(element.trim().to_ascii_uppercase().as_str(), "H" | "D")
}
