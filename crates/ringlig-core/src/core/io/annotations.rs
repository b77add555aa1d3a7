use super::traits::AnnotationFile;
use crate::core::features::HBondFeatures;
use std::io::{self, Write};

/// Bond records translated to renamed atom names, as read by RING.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingConnections {
    pub compound_code: String,
    pub records: Vec<Vec<String>>,
}

/// Hydrogen-bond acceptor and donor atom names of one compound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HBondAnnotation {
    pub compound_code: String,
    pub features: HBondFeatures,
}

/// `<CODE>_connections_for_ring.txt`: the compound code on the first line,
/// then one line of space-separated atom names per bond record.
pub struct ConnectionsFile;

impl AnnotationFile for ConnectionsFile {
    type Content = RingConnections;
    const SUFFIX: &'static str = "_connections_for_ring.txt";

    fn write_to(content: &Self::Content, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "{}", content.compound_code)?;
        for names in &content.records {
            writeln!(writer, "{}", names.join(" "))?;
        }
        Ok(())
    }
}

/// `<CODE>_acc_and_dons.txt`: a `# <CODE>` header, an `A:` line and a `D:`
/// line. The donor line has no trailing newline.
pub struct AccDonsFile;

impl AnnotationFile for AccDonsFile {
    type Content = HBondAnnotation;
    const SUFFIX: &'static str = "_acc_and_dons.txt";

    fn write_to(content: &Self::Content, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "# {}", content.compound_code)?;
        writeln!(writer, "A:{}", content.features.acceptors.join(" "))?;
        write!(writer, "D:{}", content.features.donors.join(" "))
    }
}

/// `<CODE>_correct_names.pdb`: the rewritten structure. It is streamed by the
/// workflow rather than serialized from memory, so only the name is shared.
pub fn corrected_pdb_file_name(compound_code: &str) -> String {
    format!("{}_correct_names.pdb", compound_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn connections_file_writes_header_and_one_line_per_record() {
        let content = RingConnections {
            compound_code: "LIG".to_string(),
            records: vec![names(&["C1", "C2", "O3"]), names(&["C2", "N4"])],
        };
        let mut buffer = Vec::new();
        ConnectionsFile::write_to(&content, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "LIG\nC1 C2 O3\nC2 N4\n");
    }

    #[test]
    fn connections_file_with_no_records_only_has_header() {
        let content = RingConnections {
            compound_code: "abc".to_string(),
            records: Vec::new(),
        };
        let mut buffer = Vec::new();
        ConnectionsFile::write_to(&content, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "abc\n");
    }

    #[test]
    fn acc_dons_file_matches_ring_format() {
        let content = HBondAnnotation {
            compound_code: "LIG".to_string(),
            features: HBondFeatures {
                acceptors: names(&["O1", "N3"]),
                donors: names(&["N3"]),
            },
        };
        let mut buffer = Vec::new();
        AccDonsFile::write_to(&content, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "# LIG\nA:O1 N3\nD:N3");
    }

    #[test]
    fn file_names_derive_from_compound_code() {
        assert_eq!(ConnectionsFile::file_name("LIG"), "LIG_connections_for_ring.txt");
        assert_eq!(AccDonsFile::file_name("LIG"), "LIG_acc_and_dons.txt");
        assert_eq!(corrected_pdb_file_name("LIG"), "LIG_correct_names.pdb");
    }

    #[test]
    fn write_to_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ConnectionsFile::file_name("LIG"));
        let content = RingConnections {
            compound_code: "LIG".to_string(),
            records: vec![names(&["C1", "C2"])],
        };
        ConnectionsFile::write_to_path(&content, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "LIG\nC1 C2\n");
    }
}
