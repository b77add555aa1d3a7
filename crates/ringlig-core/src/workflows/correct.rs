use crate::core::features::{FeatureClassifier, HBondFeatures, StructureView};
use crate::core::io::annotations::{
    AccDonsFile, ConnectionsFile, HBondAnnotation, RingConnections, corrected_pdb_file_name,
};
use crate::core::io::pdb::{self, LineKind, PdbError};
use crate::core::io::traits::AnnotationFile;
use crate::core::models::atom::AtomRecord;
use crate::core::models::bonds::ReducedBondList;
use crate::core::models::rename::AtomRenameMap;
use crate::engine::config::CorrectionConfig;
use crate::engine::error::CorrectionError;
use crate::engine::reducer::ConnectivityReducer;
use crate::engine::rewriter::AtomRewriter;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Everything one pass over the input produced.
#[derive(Debug, Clone, Default)]
pub struct PassOutput {
    pub names: AtomRenameMap,
    /// The reduced bond list; `None` when connection output was not requested.
    pub reduced: Option<ReducedBondList>,
    /// Rewritten atom records, kept only when features are requested.
    pub atoms: Vec<AtomRecord>,
    /// Every `CONECT` bond as a `(low, high)` pair, kept only when features
    /// are requested.
    pub bonds: Vec<(u32, u32)>,
    pub atoms_written: usize,
    pub conect_lines: usize,
}

#[derive(Debug, Clone)]
pub struct CorrectionReport {
    pub corrected_pdb: PathBuf,
    pub connections: Option<PathBuf>,
    pub acc_dons: Option<PathBuf>,
    pub atoms_written: usize,
    pub atoms_renamed: usize,
    pub conect_lines: usize,
    pub bond_records: usize,
    pub features: Option<HBondFeatures>,
}

/// Streams one PDB file through the rewriter and the reducer.
///
/// Atom lines are rewritten, `CONECT` lines are echoed verbatim and every
/// other line is dropped.
pub fn process<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &CorrectionConfig,
) -> Result<PassOutput, CorrectionError> {
    let keep_structure = config.output.acc_dons;
    let mut rewriter = AtomRewriter::new(&config.rename);
    let mut reducer = config
        .output
        .connections
        .then(|| ConnectivityReducer::new(config.dangling_policy));
    let mut output = PassOutput::default();
    let mut bonds = BTreeSet::new();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res.map_err(PdbError::Io)?;
        let line_num = line_num + 1;

        match pdb::classify_line(&line) {
            LineKind::Atom(record_type) => {
                let mut atom =
                    pdb::parse_atom_line(&line, line_num, record_type, config.parse_mode)?;
                rewriter.rewrite(&mut atom);
                writeln!(writer, "{}", pdb::format_atom_line(&atom, config.output.layout))
                    .map_err(PdbError::Io)?;
                output.atoms_written += 1;
                if keep_structure {
                    output.atoms.push(atom);
                }
            }
            LineKind::Conect => {
                writeln!(writer, "{}", line).map_err(PdbError::Io)?;
                output.conect_lines += 1;

                let record = pdb::parse_conect_line(&line, line_num, config.parse_mode)?;
                if let Some(reducer) = reducer.as_mut() {
                    reducer.reduce(&record, rewriter.names(), line_num)?;
                }
                if keep_structure {
                    bonds.extend(record.bond_pairs());
                }
            }
            LineKind::Other => {}
        }
    }

    output.names = rewriter.into_names();
    output.reduced = reducer.map(ConnectivityReducer::into_bonds);
    output.bonds = bonds.into_iter().collect();
    Ok(output)
}

fn ensure_output_dir(dir: &Path) -> Result<(), CorrectionError> {
    if dir.is_dir() {
        info!("Output directory {:?} already exists.", dir);
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| CorrectionError::io(dir, e))?;
    debug!("Created output directory {:?}.", dir);
    Ok(())
}

/// Runs a complete correction: rewrites the input into
/// `<CODE>_correct_names.pdb` and writes the requested annotation files.
#[instrument(
    skip_all,
    name = "correction_workflow",
    fields(compound = %config.rename.compound_code)
)]
pub fn run(
    config: &CorrectionConfig,
    classifier: &dyn FeatureClassifier,
) -> Result<CorrectionReport, CorrectionError> {
    let code = &config.rename.compound_code;
    let input = File::open(&config.input_path)
        .map_err(|e| CorrectionError::io(&config.input_path, e))?;

    ensure_output_dir(&config.output.directory)?;

    let corrected_pdb = config.output.directory.join(corrected_pdb_file_name(code));
    info!("Writing corrected structure to {:?}", corrected_pdb);
    let file = File::create(&corrected_pdb).map_err(|e| CorrectionError::io(&corrected_pdb, e))?;
    let mut writer = BufWriter::new(file);
    let pass = process(BufReader::new(input), &mut writer, config)?;
    writer
        .flush()
        .map_err(|e| CorrectionError::io(&corrected_pdb, e))?;

    info!(
        "Rewrote {} atom line(s), renamed {} atom(s), echoed {} CONECT line(s).",
        pass.atoms_written,
        pass.names.len(),
        pass.conect_lines
    );

    let mut report = CorrectionReport {
        corrected_pdb,
        connections: None,
        acc_dons: None,
        atoms_written: pass.atoms_written,
        atoms_renamed: pass.names.len(),
        conect_lines: pass.conect_lines,
        bond_records: 0,
        features: None,
    };

    if let Some(reduced) = &pass.reduced {
        let records = reduced
            .translate(&pass.names)
            .map_err(CorrectionError::UnresolvedSerial)?;
        let path = config.output.directory.join(ConnectionsFile::file_name(code));
        info!("Writing {} bond record(s) to {:?}", records.len(), path);
        report.bond_records = records.len();
        let content = RingConnections {
            compound_code: code.clone(),
            records,
        };
        ConnectionsFile::write_to_path(&content, &path).map_err(|e| CorrectionError::io(&path, e))?;
        report.connections = Some(path);
    }

    if config.output.acc_dons {
        let residue_name = config.rename.residue_name();
        let view = StructureView {
            atoms: &pass.atoms,
            bonds: &pass.bonds,
            residue_name: &residue_name,
        };
        let features = classifier.classify(&view)?;
        let path = config.output.directory.join(AccDonsFile::file_name(code));
        info!(
            "Writing {} acceptor(s) and {} donor(s) to {:?}",
            features.acceptors.len(),
            features.donors.len(),
            path
        );
        let content = HBondAnnotation {
            compound_code: code.clone(),
            features,
        };
        AccDonsFile::write_to_path(&content, &path).map_err(|e| CorrectionError::io(&path, e))?;
        report.acc_dons = Some(path);
        report.features = Some(content.features);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::rules::RuleBasedClassifier;
    use crate::core::features::ClassificationError;
    use crate::core::io::pdb::ParseMode;
    use crate::engine::config::{ChainScope, CorrectionConfigBuilder, DanglingPolicy};
    use std::collections::HashSet;

    const LIGAND_PDB: &str = "\
COMPND    UNNAMED
HETATM    1  C7  UNL X   1       0.000   0.000   0.000  1.00  0.00           C
HETATM    2  O9  UNL X   1       1.230   0.000   0.000  1.00  0.00           O
HETATM    3  N4  UNL X   1      -0.670   1.160   0.000  1.00  0.00           N
HETATM    4  H2  UNL X   1      -1.680   1.160   0.000  1.00  0.00           H
HETATM    5  H8  UNL X   1      -0.170   2.030   0.000  1.00  0.00           H
HETATM    6  C3  UNL X   1      -0.750  -1.300   0.000  1.00  0.00           C
CONECT    1    2    3    6
CONECT    2    1
CONECT    3    1    4    5
CONECT    4    3
CONECT    5    3
CONECT    6    1
END
";

    const COMPLEX_PDB: &str = "\
ATOM      1  N   ALA B   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA B   1      11.639   6.071  -5.147  1.00  0.00           C
HETATM    3  C1  UNL X   2       1.000   1.000   1.000  1.00  0.00           C
HETATM    4  O2  UNL X   2       2.200   1.000   1.000  1.00  0.00           O
CONECT    2    3
CONECT    3    2    4
CONECT    4    3
";

    fn builder(code: &str) -> CorrectionConfigBuilder {
        CorrectionConfigBuilder::new()
            .input_path("unused.pdb")
            .compound_code(code)
    }

    fn run_process(input: &str, config: &CorrectionConfig) -> (String, PassOutput) {
        let mut out = Vec::new();
        let pass = process(input.as_bytes(), &mut out, config).unwrap();
        (String::from_utf8(out).unwrap(), pass)
    }

    #[test]
    fn process_renames_ligand_and_echoes_conect_lines() {
        let config = builder("LIG").build().unwrap();
        let (text, pass) = run_process(LIGAND_PDB, &config);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 12);
        assert_eq!(
            lines[0],
            "HETATM    1 C1   LIG A   1      0.000   0.000   0.000  1.00  0.00           C"
        );
        assert!(lines[1].starts_with("HETATM    2 O2   LIG A"));
        assert!(lines[5].starts_with("HETATM    6 C6   LIG A"));
        assert_eq!(lines[6], "CONECT    1    2    3    6");
        assert_eq!(lines[11], "CONECT    6    1");
        assert!(!text.contains("COMPND"));
        assert!(!text.contains("END"));

        assert_eq!(pass.atoms_written, 6);
        assert_eq!(pass.conect_lines, 6);
        assert_eq!(pass.names.len(), 6);
        assert!(pass.reduced.is_none());
        assert!(pass.atoms.is_empty());
    }

    #[test]
    fn renamed_suffixes_start_at_one_and_increase() {
        let config = builder("LIG").build().unwrap();
        let (text, _) = run_process(LIGAND_PDB, &config);

        let suffixes: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with("HETATM"))
            .map(|l| l[12..16].trim()[1..].parse().unwrap())
            .collect();
        assert_eq!(suffixes, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn process_reduces_connectivity_when_requested() {
        let config = builder("LIG").connections(true).build().unwrap();
        let (_, pass) = run_process(LIGAND_PDB, &config);
        let reduced = pass.reduced.unwrap();

        let translated = reduced.translate(&pass.names).unwrap();
        assert_eq!(
            translated,
            vec![
                vec!["C1", "O2", "N3", "C6"],
                vec!["N3", "H4", "H5"],
            ]
        );

        let mut seen = HashSet::new();
        for record in reduced.records() {
            for &partner in &record.partners {
                assert!(record.node < partner);
                assert!(seen.insert((record.node, partner)));
            }
        }
    }

    #[test]
    fn process_keeps_protein_residue_names_and_unifies_chain() {
        let config = builder("LIG").build().unwrap();
        let (text, _) = run_process(COMPLEX_PDB, &config);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("ATOM      1 N    ALA A   1"));
        assert!(lines[1].starts_with("ATOM      2 CA   ALA A   1"));
        assert!(lines[2].starts_with("HETATM    3 C1   LIG A   2"));
        for line in lines.iter().filter(|l| !l.starts_with("CONECT")) {
            assert_eq!(&line[21..22], "A");
        }
    }

    #[test]
    fn ligand_chain_scope_keeps_protein_chain() {
        let config = builder("LIG")
            .chain_scope(ChainScope::Ligand)
            .chain_id("L")
            .build()
            .unwrap();
        let (text, _) = run_process(COMPLEX_PDB, &config);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[0][21..22], "B");
        assert_eq!(&lines[2][21..22], "L");
    }

    #[test]
    fn bonds_to_protein_atoms_are_dropped_by_serial_order() {
        let config = builder("LIG").connections(true).build().unwrap();
        let (_, pass) = run_process(COMPLEX_PDB, &config);
        let translated = pass.reduced.unwrap().translate(&pass.names).unwrap();
        assert_eq!(translated, vec![vec!["C1", "O2"]]);
    }

    #[test]
    fn dangling_partner_fails_the_pass_under_error_policy() {
        let input = "\
HETATM   10  C1  UNL X   1       0.000   0.000   0.000  1.00  0.00           C
CONECT   10   11   12
";
        let config = builder("LIG").connections(true).build().unwrap();
        let mut out = Vec::new();
        let result = process(input.as_bytes(), &mut out, &config);
        assert!(matches!(
            result,
            Err(CorrectionError::DanglingBond {
                line: 2,
                node: 10,
                partner: 11
            })
        ));
    }

    #[test]
    fn dangling_partners_are_dropped_under_skip_policy() {
        let input = "\
HETATM   10  C1  UNL X   1       0.000   0.000   0.000  1.00  0.00           C
CONECT   10   11   12
";
        let config = builder("LIG")
            .connections(true)
            .dangling_policy(DanglingPolicy::Skip)
            .build()
            .unwrap();
        let (_, pass) = run_process(input, &config);
        assert!(pass.reduced.unwrap().is_empty());
    }

    #[test]
    fn dangling_partner_is_ignored_without_connection_output() {
        let input = "\
HETATM   10  C1  UNL X   1       0.000   0.000   0.000  1.00  0.00           C
CONECT   10   11   12
";
        let config = builder("LIG").build().unwrap();
        let (text, pass) = run_process(input, &config);
        assert!(text.ends_with("CONECT   10   11   12\n"));
        assert!(pass.reduced.is_none());
    }

    #[test]
    fn malformed_atom_record_is_fatal() {
        let input = "HETATM   10  C1  UNL\n";
        let config = builder("LIG").build().unwrap();
        let mut out = Vec::new();
        let result = process(input.as_bytes(), &mut out, &config);
        assert!(matches!(
            result,
            Err(CorrectionError::Pdb(PdbError::Parse { line: 1, .. }))
        ));
    }

    #[test]
    fn malformed_conect_record_is_fatal_without_connection_output() {
        let input = "\
HETATM   10  C1  UNL X   1       0.000   0.000   0.000  1.00  0.00           C
CONECT   10   ab
";
        let config = builder("LIG").build().unwrap();
        let mut out = Vec::new();
        let result = process(input.as_bytes(), &mut out, &config);
        assert!(matches!(
            result,
            Err(CorrectionError::Pdb(PdbError::Parse { line: 2, .. }))
        ));
    }

    #[test]
    fn whitespace_mode_reads_legacy_records() {
        let input = "HETATM 10 C5 UNL X 1 -1.234 2.345 10.500 1.00 20.00 C\n";
        let config = builder("LIG")
            .parse_mode(ParseMode::Whitespace)
            .build()
            .unwrap();
        let (text, _) = run_process(input, &config);
        assert_eq!(
            text,
            "HETATM   10 C1   LIG A   1     -1.234   2.345  10.500  1.00 20.00           C\n"
        );
    }

    fn write_input(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("input.pdb");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn run_writes_all_requested_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), LIGAND_PDB);
        let outdir = dir.path().join("nested").join("out");
        let config = builder("LIG")
            .input_path(&input)
            .output_dir(&outdir)
            .connections(true)
            .acc_dons(true)
            .build()
            .unwrap();

        let report = run(&config, &RuleBasedClassifier::new()).unwrap();

        assert_eq!(report.corrected_pdb, outdir.join("LIG_correct_names.pdb"));
        assert!(report.corrected_pdb.exists());
        assert_eq!(report.atoms_written, 6);
        assert_eq!(report.atoms_renamed, 6);
        assert_eq!(report.conect_lines, 6);
        assert_eq!(report.bond_records, 2);

        let connections = fs::read_to_string(report.connections.unwrap()).unwrap();
        assert_eq!(connections, "LIG\nC1 O2 N3 C6\nN3 H4 H5\n");

        let acc_dons = fs::read_to_string(report.acc_dons.unwrap()).unwrap();
        assert_eq!(acc_dons, "# LIG\nA:O2\nD:N3");
    }

    #[test]
    fn run_only_writes_corrected_pdb_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), LIGAND_PDB);
        let config = builder("LIG")
            .input_path(&input)
            .output_dir(dir.path())
            .build()
            .unwrap();

        let report = run(&config, &RuleBasedClassifier::new()).unwrap();
        assert!(report.connections.is_none());
        assert!(report.acc_dons.is_none());
        assert!(!dir.path().join("LIG_connections_for_ring.txt").exists());
        assert!(!dir.path().join("LIG_acc_and_dons.txt").exists());
    }

    #[test]
    fn run_fails_before_writing_when_input_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("out");
        let config = builder("LIG")
            .input_path(dir.path().join("missing.pdb"))
            .output_dir(&outdir)
            .build()
            .unwrap();

        let result = run(&config, &RuleBasedClassifier::new());
        assert!(matches!(result, Err(CorrectionError::Io { .. })));
        assert!(!outdir.exists());
    }

    struct FixedClassifier;

    impl FeatureClassifier for FixedClassifier {
        fn classify(
            &self,
            structure: &StructureView<'_>,
        ) -> Result<HBondFeatures, ClassificationError> {
            if structure.residue_atoms().count() == 0 {
                return Err(ClassificationError::Failed("no atoms".to_string()));
            }
            Ok(HBondFeatures {
                acceptors: vec!["X1".to_string()],
                donors: Vec::new(),
            })
        }
    }

    #[test]
    fn run_serializes_custom_classifier_output_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), LIGAND_PDB);
        let config = builder("lig")
            .input_path(&input)
            .output_dir(dir.path())
            .acc_dons(true)
            .build()
            .unwrap();

        let report = run(&config, &FixedClassifier).unwrap();
        let acc_dons = fs::read_to_string(dir.path().join("lig_acc_and_dons.txt")).unwrap();
        assert_eq!(acc_dons, "# lig\nA:X1\nD:");
        assert_eq!(report.features.unwrap().acceptors, vec!["X1"]);
    }

    #[test]
    fn classifier_errors_are_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), COMPLEX_PDB);
        let config = builder("LIG")
            .input_path(&input)
            .output_dir(dir.path())
            .replace_name("XYZ")
            .acc_dons(true)
            .build()
            .unwrap();

        let result = run(&config, &FixedClassifier);
        assert!(matches!(result, Err(CorrectionError::Classification(_))));
    }
}
