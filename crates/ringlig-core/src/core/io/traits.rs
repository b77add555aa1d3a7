use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for the plain-text annotation files written next to
/// the corrected structure.
///
/// Implementors only describe how their content is serialized; creating and
/// flushing the file on disk is shared.
pub trait AnnotationFile {
    /// The in-memory content this file serializes.
    type Content;

    /// The file name suffix appended to the compound code
    /// (e.g. `"_connections_for_ring.txt"`).
    const SUFFIX: &'static str;

    /// Writes `content` to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    fn write_to(content: &Self::Content, writer: &mut impl Write) -> io::Result<()>;

    /// Returns the file name for a compound code.
    fn file_name(compound_code: &str) -> String {
        format!("{}{}", compound_code, Self::SUFFIX)
    }

    /// Creates the file at `path` and writes `content` to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(content: &Self::Content, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(content, &mut writer)?;
        writer.flush()
    }
}
