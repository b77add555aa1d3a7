use crate::core::models::atom::{AtomRecord, RecordType, normalize_element_field};
use crate::core::models::bonds::ConectRecord;
use nalgebra::Point3;
use std::io;
use thiserror::Error;
use tracing::trace;

/// How atom and connectivity fields are located on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Slice fields by their PDB column offsets. Records that are not
    /// column-aligned are retried as whitespace tokens.
    #[default]
    Columns,
    /// Split the line on whitespace and read fields by position.
    Whitespace,
}

/// The fixed-width layout used when atom lines are written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineLayout {
    /// The layout RING ligand files have always used: the x coordinate is 7
    /// columns wide, so every later field sits one column left of PDB v3.3.
    ///
    /// Output in this layout is not always readable again with
    /// [`ParseMode::Columns`]: a y or z value of -100 or below fills its whole
    /// field and runs into the previous number (`2.500-123.456`), and both the
    /// column and the whitespace parse reject the record. Use
    /// [`LineLayout::Standard`] when the output is fed back into a pass.
    #[default]
    Compact,
    /// PDB v3.3 column offsets (x coordinate 8 columns wide).
    Standard,
}

/// The kind of record a line holds, judged by its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Atom(RecordType),
    Conect,
    Other,
}

/// Classifies a line by its leading keyword.
pub fn classify_line(line: &str) -> LineKind {
    if line.starts_with("HETATM") {
        LineKind::Atom(RecordType::Hetatm)
    } else if line.starts_with("ATOM") {
        LineKind::Atom(RecordType::Atom)
    } else if line.starts_with("CONECT") {
        LineKind::Conect
    } else {
        LineKind::Other
    }
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in {field} (value: '{value}')")]
    InvalidInt { field: String, value: String },
    #[error("Invalid float format in {field} (value: '{value}')")]
    InvalidFloat { field: String, value: String },
    #[error("Required field in {field} is empty")]
    MissingRequiredField { field: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least {min} chars)")]
    LineTooShort { min: usize },
    #[error("Record has {found} whitespace-separated fields, at least {required} are required")]
    TooFewTokens { found: usize, required: usize },
    #[error("CONECT record has no atom serial")]
    MissingConectNode,
}

const MIN_ATOM_LINE_LEN: usize = 54;
const MIN_ATOM_TOKENS: usize = 11;
const CONECT_FIELD_WIDTH: usize = 5;

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

fn columns(start: usize, end: usize) -> String {
    format!("columns {}-{}", start + 1, end)
}

fn token(index: usize) -> String {
    format!("field {}", index + 1)
}

fn parse_int<T: std::str::FromStr>(value: &str, field: String) -> Result<T, PdbParseErrorKind> {
    if value.is_empty() {
        return Err(PdbParseErrorKind::MissingRequiredField { field });
    }
    value.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
        field,
        value: value.to_string(),
    })
}

fn parse_float(value: &str, field: String) -> Result<f64, PdbParseErrorKind> {
    if value.is_empty() {
        return Err(PdbParseErrorKind::MissingRequiredField { field });
    }
    value.parse().map_err(|_| PdbParseErrorKind::InvalidFloat {
        field,
        value: value.to_string(),
    })
}

fn parse_float_or(value: &str, field: String, default: f64) -> Result<f64, PdbParseErrorKind> {
    if value.is_empty() {
        Ok(default)
    } else {
        parse_float(value, field)
    }
}

fn required(value: &str, field: String) -> Result<&str, PdbParseErrorKind> {
    if value.is_empty() {
        Err(PdbParseErrorKind::MissingRequiredField { field })
    } else {
        Ok(value)
    }
}

/// Parses one `ATOM`/`HETATM` line.
///
/// `line_num` is 1-based and only used for error reporting.
pub fn parse_atom_line(
    line: &str,
    line_num: usize,
    record_type: RecordType,
    mode: ParseMode,
) -> Result<AtomRecord, PdbError> {
    let result = match mode {
        ParseMode::Columns => parse_atom_columns(line, record_type).or_else(|column_err| {
            trace!(
                line = line_num,
                "Column parse failed ({}), retrying as whitespace fields.",
                column_err
            );
            parse_atom_tokens(line, record_type).map_err(|_| column_err)
        }),
        ParseMode::Whitespace => parse_atom_tokens(line, record_type),
    };
    result.map_err(|kind| PdbError::Parse {
        line: line_num,
        kind,
    })
}

fn parse_atom_columns(
    line: &str,
    record_type: RecordType,
) -> Result<AtomRecord, PdbParseErrorKind> {
    if line.len() < MIN_ATOM_LINE_LEN {
        return Err(PdbParseErrorKind::LineTooShort {
            min: MIN_ATOM_LINE_LEN,
        });
    }

    let serial = parse_int(slice_and_trim(line, 6, 11), columns(6, 11))?;
    let atom_name = required(slice_and_trim(line, 12, 16), columns(12, 16))?;
    let residue_name = required(slice_and_trim(line, 17, 20), columns(17, 20))?;
    let chain_id = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');
    let residue_seq = parse_int(slice_and_trim(line, 22, 26), columns(22, 26))?;
    let x = parse_float(slice_and_trim(line, 30, 38), columns(30, 38))?;
    let y = parse_float(slice_and_trim(line, 38, 46), columns(38, 46))?;
    let z = parse_float(slice_and_trim(line, 46, 54), columns(46, 54))?;
    let occupancy = parse_float_or(slice_and_trim(line, 54, 60), columns(54, 60), 1.0)?;
    let temp_factor = parse_float_or(slice_and_trim(line, 60, 66), columns(60, 66), 0.0)?;
    let element_symbol = normalize_element_field(slice_and_trim(line, 76, 80));

    Ok(AtomRecord {
        record_type,
        serial,
        atom_name: atom_name.to_string(),
        residue_name: residue_name.to_string(),
        chain_id,
        residue_seq,
        position: Point3::new(x, y, z),
        occupancy,
        temp_factor,
        element_symbol,
    })
}

fn parse_atom_tokens(line: &str, record_type: RecordType) -> Result<AtomRecord, PdbParseErrorKind> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_ATOM_TOKENS {
        return Err(PdbParseErrorKind::TooFewTokens {
            found: parts.len(),
            required: MIN_ATOM_TOKENS,
        });
    }

    let serial = parse_int(parts[1], token(1))?;
    let chain_id = parts[4].chars().next().unwrap_or(' ');
    let residue_seq = parse_int(parts[5], token(5))?;
    let x = parse_float(parts[6], token(6))?;
    let y = parse_float(parts[7], token(7))?;
    let z = parse_float(parts[8], token(8))?;
    let occupancy = parse_float(parts[9], token(9))?;
    let temp_factor = parse_float(parts[10], token(10))?;
    let element_symbol = if parts.len() > MIN_ATOM_TOKENS {
        parts.last().map(|s| normalize_element_field(s)).unwrap_or_default()
    } else {
        String::new()
    };

    Ok(AtomRecord {
        record_type,
        serial,
        atom_name: parts[2].to_string(),
        residue_name: parts[3].to_string(),
        chain_id,
        residue_seq,
        position: Point3::new(x, y, z),
        occupancy,
        temp_factor,
        element_symbol,
    })
}

/// Parses one `CONECT` line into its node and partner serials.
pub fn parse_conect_line(
    line: &str,
    line_num: usize,
    mode: ParseMode,
) -> Result<ConectRecord, PdbError> {
    let result = match mode {
        ParseMode::Columns => parse_conect_columns(line).or_else(|column_err| {
            trace!(
                line = line_num,
                "Column parse failed ({}), retrying as whitespace fields.",
                column_err
            );
            parse_conect_tokens(line).map_err(|_| column_err)
        }),
        ParseMode::Whitespace => parse_conect_tokens(line),
    };
    result.map_err(|kind| PdbError::Parse {
        line: line_num,
        kind,
    })
}

fn parse_conect_columns(line: &str) -> Result<ConectRecord, PdbParseErrorKind> {
    let node_str = slice_and_trim(line, 6, 6 + CONECT_FIELD_WIDTH);
    if node_str.is_empty() {
        return Err(PdbParseErrorKind::MissingConectNode);
    }
    let node = parse_int(node_str, columns(6, 6 + CONECT_FIELD_WIDTH))?;

    let mut partners = Vec::new();
    let mut start = 6 + CONECT_FIELD_WIDTH;
    while start < line.len() {
        let end = start + CONECT_FIELD_WIDTH;
        let value = slice_and_trim(line, start, end);
        if !value.is_empty() {
            partners.push(parse_int(value, columns(start, end))?);
        }
        start = end;
    }
    Ok(ConectRecord::new(node, partners))
}

fn parse_conect_tokens(line: &str) -> Result<ConectRecord, PdbParseErrorKind> {
    let mut parts = line.split_whitespace().enumerate().skip(1);
    let (_, node_str) = parts.next().ok_or(PdbParseErrorKind::MissingConectNode)?;
    let node = parse_int(node_str, token(1))?;
    let partners = parts
        .map(|(i, value)| parse_int(value, token(i)))
        .collect::<Result<Vec<u32>, _>>()?;
    Ok(ConectRecord::new(node, partners))
}

/// Formats an atom record as a fixed-width line (without a line terminator).
pub fn format_atom_line(atom: &AtomRecord, layout: LineLayout) -> String {
    let x_width = match layout {
        LineLayout::Compact => 7,
        LineLayout::Standard => 8,
    };
    format!(
        "{:<6}{:>5} {:<4}{:>4} {:1}{:>4}    {:>xw$.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        atom.record_type,
        atom.serial,
        atom.atom_name,
        atom.residue_name,
        atom.chain_id,
        atom.residue_seq,
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.occupancy,
        atom.temp_factor,
        atom.element_symbol,
        xw = x_width,
    )
}
