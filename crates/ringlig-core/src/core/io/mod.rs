//! Provides input/output functionality for the files a correction pass reads
//! and writes.
//!
//! [`pdb`] parses and formats individual PDB records, [`annotations`] holds the
//! RING annotation file formats, and [`traits`] the interface they share.

pub mod annotations;
pub mod pdb;
pub mod traits;
