//! # Core Models Module
//!
//! Data structures for the records a correction pass reads and produces.
//!
//! - [`atom`] - `ATOM`/`HETATM` records and element normalization
//! - [`rename`] - The serial-to-new-name map built while rewriting the ligand
//! - [`bonds`] - `CONECT` records and the reduced, one-direction bond list

pub mod atom;
pub mod bonds;
pub mod rename;
