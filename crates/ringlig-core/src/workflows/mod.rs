//! # Workflows Module
//!
//! High-level entry points that tie the `engine` and `core` layers together.
//!
//! - **Correction Workflow** ([`correct`]) - Rewrites a ligand PDB file and
//!   writes the RING annotation files next to it.

pub mod correct;
