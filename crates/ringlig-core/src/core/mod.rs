//! # Core Module
//!
//! Stateless building blocks of a correction pass.
//!
//! - **Record Representation** ([`models`]) - Atom records, the rename map and bond lists
//! - **File I/O** ([`io`]) - PDB record parsing/formatting and RING annotation files
//! - **Chemistry** ([`features`]) - Hydrogen-bond donor/acceptor classification
//! - **Utilities** ([`utils`]) - Element data

pub mod features;
pub mod io;
pub mod models;
pub mod utils;
