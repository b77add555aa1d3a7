//! # ringlig Core Library
//!
//! Renames the atoms of a small-molecule PDB ligand and derives the annotation
//! files the RING plugin reads: a one-direction bond list keyed by the new atom
//! names and a hydrogen-bond acceptor/donor list.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Record models, PDB record parsing and
//!   formatting, the annotation file formats and donor/acceptor classification.
//!
//! - **[`engine`]: The Logic Core.** The validated configuration, the
//!   atom-record rewriter and the connectivity reducer.
//!
//! - **[`workflows`]: The Public API.** [`workflows::correct::run`] performs a
//!   complete correction pass and writes every requested output file.

pub mod core;
pub mod engine;
pub mod workflows;
