//! # Engine Module
//!
//! The stateful layer of a correction pass: the validated configuration, the
//! atom-record rewriter that owns the rename map, and the connectivity reducer
//! that turns `CONECT` records into the RING bond list.
//!
//! - [`config`] - `CorrectionConfig` and its validating builder
//! - [`rewriter`] - Atom renaming and chain reassignment
//! - [`reducer`] - One-direction, deduplicated bond reduction
//! - [`error`] - The error type shared by the engine and workflows

pub mod config;
pub mod error;
pub mod reducer;
pub mod rewriter;
