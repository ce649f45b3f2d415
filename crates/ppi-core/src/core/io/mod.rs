//! Provides input/output functionality for molecular structure files.
//!
//! The PDB reader and writer share a single table of fixed-width column
//! ranges ([`columns`]) and are exposed through the format-independent
//! [`traits::StructureFile`] interface.

pub mod columns;
pub mod pdb;
pub mod traits;
