//! # Core Module
//!
//! Stateless building blocks of the library: the structure data model, file
//! I/O, geometric utilities and the mutation rule table.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Atoms, residues, chains and structures
//! - **File I/O** ([`io`]) - PDB reading and writing over a shared column layout
//! - **Utilities** ([`utils`]) - Element masses, distances, centers of mass
//! - **Mutation Rules** ([`mutation`]) - Residue-class lookup for substitution suggestions
//!
//! Nothing in this module performs network or subprocess I/O; file access is
//! confined to the path helpers of [`io::traits::StructureFile`].

pub mod io;
pub mod models;
pub mod mutation;
pub mod utils;
