//! # Core Models Module
//!
//! This module contains the data structures used to represent molecular
//! structures: atoms, residues, chains and the structure that owns them.
//!
//! ## Overview
//!
//! Ownership flows strictly from the [`structure::Structure`] down to its
//! chains, residues and atoms. Every level is stored in a slot-map arena and
//! children refer to their parents through typed keys ([`ids`]), never through
//! shared ownership. Residues are identified across the public API by a
//! [`ids::ResidueKey`], the pair of chain identifier and residue number.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with element, mass and coordinates
//! - [`residue`] - Named, numbered residue holding an ordered atom list
//! - [`chain`] - Single-character chain holding an ordered residue list
//! - [`structure`] - Complete structure with lookup maps and subset extraction
//! - [`builder`] - Incremental construction used by file readers
//! - [`ids`] - Arena keys and the `ResidueKey` identity
//!
//! ## Usage
//!
//! ```ignore
//! use ppinterface::core::models::{atom::Atom, structure::Structure};
//!
//! let mut structure = Structure::new("1ABC");
//! let chain_id = structure.add_chain('A');
//! let residue_id = structure.add_residue(chain_id, 1, "ALA", false).unwrap();
//!
//! let atom = Atom::new(1, "CA", "C", residue_id, Point3::new(0.0, 0.0, 0.0));
//! structure.add_atom_to_residue(residue_id, atom);
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod structure;
