//! # PPInterface Core Library
//!
//! Geometric analysis of protein-protein interfaces in PDB structures: which
//! residues of two chains come within a distance cutoff of each other, the
//! interface as a standalone structure, and simple rule-based mutation
//! suggestions for the residues found there.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`), the PDB
//!   reader and writer, element masses, geometry helpers and the mutation table.
//!
//! - **[`engine`]: The Queries.** Contact detection between chains and chain
//!   centers of mass, with validated configuration and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete interface analyses, CSV export
//!   and visualization hints for external viewers.
//!
//! ## Example
//!
//! ```no_run
//! use ppinterface::core::io::pdb::PdbFile;
//! use ppinterface::core::io::traits::StructureFile;
//! use ppinterface::engine::tasks::contacts::find_contacts;
//!
//! let (structure, _metadata) = PdbFile::read_from_path("complex.pdb")?;
//! for key in find_contacts(&structure, 'H', 'A', 5.0)? {
//!     println!("{key}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
