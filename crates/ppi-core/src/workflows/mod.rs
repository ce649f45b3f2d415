//! # Workflows Module
//!
//! End-to-end procedures built from the [`engine`](crate::engine) tasks and
//! the [`core`](crate::core) data model.
//!
//! - **Interface Analysis** ([`interface`]) - Contact detection, interface extraction and
//!   mutation suggestions in one call
//! - **Visualization Hints** ([`visualization`]) - Chain palettes, residue selectors and
//!   viewer script text
//! - **Report Export** ([`report`]) - CSV tables of residues, contact pairs and suggestions

pub mod interface;
pub mod report;
pub mod visualization;
