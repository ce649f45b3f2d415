//! Computational units operating on a read-only structure.
//!
//! - [`contacts`] finds residue pairs across two chains within a distance cutoff.
//! - [`center_of_mass`] computes mass-weighted centers of chains and residue selections.

pub mod center_of_mass;
pub mod contacts;
