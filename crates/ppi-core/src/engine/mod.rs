//! # Engine Module
//!
//! Geometric queries over a loaded [`Structure`](crate::core::models::structure::Structure):
//! inter-chain contact detection and per-chain centers of mass.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Contact cutoff, search strategy and interface settings
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//! - **Tasks** ([`tasks`]) - The individual computations
//!
//! Every task borrows the structure immutably. With the `parallel` feature the
//! contact scan is spread across the rayon thread pool without changing its result.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
