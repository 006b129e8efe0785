//! # Utilities Module
//!
//! ## Role
//! Cross-cutting helpers that don't belong in domain-specific modules.
//!
//! ## Sub-modules
//! - `threading`: Rayon thread pool configuration
//! - `workspace`: Double-buffered pruned vectors reused across columns

pub mod threading;
pub mod workspace;
