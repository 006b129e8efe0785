//! # Pipeline Module
//!
//! High-level orchestration over many columns.
//! Coordinates workspaces, threading and kernel execution.

pub mod batch;

pub use batch::BatchPipeline;
