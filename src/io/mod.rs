//! # I/O Module
//!
//! File reading/writing boundaries. Converts between the column text format
//! and in-memory [`Column`](columns::Column) values. The kernel never touches
//! files itself.

pub mod columns;

pub use columns::{Column, ColumnReader, DistributionWriter};
