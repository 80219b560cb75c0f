//! Test utilities and helpers for the rangeweave crates.
//!
//! This crate provides:
//! - Base ranges with restricted traversal ([`ranges`])
//! - Ready-made derived ranges ([`adaptors`])
//! - A recording callback that can stop a push iteration at a chosen element
//!   ([`recorder`])
//! - Seeded random data generation ([`data_gen`])

pub mod adaptors;
pub mod data_gen;
pub mod ranges;
pub mod recorder;
