//! Shared test utilities for the Vault HTTP core crates.
//!
//! This crate provides:
//! - Proptest generators for JSON value trees
//! - Scripted operations for exercising the retry executor
//! - Test fixtures with sample Vault payloads

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
