//! # QBase Domain
//!
//! Domain types shared by every QBase crate.
//!
//! This crate contains:
//! - The `QuickBaseError` type and `Result` alias
//! - Client configuration structures
//! - Protocol constants (root database id, default realm, header names)
//! - Decoded result types returned by the QuickBase actions
//!
//! ## Architecture
//! - No dependencies on other QBase crates
//! - No I/O, only data and pure helpers

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
