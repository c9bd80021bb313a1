//! # Workflows Module
//!
//! High-level entry points that drive a complete import pass over a live network.
//!
//! ## Architecture
//!
//! - **Structure Import** ([`import`]) - Resolves every structure location, places a composite
//!   for it on its branch and merges the built structures into the network. Running the same
//!   importer again against the structures it produced updates them in place.

pub mod import;
