//! # Core Module
//!
//! Data models and pure lookups shared by the import engine.
//!
//! - **Models** ([`models`]) - The live network arena, structure instances, weir formulas and the
//!   flat legacy record types consumed by an import pass.
//! - **Hydraulics** ([`hydraulics`]) - Flow-direction codes, cross-section shapes and friction
//!   type conversions.

pub mod hydraulics;
pub mod models;
