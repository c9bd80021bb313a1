//! # hydrostruct Core Library
//!
//! Imports legacy hydraulic-structure records (structure locations, structure definitions,
//! location-to-definition mappings and compound groupings) into a typed composite structure
//! model attached to the branches of a hydraulic network.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models: the live [`Network`](core::models::network::Network)
//!   arena, the typed structure instances and weir formulas, the flat legacy records, and the
//!   small hydraulic lookups (flow directions, cross-section shapes, friction types).
//!
//! - **[`engine`]: The Logic Core.** Reference resolution, the per-family structure builders,
//!   the formula factory, friction and geometry policies, composite composition and the
//!   identity-preserving merge into an existing model.
//!
//! - **[`workflows`]: The Public API.** [`StructureImporter`](workflows::import::StructureImporter)
//!   drives one complete import pass over a network.

pub mod core;
pub mod engine;
pub mod workflows;
