//! # Engine Module
//!
//! The import logic: everything between the flat legacy records and the live network.
//!
//! ## Architecture
//!
//! - **Resolution** ([`resolver`]) - Indexes the record sets and validates that a location's
//!   mapping, compound group and definitions all exist.
//! - **Construction** ([`builders`], [`formula`]) - Turns one definition into zero or more typed
//!   structures through a dispatch over structure families.
//! - **Policies** ([`friction`], [`geometry`]) - Friction defaults, chainage clamping and the
//!   weir lateral offset heuristic.
//! - **Composition** ([`composer`], [`merger`]) - Creates composites on branches and merges
//!   produced structures into the existing model without breaking their identity.
//! - **Ambient** ([`config`], [`error`], [`report`]) - Policy constants, fatal errors and the
//!   warn/error/debug message contract.

pub mod builders;
pub mod composer;
pub mod config;
pub mod error;
pub mod formula;
pub mod friction;
pub mod geometry;
pub mod merger;
pub mod report;
pub mod resolver;
