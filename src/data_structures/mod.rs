//! Engine data structures: placement records, assets, groupings and terrain.
//!
//! This module contains the core data types for level representation:
//!
//! - `placement` holds the typed placement node, its decode step and transforms
//! - `asset` contains templates, instances and per-instance material overrides
//! - `object_table` groups resolved instances by type for the hierarchy view
//! - `terrain` is the streamed terrain chunk model
//! - `collision` is the static collision mesh set of one area

pub mod asset;
pub mod collision;
pub mod object_table;
pub mod placement;
pub mod terrain;
