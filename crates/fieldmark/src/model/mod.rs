//! Core data types: identifiers, action contexts, and per-unit
//! resolution state.

pub mod action;
pub mod id;
pub mod unit;

pub use action::{ActionContext, ScopeConfig};
pub use id::{ActionId, ConceptId, SpatialUnitId, UnitId};
pub use unit::{RecordingUnit, ScopeKey, UnitIdInfo};
