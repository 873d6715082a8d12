//! Fieldmark: hierarchical identifier generation for archaeological
//! recording units.
//!
//! Every recording unit saved under an excavation action gets a unique,
//! human-readable identifier such as `CHA-309-01-EXC-STR-0007`, computed
//! from a per-action format template, an atomically incremented sequence
//! counter, and a per-action cache of label abbreviations.
//!
//! # Overview
//!
//! A template is literal text with placeholders:
//!
//! - `{NUM_UE:0000}` — the unit's sequence number, zero-padded to 4
//! - `{TYPE_UE}` — a 3-letter abbreviation of the unit's type label
//! - `{NUM_PARENT}` / `{TYPE_PARENT}` — the same for the parent unit
//! - `{NUM_USPATIAL}` — the associated spatial unit's numeric id
//! - `{ID_UA}` — the owning action's own full identifier
//!
//! Abbreviations derived from vocabulary labels can collide (`Strate`
//! and `Structure` both start with `STR`); the engine disambiguates by
//! appending a decimal suffix and remembers every assignment per
//! action, so an abbreviation is never silently reused for a different
//! concept.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fieldmark::store::{
//!     MemoryAbbreviationStore, MemoryCounterStore, MemoryHierarchyStore,
//!     MemoryLabelResolver, MemoryUnitInfoStore,
//! };
//! use fieldmark::{ActionContext, ConceptId, IdentifierEngine, RecordingUnit, ResolverRegistry};
//!
//! let labels = Arc::new(MemoryLabelResolver::new());
//! let abbreviations = Arc::new(MemoryAbbreviationStore::new());
//! let infos = Arc::new(MemoryUnitInfoStore::new());
//!
//! let registry = ResolverRegistry::standard(
//!     labels.clone(),
//!     abbreviations.clone(),
//!     infos.clone(),
//! );
//! let engine = IdentifierEngine::new(
//!     registry,
//!     Arc::new(MemoryCounterStore::new()),
//!     infos,
//!     Arc::new(MemoryHierarchyStore::new()),
//! );
//!
//! let mut action = ActionContext::new("EXC-2024");
//! action.format = Some("{TYPE_UE}-{NUM_UE:0000}".to_string());
//! action.lang = Some("fr".to_string());
//!
//! let structure = ConceptId::random();
//! labels.set_label(structure, "fr", "Structure");
//!
//! let mut unit = RecordingUnit::new();
//! unit.unit_type = Some(structure);
//!
//! let id = engine.generate_full_identifier(&action, &unit).unwrap();
//! assert_eq!(id, "STR-0001");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (action context, recording unit, scope keys)
//! - [`template`]: The `{CODE}` / `{CODE:SPEC}` template mini-language
//! - [`resolver`]: The six placeholder resolvers and their registry
//! - [`abbrev`]: Label abbreviation and collision handling
//! - [`engine`]: The top-level format engine
//! - [`store`]: Storage traits plus in-memory implementations
//! - [`error`]: Error types
//! - [`limits`]: Bounds on otherwise-unbounded work
//!
//! # Concurrency
//!
//! Counter draws are atomic per scope key: two concurrent saves under
//! the same action never observe the same sequence value. Abbreviation
//! claims go through an atomic insert, so a lost race reads as an
//! ordinary collision and resolves with a suffix.

pub mod abbrev;
pub mod engine;
pub mod error;
pub mod limits;
pub mod model;
pub mod resolver;
pub mod store;
pub mod template;

// Re-export commonly used types at crate root
pub use engine::IdentifierEngine;
pub use error::{GenerateError, StoreError, TemplateError};
pub use model::{
    ActionContext, ActionId, ConceptId, RecordingUnit, ScopeConfig, ScopeKey, SpatialUnitId,
    UnitId, UnitIdInfo,
};
pub use resolver::{PlaceholderResolver, ResolverRegistry};
pub use template::validate as validate_template;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
