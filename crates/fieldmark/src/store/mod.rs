//! Storage and collaborator seams.
//!
//! The engine only ever talks to these traits; the surrounding
//! application binds them to its persistence layer. The [`memory`]
//! implementations back the tests and are usable by embedders that do
//! not need durability.

use crate::error::StoreError;
use crate::model::{ActionId, ConceptId, RecordingUnit, ScopeKey, UnitId, UnitIdInfo};

mod memory;

pub use memory::{
    MemoryAbbreviationStore, MemoryCounterStore, MemoryHierarchyStore, MemoryLabelResolver,
    MemoryUnitInfoStore,
};

/// Per-scope sequence counters.
pub trait CounterStore: Send + Sync {
    /// Atomically increments the counter for `scope` and returns the new
    /// value.
    ///
    /// A scope seen for the first time is created transparently; its
    /// first returned value is [`crate::limits::FIRST_COUNTER_VALUE`].
    /// No two callers ever observe the same value for one scope. The
    /// store knows nothing about ranges; bounds are the engine's job.
    fn next_value(&self, scope: &ScopeKey) -> Result<i64, StoreError>;
}

/// Outcome of an atomic abbreviation insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The abbreviation was free and is now owned by the given concept.
    Inserted,
    /// The abbreviation already belongs to that same concept.
    AlreadyOwn,
    /// The abbreviation belongs to a different concept.
    TakenByOther,
}

/// Per-action cache of generated abbreviations.
///
/// Entries record "within action X, abbreviation S was generated from
/// concept C". At most one entry exists per (action, abbreviation);
/// entries are never updated, only read to detect later collisions.
pub trait AbbreviationStore: Send + Sync {
    /// Concept owning `abbrev` under `action`, if any.
    fn find(&self, action: ActionId, abbrev: &str) -> Result<Option<ConceptId>, StoreError>;

    /// Claims `abbrev` for `concept` under `action`.
    ///
    /// Must be atomic with respect to concurrent claims of the same
    /// (action, abbreviation) — the unique-constraint analog that keeps
    /// two first-time callers from both succeeding.
    fn try_insert(
        &self,
        action: ActionId,
        abbrev: &str,
        concept: ConceptId,
    ) -> Result<InsertOutcome, StoreError>;
}

/// Persistence for [`UnitIdInfo`] resolution state.
pub trait UnitInfoStore: Send + Sync {
    /// State previously saved for `unit`, if any.
    fn find(&self, unit: UnitId) -> Result<Option<UnitIdInfo>, StoreError>;

    /// Inserts or replaces the state for `info.unit`.
    fn save(&self, info: UnitIdInfo) -> Result<(), StoreError>;
}

/// Read access to the stratigraphic unit hierarchy.
pub trait HierarchyStore: Send + Sync {
    /// Direct parents of `unit`, in storage order. The engine uses the
    /// first one when the caller did not supply a parent.
    fn direct_parents_of(&self, unit: UnitId) -> Result<Vec<RecordingUnit>, StoreError>;
}

/// Vocabulary label lookup.
pub trait LabelResolver: Send + Sync {
    /// Display label of `concept` in language `lang`.
    ///
    /// Implementations may return a bracketed external id such as
    /// `"[4282375]"` when no label exists in that language; a leading
    /// `[` is treated by the engine as "no usable label".
    fn label_of(&self, concept: ConceptId, lang: &str) -> Result<String, StoreError>;
}
