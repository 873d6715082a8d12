//! In-memory store implementations.
//!
//! Each store is a `Mutex`-guarded map; `try_insert` holds its lock
//! across the probe and the insert, which gives it the atomicity the
//! trait contract requires.

use std::collections::hash_map::Entry;
use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::error::StoreError;
use crate::limits::FIRST_COUNTER_VALUE;
use crate::model::{ActionId, ConceptId, RecordingUnit, ScopeKey, UnitId, UnitIdInfo};
use crate::store::{
    AbbreviationStore, CounterStore, HierarchyStore, InsertOutcome, LabelResolver, UnitInfoStore,
};

fn poisoned(what: &str) -> StoreError {
    StoreError::new(format!("{what} lock poisoned"))
}

/// In-memory [`CounterStore`].
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    counters: Mutex<FxHashMap<ScopeKey, i64>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    fn next_value(&self, scope: &ScopeKey) -> Result<i64, StoreError> {
        let mut counters = self.counters.lock().map_err(|_| poisoned("counter"))?;
        let value = counters
            .entry(scope.clone())
            .or_insert(FIRST_COUNTER_VALUE - 1);
        *value += 1;
        Ok(*value)
    }
}

/// In-memory [`AbbreviationStore`].
#[derive(Debug, Default)]
pub struct MemoryAbbreviationStore {
    entries: Mutex<FxHashMap<(ActionId, String), ConceptId>>,
}

impl MemoryAbbreviationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across all actions.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// True when no abbreviation has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AbbreviationStore for MemoryAbbreviationStore {
    fn find(&self, action: ActionId, abbrev: &str) -> Result<Option<ConceptId>, StoreError> {
        let entries = self.entries.lock().map_err(|_| poisoned("abbreviation"))?;
        Ok(entries.get(&(action, abbrev.to_string())).copied())
    }

    fn try_insert(
        &self,
        action: ActionId,
        abbrev: &str,
        concept: ConceptId,
    ) -> Result<InsertOutcome, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned("abbreviation"))?;
        match entries.entry((action, abbrev.to_string())) {
            Entry::Occupied(existing) if *existing.get() == concept => Ok(InsertOutcome::AlreadyOwn),
            Entry::Occupied(_) => Ok(InsertOutcome::TakenByOther),
            Entry::Vacant(slot) => {
                slot.insert(concept);
                Ok(InsertOutcome::Inserted)
            }
        }
    }
}

/// In-memory [`UnitInfoStore`].
#[derive(Debug, Default)]
pub struct MemoryUnitInfoStore {
    infos: Mutex<FxHashMap<UnitId, UnitIdInfo>>,
}

impl MemoryUnitInfoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnitInfoStore for MemoryUnitInfoStore {
    fn find(&self, unit: UnitId) -> Result<Option<UnitIdInfo>, StoreError> {
        let infos = self.infos.lock().map_err(|_| poisoned("unit info"))?;
        Ok(infos.get(&unit).cloned())
    }

    fn save(&self, info: UnitIdInfo) -> Result<(), StoreError> {
        let mut infos = self.infos.lock().map_err(|_| poisoned("unit info"))?;
        infos.insert(info.unit, info);
        Ok(())
    }
}

/// In-memory [`HierarchyStore`].
#[derive(Debug, Default)]
pub struct MemoryHierarchyStore {
    parents: Mutex<FxHashMap<UnitId, Vec<RecordingUnit>>>,
}

impl MemoryHierarchyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `parent` as a direct parent of `child`.
    pub fn link(&self, child: UnitId, parent: &RecordingUnit) {
        if let Ok(mut parents) = self.parents.lock() {
            parents.entry(child).or_default().push(parent.clone());
        }
    }
}

impl HierarchyStore for MemoryHierarchyStore {
    fn direct_parents_of(&self, unit: UnitId) -> Result<Vec<RecordingUnit>, StoreError> {
        let parents = self.parents.lock().map_err(|_| poisoned("hierarchy"))?;
        Ok(parents.get(&unit).cloned().unwrap_or_default())
    }
}

/// In-memory [`LabelResolver`].
///
/// Unknown (concept, language) pairs resolve to the bracketed external
/// id, matching the vocabulary service's fallback behavior.
#[derive(Debug, Default)]
pub struct MemoryLabelResolver {
    labels: Mutex<FxHashMap<(ConceptId, String), String>>,
}

impl MemoryLabelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the display label of `concept` in `lang`.
    pub fn set_label(&self, concept: ConceptId, lang: &str, label: &str) {
        if let Ok(mut labels) = self.labels.lock() {
            labels.insert((concept, lang.to_string()), label.to_string());
        }
    }
}

impl LabelResolver for MemoryLabelResolver {
    fn label_of(&self, concept: ConceptId, lang: &str) -> Result<String, StoreError> {
        let labels = self.labels.lock().map_err(|_| poisoned("label"))?;
        Ok(labels
            .get(&(concept, lang.to_string()))
            .cloned()
            .unwrap_or_else(|| format!("[{concept}]")))
    }
}
