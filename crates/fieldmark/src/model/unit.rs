//! Recording units, their per-unit resolution state, and counter scope
//! keys.

use crate::model::id::{ActionId, ConceptId, SpatialUnitId, UnitId};

/// An archaeological observation requiring a unique identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingUnit {
    /// Stable id of the unit.
    pub id: UnitId,
    /// Vocabulary concept describing the unit's type, if already chosen.
    pub unit_type: Option<ConceptId>,
    /// Spatial unit the observation belongs to, if any.
    pub spatial_unit: Option<SpatialUnitId>,
}

impl RecordingUnit {
    /// Creates a unit with a fresh id and no type or spatial unit.
    pub fn new() -> Self {
        Self {
            id: UnitId::random(),
            unit_type: None,
            spatial_unit: None,
        }
    }
}

impl Default for RecordingUnit {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolution state for one recording unit being identified.
///
/// Not every field ends up in the final identifier; all are preserved so
/// that nothing is lost if the action's format changes later, and so
/// that descendant units can resolve `NUM_PARENT` / `TYPE_PARENT`
/// against their parent's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitIdInfo {
    /// The unit this state belongs to.
    pub unit: UnitId,
    /// The action the unit was numbered under.
    pub action: ActionId,
    /// Assigned sequence value. Immutable once drawn, unique within the
    /// scope it was drawn from.
    pub ru_number: i64,
    /// The unit's type concept at generation time.
    pub ru_type: Option<ConceptId>,
    /// Direct parent unit, if known.
    pub parent: Option<UnitId>,
    /// The parent unit's type concept at generation time.
    pub ru_parent_type: Option<ConceptId>,
    /// Numeric spatial-unit value substituted by `NUM_USPATIAL`.
    pub spatial_unit_number: Option<SpatialUnitId>,
}

impl UnitIdInfo {
    /// Creates empty state for `unit` under `action`.
    pub fn new(unit: UnitId, action: ActionId) -> Self {
        Self {
            unit,
            action,
            ru_number: 0,
            ru_type: None,
            parent: None,
            ru_parent_type: None,
            spatial_unit_number: None,
        }
    }
}

/// Partition key of a sequence counter.
///
/// Which variant applies follows from the action's
/// [`ScopeConfig`](crate::model::ScopeConfig); parent-scoped
/// configurations degrade to [`Self::Action`] when the unit has no
/// parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    /// One counter for the whole action.
    Action(ActionId),
    /// One counter per (action, unit type); `None` groups untyped units.
    ActionType(ActionId, Option<ConceptId>),
    /// One counter per parent unit.
    ParentUnit(UnitId),
    /// One counter per (parent unit, unit type).
    ParentUnitType(UnitId, Option<ConceptId>),
}
