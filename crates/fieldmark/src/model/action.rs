//! The excavation-action context and its counter-scoping configuration.

use crate::model::id::{ActionId, SpatialUnitId};
use crate::template::{self, codes};

/// How sequence counters are partitioned for units created under an
/// action.
///
/// The scope is operator configuration on the action. For actions
/// migrated from the legacy system it can be recovered from the template
/// itself with [`ScopeConfig::from_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeConfig {
    /// One counter per action.
    #[default]
    Unique,
    /// One counter per parent recording unit; units without a parent
    /// share the action counter.
    Parent,
    /// One counter per (action, unit type) pair.
    TypeUnique,
    /// One counter per (parent unit, unit type) pair; units without a
    /// parent share the action counter.
    ParentType,
}

impl ScopeConfig {
    /// Derives the scope the legacy system would use for `format`.
    ///
    /// The legacy rules key off which codes the template mentions:
    /// `NUM_PARENT` and `TYPE_UE` together select [`Self::ParentType`],
    /// `TYPE_UE` alone [`Self::TypeUnique`], `NUM_PARENT` alone
    /// [`Self::Parent`], anything else [`Self::Unique`].
    pub fn from_format(format: Option<&str>) -> Self {
        let Some(format) = format.filter(|f| !f.is_empty()) else {
            return Self::Unique;
        };
        if !template::contains_code(format, codes::NUM_UE) {
            return Self::Unique;
        }
        let by_type = template::contains_code(format, codes::TYPE_UE);
        let by_parent = template::contains_code(format, codes::NUM_PARENT);
        match (by_parent, by_type) {
            (true, true) => Self::ParentType,
            (false, true) => Self::TypeUnique,
            (true, false) => Self::Parent,
            (false, false) => Self::Unique,
        }
    }
}

/// The excavation action under which recording units are numbered and
/// identified. Created and edited by an operator; read-only to the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    /// Stable id of the action.
    pub id: ActionId,
    /// Short operator-facing identifier, e.g. `"EXC-2024"`.
    pub identifier: String,
    /// The action's own full identifier, substituted by `ID_UA`.
    pub full_identifier: Option<String>,
    /// Lower bound (inclusive) of the unit sequence range.
    pub min_code: i64,
    /// Upper bound (inclusive) of the unit sequence range.
    pub max_code: i64,
    /// Format template for unit identifiers. `None` or empty means units
    /// get their bare sequence number.
    pub format: Option<String>,
    /// Two-letter language code used to derive abbreviations.
    pub lang: Option<String>,
    /// Counter partitioning for units under this action.
    pub scope: ScopeConfig,
    /// Spatial units associated with the action, in display order.
    pub spatial_context: Vec<SpatialUnitId>,
}

impl ActionContext {
    /// Creates an action with the system defaults: the whole positive
    /// range, the bare-number template, and the action-unique scope.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            id: ActionId::random(),
            identifier: identifier.into(),
            full_identifier: None,
            min_code: 1,
            max_code: i64::MAX,
            format: Some("{NUM_UE}".to_string()),
            lang: None,
            scope: ScopeConfig::default(),
            spatial_context: Vec::new(),
        }
    }

    /// The template, if configured non-empty.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref().filter(|f| !f.is_empty())
    }

    /// First spatial unit of the action's spatial context, if any.
    pub fn first_spatial_unit(&self) -> Option<SpatialUnitId> {
        self.spatial_context.first().copied()
    }
}
