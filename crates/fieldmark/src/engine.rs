//! The format engine: draws the sequence number, maintains the per-unit
//! resolution state, and runs the resolver passes.

use std::sync::Arc;

use tracing::trace;

use crate::error::{GenerateError, TemplateError};
use crate::model::{ActionContext, RecordingUnit, ScopeConfig, ScopeKey, UnitIdInfo};
use crate::resolver::ResolverRegistry;
use crate::store::{CounterStore, HierarchyStore, UnitInfoStore};
use crate::template::{self, codes};

/// Generates full identifiers for recording units.
///
/// Construct once at startup with the registry and store handles; the
/// engine itself is stateless and shareable.
pub struct IdentifierEngine {
    registry: ResolverRegistry,
    counters: Arc<dyn CounterStore>,
    infos: Arc<dyn UnitInfoStore>,
    hierarchy: Arc<dyn HierarchyStore>,
}

impl IdentifierEngine {
    pub fn new(
        registry: ResolverRegistry,
        counters: Arc<dyn CounterStore>,
        infos: Arc<dyn UnitInfoStore>,
        hierarchy: Arc<dyn HierarchyStore>,
    ) -> Self {
        Self {
            registry,
            counters,
            infos,
            hierarchy,
        }
    }

    /// All placeholder codes the engine supports, for template-author
    /// tooling.
    pub fn supported_codes(&self) -> Vec<&'static str> {
        self.registry.codes()
    }

    /// The numeric subset of [`Self::supported_codes`].
    pub fn numeric_codes(&self) -> Vec<&'static str> {
        self.registry.numeric_codes()
    }

    /// Generates the identifier for `unit` under `action`.
    ///
    /// A non-empty template must contain the `{NUM_UE}` placeholder;
    /// the check runs before a counter value is consumed. When `parent`
    /// is `None` the unit's first direct parent is looked up from the
    /// hierarchy so `NUM_PARENT` / `TYPE_PARENT` still resolve.
    pub fn generate_identifier(
        &self,
        action: &ActionContext,
        unit: &RecordingUnit,
        parent: Option<&RecordingUnit>,
    ) -> Result<String, GenerateError> {
        if let Some(format) = action.format() {
            if !template::contains_code(format, codes::NUM_UE) {
                return Err(TemplateError::MissingNumberPlaceholder.into());
            }
        }
        let resolved;
        let parent = match parent {
            Some(parent) => Some(parent),
            None => {
                resolved = self.first_parent_of(unit)?;
                resolved.as_ref()
            }
        };
        self.generate(action, unit, parent)
    }

    /// Generates the identifier for `unit`, resolving its parent from
    /// the hierarchy.
    ///
    /// Unlike [`Self::generate_identifier`] this path does not enforce
    /// the `{NUM_UE}` requirement, for compatibility with templates
    /// predating the mandatory-placeholder rule.
    pub fn generate_full_identifier(
        &self,
        action: &ActionContext,
        unit: &RecordingUnit,
    ) -> Result<String, GenerateError> {
        let parent = self.first_parent_of(unit)?;
        self.generate(action, unit, parent.as_ref())
    }

    fn first_parent_of(
        &self,
        unit: &RecordingUnit,
    ) -> Result<Option<RecordingUnit>, GenerateError> {
        Ok(self
            .hierarchy
            .direct_parents_of(unit.id)?
            .into_iter()
            .next())
    }

    fn generate(
        &self,
        action: &ActionContext,
        unit: &RecordingUnit,
        parent: Option<&RecordingUnit>,
    ) -> Result<String, GenerateError> {
        trace!(unit = %unit.id, action = %action.id, "generating full identifier");

        let number = self.counters.next_value(&scope_key(action, unit, parent))?;
        if number < action.min_code || number > action.max_code {
            // The drawn value is lost, not rolled back.
            return Err(GenerateError::RangeExhausted {
                value: number,
                min: action.min_code,
                max: action.max_code,
            });
        }

        let mut info = self.create_or_get_info(action, unit, parent)?;
        info.ru_number = number;

        let Some(format) = action.format() else {
            // Persist the bare number so descendants can still resolve
            // NUM_PARENT against this unit.
            self.infos.save(info)?;
            return Ok(number.to_string());
        };

        info.ru_type = unit.unit_type;
        self.infos.save(info.clone())?;

        let mut out = format.to_string();
        for resolver in self.registry.iter() {
            if resolver.applies_to(&out) {
                out = resolver.resolve(&out, action, &info)?;
            }
        }
        Ok(out)
    }

    fn create_or_get_info(
        &self,
        action: &ActionContext,
        unit: &RecordingUnit,
        parent: Option<&RecordingUnit>,
    ) -> Result<UnitIdInfo, GenerateError> {
        if let Some(existing) = self.infos.find(unit.id)? {
            return Ok(existing);
        }
        let mut info = UnitIdInfo::new(unit.id, action.id);
        info.spatial_unit_number = unit.spatial_unit.or_else(|| action.first_spatial_unit());
        if let Some(parent) = parent {
            info.parent = Some(parent.id);
            info.ru_parent_type = parent.unit_type;
        }
        self.infos.save(info.clone())?;
        Ok(info)
    }
}

/// Counter partition for one generation, per the action's scope
/// configuration. Parent-scoped configurations degrade to the action
/// counter when the unit has no parent.
fn scope_key(
    action: &ActionContext,
    unit: &RecordingUnit,
    parent: Option<&RecordingUnit>,
) -> ScopeKey {
    match (action.scope, parent) {
        (ScopeConfig::Unique, _) => ScopeKey::Action(action.id),
        (ScopeConfig::TypeUnique, _) => ScopeKey::ActionType(action.id, unit.unit_type),
        (ScopeConfig::Parent, Some(parent)) => ScopeKey::ParentUnit(parent.id),
        (ScopeConfig::ParentType, Some(parent)) => {
            ScopeKey::ParentUnitType(parent.id, unit.unit_type)
        }
        (ScopeConfig::Parent | ScopeConfig::ParentType, None) => ScopeKey::Action(action.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConceptId, SpatialUnitId};
    use crate::store::{
        MemoryAbbreviationStore, MemoryCounterStore, MemoryHierarchyStore, MemoryLabelResolver,
        MemoryUnitInfoStore, UnitInfoStore as _,
    };

    struct Harness {
        engine: IdentifierEngine,
        labels: Arc<MemoryLabelResolver>,
        infos: Arc<MemoryUnitInfoStore>,
        hierarchy: Arc<MemoryHierarchyStore>,
    }

    impl Harness {
        fn new() -> Self {
            let labels = Arc::new(MemoryLabelResolver::new());
            let abbreviations = Arc::new(MemoryAbbreviationStore::new());
            let infos = Arc::new(MemoryUnitInfoStore::new());
            let hierarchy = Arc::new(MemoryHierarchyStore::new());
            let registry = ResolverRegistry::standard(
                Arc::clone(&labels) as _,
                Arc::clone(&abbreviations) as _,
                Arc::clone(&infos) as _,
            );
            let engine = IdentifierEngine::new(
                registry,
                Arc::new(MemoryCounterStore::new()),
                Arc::clone(&infos) as _,
                Arc::clone(&hierarchy) as _,
            );
            Self {
                engine,
                labels,
                infos,
                hierarchy,
            }
        }

        fn concept(&self, lang: &str, label: &str) -> ConceptId {
            let concept = ConceptId::random();
            self.labels.set_label(concept, lang, label);
            concept
        }
    }

    fn action_with_format(format: &str) -> ActionContext {
        let mut action = ActionContext::new("EXC-1");
        action.format = Some(format.to_string());
        action.lang = Some("fr".to_string());
        action
    }

    #[test]
    fn test_end_to_end_type_and_number() {
        let h = Harness::new();
        let mut action = action_with_format("{TYPE_UE}-{NUM_UE:0000}");
        action.min_code = 1;
        action.max_code = 9999;

        let mut first = RecordingUnit::new();
        first.unit_type = Some(h.concept("fr", "Structure"));
        let mut second = RecordingUnit::new();
        second.unit_type = Some(h.concept("fr", "Mur"));

        assert_eq!(
            h.engine.generate_identifier(&action, &first, None).unwrap(),
            "STR-0001"
        );
        assert_eq!(
            h.engine
                .generate_identifier(&action, &second, None)
                .unwrap(),
            "MUR-0002"
        );
    }

    #[test]
    fn test_full_identifier_with_action_and_spatial() {
        let h = Harness::new();
        let mut action = action_with_format("{ID_UA}-{TYPE_UE}-{NUM_USPATIAL:000}-{NUM_UE:0000}");
        action.full_identifier = Some("CHA-309-01-EXC".to_string());
        action.spatial_context = vec![SpatialUnitId(3)];

        let mut unit = RecordingUnit::new();
        unit.unit_type = Some(h.concept("fr", "Structure"));

        assert_eq!(
            h.engine.generate_full_identifier(&action, &unit).unwrap(),
            "CHA-309-01-EXC-STR-003-0001"
        );
    }

    #[test]
    fn test_missing_number_placeholder_fails_fast() {
        let h = Harness::new();
        let action = action_with_format("{TYPE_UE}-{ID_UA}");
        let unit = RecordingUnit::new();
        let err = h
            .engine
            .generate_identifier(&action, &unit, None)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::Template(TemplateError::MissingNumberPlaceholder)
        );
        // No counter value was consumed: the next valid generation
        // starts at 1.
        let mut ok = action_with_format("{NUM_UE}");
        ok.id = action.id;
        assert_eq!(
            h.engine
                .generate_identifier(&ok, &RecordingUnit::new(), None)
                .unwrap(),
            "1"
        );
    }

    #[test]
    fn test_full_identifier_path_skips_mandatory_check() {
        let h = Harness::new();
        let action = action_with_format("{ID_UA}");
        let unit = RecordingUnit::new();
        // Legacy template without NUM_UE: resolves, no number emitted.
        assert_eq!(
            h.engine.generate_full_identifier(&action, &unit).unwrap(),
            "*"
        );
    }

    #[test]
    fn test_no_template_returns_bare_number_and_persists() {
        let h = Harness::new();
        let mut action = action_with_format("");
        action.format = None;

        let unit = RecordingUnit::new();
        assert_eq!(
            h.engine.generate_full_identifier(&action, &unit).unwrap(),
            "1"
        );
        let info = h.infos.find(unit.id).unwrap().unwrap();
        assert_eq!(info.ru_number, 1);
    }

    #[test]
    fn test_range_exhausted_at_upper_bound() {
        let h = Harness::new();
        let mut action = action_with_format("{NUM_UE}");
        action.min_code = 1;
        action.max_code = 2;

        let u1 = RecordingUnit::new();
        let u2 = RecordingUnit::new();
        let u3 = RecordingUnit::new();
        h.engine.generate_identifier(&action, &u1, None).unwrap();
        h.engine.generate_identifier(&action, &u2, None).unwrap();
        let err = h
            .engine
            .generate_identifier(&action, &u3, None)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::RangeExhausted {
                value: 3,
                min: 1,
                max: 2
            }
        );
    }

    #[test]
    fn test_range_check_applies_below_minimum() {
        let h = Harness::new();
        let mut action = action_with_format("{NUM_UE}");
        action.min_code = 5;
        let err = h
            .engine
            .generate_identifier(&action, &RecordingUnit::new(), None)
            .unwrap_err();
        assert!(matches!(err, GenerateError::RangeExhausted { value: 1, .. }));
    }

    #[test]
    fn test_parent_self_resolution_from_hierarchy() {
        let h = Harness::new();
        let action = action_with_format("{NUM_UE:0000}-{NUM_PARENT:0000}");

        let parent = RecordingUnit::new();
        h.engine
            .generate_identifier(&action, &parent, None)
            .unwrap();

        let child = RecordingUnit::new();
        h.hierarchy.link(child.id, &parent);
        assert_eq!(
            h.engine.generate_identifier(&action, &child, None).unwrap(),
            "0002-0001"
        );
    }

    #[test]
    fn test_explicit_parent_overrides_hierarchy() {
        let h = Harness::new();
        let action = action_with_format("{NUM_UE}-{NUM_PARENT}");

        let parent = RecordingUnit::new();
        h.engine
            .generate_identifier(&action, &parent, None)
            .unwrap();

        let child = RecordingUnit::new();
        assert_eq!(
            h.engine
                .generate_identifier(&action, &child, Some(&parent))
                .unwrap(),
            "2-1"
        );
    }

    #[test]
    fn test_type_parent_wildcard_for_root_units() {
        let h = Harness::new();
        let mut action = action_with_format("{TYPE_PARENT}-{NUM_UE}");
        action.lang = Some("fr".to_string());
        assert_eq!(
            h.engine
                .generate_full_identifier(&action, &RecordingUnit::new())
                .unwrap(),
            "*-1"
        );
    }

    #[test]
    fn test_type_scoped_counters() {
        let h = Harness::new();
        let mut action = action_with_format("{TYPE_UE}-{NUM_UE:0000}");
        action.scope = ScopeConfig::TypeUnique;

        let structure = h.concept("fr", "Structure");
        let wall = h.concept("fr", "Mur");

        let mut u1 = RecordingUnit::new();
        u1.unit_type = Some(structure);
        let mut u2 = RecordingUnit::new();
        u2.unit_type = Some(wall);
        let mut u3 = RecordingUnit::new();
        u3.unit_type = Some(structure);

        assert_eq!(
            h.engine.generate_identifier(&action, &u1, None).unwrap(),
            "STR-0001"
        );
        // A different type starts its own sequence.
        assert_eq!(
            h.engine.generate_identifier(&action, &u2, None).unwrap(),
            "MUR-0001"
        );
        assert_eq!(
            h.engine.generate_identifier(&action, &u3, None).unwrap(),
            "STR-0002"
        );
    }

    #[test]
    fn test_parent_scoped_counters_fall_back_without_parent() {
        let h = Harness::new();
        let mut action = action_with_format("{NUM_UE}-{NUM_PARENT}");
        action.scope = ScopeConfig::Parent;

        // Two roots share the action counter.
        let root_a = RecordingUnit::new();
        let root_b = RecordingUnit::new();
        assert_eq!(
            h.engine
                .generate_identifier(&action, &root_a, None)
                .unwrap(),
            "1-0"
        );
        assert_eq!(
            h.engine
                .generate_identifier(&action, &root_b, None)
                .unwrap(),
            "2-0"
        );

        // Children of different parents number independently.
        let child_a = RecordingUnit::new();
        let child_b = RecordingUnit::new();
        h.hierarchy.link(child_a.id, &root_a);
        h.hierarchy.link(child_b.id, &root_b);
        assert_eq!(
            h.engine
                .generate_identifier(&action, &child_a, None)
                .unwrap(),
            "1-1"
        );
        assert_eq!(
            h.engine
                .generate_identifier(&action, &child_b, None)
                .unwrap(),
            "1-2"
        );
    }

    #[test]
    fn test_unit_spatial_unit_wins_over_action_context() {
        let h = Harness::new();
        let mut action = action_with_format("{NUM_USPATIAL}-{NUM_UE}");
        action.spatial_context = vec![SpatialUnitId(7)];
        let mut unit = RecordingUnit::new();
        unit.spatial_unit = Some(SpatialUnitId(42));
        assert_eq!(
            h.engine.generate_identifier(&action, &unit, None).unwrap(),
            "42-1"
        );
    }

    #[test]
    fn test_supported_codes_listing() {
        let h = Harness::new();
        assert_eq!(h.engine.supported_codes().len(), 6);
        assert!(h.engine.supported_codes().contains(&"NUM_UE"));
        assert_eq!(
            h.engine.numeric_codes(),
            vec!["NUM_UE", "NUM_PARENT", "NUM_USPATIAL"]
        );
    }
}
