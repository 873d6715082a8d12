//! Generates a handful of identifiers against the in-memory stores.

use std::sync::Arc;

use fieldmark::store::{
    MemoryAbbreviationStore, MemoryCounterStore, MemoryHierarchyStore, MemoryLabelResolver,
    MemoryUnitInfoStore,
};
use fieldmark::{
    ActionContext, ConceptId, IdentifierEngine, RecordingUnit, ResolverRegistry, SpatialUnitId,
};

fn main() {
    let labels = Arc::new(MemoryLabelResolver::new());
    let abbreviations = Arc::new(MemoryAbbreviationStore::new());
    let infos = Arc::new(MemoryUnitInfoStore::new());
    let hierarchy = Arc::new(MemoryHierarchyStore::new());

    let registry =
        ResolverRegistry::standard(labels.clone(), abbreviations.clone(), infos.clone());
    let engine = IdentifierEngine::new(
        registry,
        Arc::new(MemoryCounterStore::new()),
        infos,
        hierarchy.clone(),
    );

    let mut action = ActionContext::new("EXC-2024");
    action.full_identifier = Some("CHA-309-01-EXC".to_string());
    action.format = Some("{ID_UA}-{TYPE_UE}{NUM_USPATIAL}-{NUM_UE:0000}".to_string());
    action.lang = Some("fr".to_string());
    action.spatial_context = vec![SpatialUnitId(3)];

    let structure = ConceptId::random();
    let strate = ConceptId::random();
    let wall = ConceptId::random();
    labels.set_label(structure, "fr", "Structure");
    labels.set_label(strate, "fr", "Strate");
    labels.set_label(wall, "fr", "Mur");

    println!("template: {}", action.format.as_deref().unwrap());
    println!("supported codes: {:?}", engine.supported_codes());
    println!();

    let mut parent = RecordingUnit::new();
    parent.unit_type = Some(structure);
    let id = engine
        .generate_full_identifier(&action, &parent)
        .expect("generation failed");
    println!("structure unit      -> {id}");

    // "Strate" collides with "Structure" on STR and gets a suffix.
    let mut sibling = RecordingUnit::new();
    sibling.unit_type = Some(strate);
    let id = engine
        .generate_full_identifier(&action, &sibling)
        .expect("generation failed");
    println!("strate unit         -> {id}");

    let mut child = RecordingUnit::new();
    child.unit_type = Some(wall);
    hierarchy.link(child.id, &parent);
    let id = engine
        .generate_full_identifier(&action, &child)
        .expect("generation failed");
    println!("wall under structure -> {id}");
}
