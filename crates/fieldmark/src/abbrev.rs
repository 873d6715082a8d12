//! Label abbreviation with per-action collision handling.
//!
//! An abbreviation is the uppercase prefix of a concept's display label.
//! Within one action, two different concepts must never share an
//! abbreviation string, so a collision appends an increasing decimal
//! suffix (`STR`, `STR1`, `STR2`, ...) until a free key is found. The
//! claim itself goes through [`AbbreviationStore::try_insert`], so a
//! concurrent claim lost to another concept simply reads as one more
//! collision and the probe continues.

use tracing::debug;

use crate::error::GenerateError;
use crate::limits::MAX_ABBREVIATION_PROBES;
use crate::model::{ActionId, ConceptId};
use crate::store::{AbbreviationStore, InsertOutcome};

/// Uppercase prefix of `label`, at most `width` characters.
///
/// Labels shorter than `width` pass through whole. A bracketed label
/// (the vocabulary service's "no usable label" fallback) abbreviates the
/// empty string.
fn candidate_prefix(label: &str, width: usize) -> String {
    if label.starts_with('[') {
        return String::new();
    }
    label.chars().take(width).collect::<String>().to_uppercase()
}

/// Returns the stable abbreviation of `label` for `concept` under
/// `action`, recording it in the store on first use.
///
/// Idempotent: resolving the same (action, concept, label, width) again
/// returns the same string without writing a new entry.
pub fn resolve_abbreviation(
    store: &dyn AbbreviationStore,
    action: ActionId,
    concept: ConceptId,
    label: &str,
    width: usize,
) -> Result<String, GenerateError> {
    let base = candidate_prefix(label, width);
    let mut candidate = base.clone();
    let mut suffix: usize = 1;
    for _ in 0..MAX_ABBREVIATION_PROBES {
        match store.try_insert(action, &candidate, concept)? {
            InsertOutcome::Inserted | InsertOutcome::AlreadyOwn => return Ok(candidate),
            InsertOutcome::TakenByOther => {
                debug!(
                    abbreviation = %candidate,
                    action = %action,
                    "abbreviation owned by another concept, probing next suffix"
                );
                candidate = format!("{base}{suffix}");
                suffix += 1;
            }
        }
    }
    Err(GenerateError::AbbreviationSearchExhausted {
        candidate,
        limit: MAX_ABBREVIATION_PROBES,
    })
}
