//! Text placeholder resolvers: `TYPE_UE`, `TYPE_PARENT`, `ID_UA`.
//!
//! The two type resolvers go through the abbreviation engine and share
//! its per-action collision cache. Their missing-context policies
//! differ on purpose: `TYPE_UE` leaves the template untouched while
//! `TYPE_PARENT` substitutes the `*` wildcard. Both behaviors are
//! load-bearing for existing identifiers and must not be unified.

use std::sync::Arc;

use crate::abbrev::resolve_abbreviation;
use crate::error::GenerateError;
use crate::limits::DEFAULT_ABBREV_WIDTH;
use crate::model::{ActionContext, UnitIdInfo};
use crate::resolver::PlaceholderResolver;
use crate::store::{AbbreviationStore, LabelResolver};
use crate::template::{self, codes};

/// `TYPE_UE` — abbreviation of this unit's type concept.
pub struct TypeResolver {
    labels: Arc<dyn LabelResolver>,
    abbreviations: Arc<dyn AbbreviationStore>,
}

impl TypeResolver {
    pub fn new(labels: Arc<dyn LabelResolver>, abbreviations: Arc<dyn AbbreviationStore>) -> Self {
        Self {
            labels,
            abbreviations,
        }
    }
}

impl PlaceholderResolver for TypeResolver {
    fn code(&self) -> &'static str {
        codes::TYPE_UE
    }

    fn resolve(
        &self,
        template: &str,
        action: &ActionContext,
        info: &UnitIdInfo,
    ) -> Result<String, GenerateError> {
        if !template::contains_code(template, self.code()) {
            return Ok(template.to_string());
        }
        // Missing language or type leaves the placeholder in place.
        let (Some(lang), Some(concept)) = (action.lang.as_deref(), info.ru_type) else {
            return Ok(template.to_string());
        };
        let label = self.labels.label_of(concept, lang)?;
        template::substitute(template, self.code(), |spec| {
            let width = template::abbrev_width(spec).unwrap_or(DEFAULT_ABBREV_WIDTH);
            resolve_abbreviation(
                self.abbreviations.as_ref(),
                info.action,
                concept,
                &label,
                width,
            )
        })
    }
}

/// `TYPE_PARENT` — abbreviation of the parent unit's type concept.
pub struct TypeParentResolver {
    labels: Arc<dyn LabelResolver>,
    abbreviations: Arc<dyn AbbreviationStore>,
}

impl TypeParentResolver {
    pub fn new(labels: Arc<dyn LabelResolver>, abbreviations: Arc<dyn AbbreviationStore>) -> Self {
        Self {
            labels,
            abbreviations,
        }
    }
}

impl PlaceholderResolver for TypeParentResolver {
    fn code(&self) -> &'static str {
        codes::TYPE_PARENT
    }

    fn resolve(
        &self,
        template: &str,
        action: &ActionContext,
        info: &UnitIdInfo,
    ) -> Result<String, GenerateError> {
        if !template::contains_code(template, self.code()) {
            return Ok(template.to_string());
        }
        // Missing language or parent type substitutes the wildcard.
        let (Some(lang), Some(concept)) = (action.lang.as_deref(), info.ru_parent_type) else {
            return template::substitute(template, self.code(), |_| Ok("*".to_string()));
        };
        let label = self.labels.label_of(concept, lang)?;
        template::substitute(template, self.code(), |spec| {
            let width = template::abbrev_width(spec).unwrap_or(DEFAULT_ABBREV_WIDTH);
            resolve_abbreviation(
                self.abbreviations.as_ref(),
                info.action,
                concept,
                &label,
                width,
            )
        })
    }
}

/// `ID_UA` — the owning action's full identifier.
pub struct ActionIdResolver;

impl PlaceholderResolver for ActionIdResolver {
    fn code(&self) -> &'static str {
        codes::ID_UA
    }

    fn resolve(
        &self,
        template: &str,
        action: &ActionContext,
        _info: &UnitIdInfo,
    ) -> Result<String, GenerateError> {
        if !template::contains_code(template, self.code()) {
            return Ok(template.to_string());
        }
        let value = action.full_identifier.as_deref().unwrap_or("*");
        template::substitute(template, self.code(), |_| Ok(value.to_string()))
    }
}
