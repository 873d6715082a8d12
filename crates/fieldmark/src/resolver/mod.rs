//! Placeholder resolvers and their static registry.
//!
//! One resolver exists per placeholder code. The registry is an
//! immutable value built once at startup with the collaborator handles
//! it needs, then passed by reference to the engine — there is no
//! runtime discovery and no global state.

mod numeric;
mod text;

use std::sync::Arc;

pub use numeric::{NumParentResolver, NumSpatialResolver, NumberResolver};
pub use text::{ActionIdResolver, TypeParentResolver, TypeResolver};

use crate::error::GenerateError;
use crate::model::{ActionContext, UnitIdInfo};
use crate::store::{AbbreviationStore, LabelResolver, UnitInfoStore};
use crate::template;

/// A named substitution rule for one placeholder code.
pub trait PlaceholderResolver: Send + Sync {
    /// The placeholder code without the braces, e.g. `"NUM_UE"`.
    fn code(&self) -> &'static str;

    /// True iff `template` contains `{CODE}` or `{CODE:SPEC}` for this
    /// resolver's code.
    fn applies_to(&self, template: &str) -> bool {
        template::contains_code(template, self.code())
    }

    /// True for resolvers substituting a numeric value. Drives the
    /// template-author UI's placeholder filtering.
    fn is_numeric(&self) -> bool {
        false
    }

    /// Returns `template` with this resolver's placeholders substituted.
    ///
    /// Non-matching templates pass through unchanged, except for the
    /// `NUM_UE` resolver whose documented fallback is the bare sequence
    /// number.
    fn resolve(
        &self,
        template: &str,
        action: &ActionContext,
        info: &UnitIdInfo,
    ) -> Result<String, GenerateError>;
}

/// The fixed, immutable set of resolvers the engine runs.
pub struct ResolverRegistry {
    resolvers: Vec<Box<dyn PlaceholderResolver>>,
}

impl ResolverRegistry {
    /// Builds the standard six-resolver registry.
    ///
    /// Pass order is fixed: `NUM_UE` first, then the type, parent,
    /// spatial, and action resolvers. No resolver emits literal braces,
    /// so the order does not affect the output.
    pub fn standard(
        labels: Arc<dyn LabelResolver>,
        abbreviations: Arc<dyn AbbreviationStore>,
        infos: Arc<dyn UnitInfoStore>,
    ) -> Self {
        Self {
            resolvers: vec![
                Box::new(NumberResolver),
                Box::new(TypeResolver::new(
                    Arc::clone(&labels),
                    Arc::clone(&abbreviations),
                )),
                Box::new(NumParentResolver::new(infos)),
                Box::new(TypeParentResolver::new(labels, abbreviations)),
                Box::new(NumSpatialResolver),
                Box::new(ActionIdResolver),
            ],
        }
    }

    /// Resolvers in pass order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn PlaceholderResolver> {
        self.resolvers.iter().map(|r| r.as_ref())
    }

    /// All supported placeholder codes, in pass order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.code()).collect()
    }

    /// Codes of the numeric resolvers only.
    pub fn numeric_codes(&self) -> Vec<&'static str> {
        self.resolvers
            .iter()
            .filter(|r| r.is_numeric())
            .map(|r| r.code())
            .collect()
    }
}
