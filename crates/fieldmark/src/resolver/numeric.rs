//! Numeric placeholder resolvers: `NUM_UE`, `NUM_PARENT`, `NUM_USPATIAL`.
//!
//! All three share one substitution rule: a `0`-run spec zero-pads to
//! the spec width, anything else prints the value bare. Padding never
//! truncates — a value wider than the requested width prints in full.

use std::sync::Arc;

use crate::error::GenerateError;
use crate::model::{ActionContext, UnitIdInfo};
use crate::resolver::PlaceholderResolver;
use crate::store::UnitInfoStore;
use crate::template::{self, codes};

/// Formats `value` under the placeholder spec.
fn format_number(value: i64, spec: Option<&str>) -> String {
    match template::zero_pad_width(spec) {
        Some(width) => format!("{:0w$}", value, w = width),
        None => value.to_string(),
    }
}

/// Substitutes every `{code}` occurrence with the formatted `value`.
fn substitute_number(template: &str, code: &str, value: i64) -> Result<String, GenerateError> {
    template::substitute(template, code, |spec| Ok(format_number(value, spec)))
}

/// `NUM_UE` — this unit's own sequence number.
pub struct NumberResolver;

impl PlaceholderResolver for NumberResolver {
    fn code(&self) -> &'static str {
        codes::NUM_UE
    }

    fn is_numeric(&self) -> bool {
        true
    }

    /// Unlike every other resolver, a template without the placeholder
    /// resolves to the bare number: `NUM_UE` is what the top-level entry
    /// points fall back to when no format is configured.
    fn resolve(
        &self,
        template: &str,
        _action: &ActionContext,
        info: &UnitIdInfo,
    ) -> Result<String, GenerateError> {
        if !template::contains_code(template, self.code()) {
            return Ok(info.ru_number.to_string());
        }
        substitute_number(template, self.code(), info.ru_number)
    }
}

/// `NUM_PARENT` — the parent unit's sequence number, `0` when the unit
/// has no parent or the parent was never numbered.
pub struct NumParentResolver {
    infos: Arc<dyn UnitInfoStore>,
}

impl NumParentResolver {
    pub fn new(infos: Arc<dyn UnitInfoStore>) -> Self {
        Self { infos }
    }
}

impl PlaceholderResolver for NumParentResolver {
    fn code(&self) -> &'static str {
        codes::NUM_PARENT
    }

    fn is_numeric(&self) -> bool {
        true
    }

    fn resolve(
        &self,
        template: &str,
        _action: &ActionContext,
        info: &UnitIdInfo,
    ) -> Result<String, GenerateError> {
        if !template::contains_code(template, self.code()) {
            return Ok(template.to_string());
        }
        let number = match info.parent {
            Some(parent) => self
                .infos
                .find(parent)?
                .map(|parent_info| parent_info.ru_number)
                .unwrap_or(0),
            None => 0,
        };
        substitute_number(template, self.code(), number)
    }
}

/// `NUM_USPATIAL` — the numeric id of the unit's spatial unit, `0` when
/// no spatial context exists.
pub struct NumSpatialResolver;

impl PlaceholderResolver for NumSpatialResolver {
    fn code(&self) -> &'static str {
        codes::NUM_USPATIAL
    }

    fn is_numeric(&self) -> bool {
        true
    }

    fn resolve(
        &self,
        template: &str,
        _action: &ActionContext,
        info: &UnitIdInfo,
    ) -> Result<String, GenerateError> {
        if !template::contains_code(template, self.code()) {
            return Ok(template.to_string());
        }
        let number = info.spatial_unit_number.map(|s| s.0).unwrap_or(0);
        substitute_number(template, self.code(), number)
    }
}
