//! The `{CODE}` / `{CODE:SPEC}` format-template mini-language.
//!
//! A template is literal text interspersed with brace-delimited
//! placeholders. `CODE` names a resolver; the optional `SPEC` is a run of
//! `0` or `X` characters whose length requests a zero-padding or
//! abbreviation width. Scanning is hand-written — the grammar is flat
//! (no nesting, no escapes) and an unterminated `{` is literal text.

use crate::error::TemplateError;

/// Placeholder codes understood by the standard resolver set.
pub mod codes {
    /// This unit's sequence number.
    pub const NUM_UE: &str = "NUM_UE";
    /// Abbreviation of this unit's type concept.
    pub const TYPE_UE: &str = "TYPE_UE";
    /// Parent unit's sequence number.
    pub const NUM_PARENT: &str = "NUM_PARENT";
    /// Abbreviation of the parent unit's type concept.
    pub const TYPE_PARENT: &str = "TYPE_PARENT";
    /// Numeric id of the associated spatial unit.
    pub const NUM_USPATIAL: &str = "NUM_USPATIAL";
    /// The owning action's full identifier.
    pub const ID_UA: &str = "ID_UA";
}

/// All known placeholder codes, in the fixed resolver pass order.
pub const KNOWN_CODES: [&str; 6] = [
    codes::NUM_UE,
    codes::TYPE_UE,
    codes::NUM_PARENT,
    codes::TYPE_PARENT,
    codes::NUM_USPATIAL,
    codes::ID_UA,
];

/// One `{CODE}` or `{CODE:SPEC}` occurrence in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The code between the braces, before any `:`.
    pub code: &'a str,
    /// The spec after the `:`, if present. May be empty (`{CODE:}`).
    pub spec: Option<&'a str>,
    /// Byte offset of the opening `{`.
    pub start: usize,
    /// Byte offset one past the closing `}`.
    pub end: usize,
}

/// Scans every placeholder in `template`, left to right.
///
/// A `{` with no matching `}` is literal text, as is a `{` nested before
/// another `{` (the scan restarts at the inner one).
pub fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
    let mut found = Vec::new();
    let mut i = 0;
    while let Some(open) = template[i..].find('{') {
        let start = i + open;
        let Some(close) = template[start + 1..].find('}') else {
            break;
        };
        let end = start + 1 + close;
        let token = &template[start + 1..end];
        if let Some(inner) = token.find('{') {
            i = start + 1 + inner;
            continue;
        }
        let (code, spec) = match token.split_once(':') {
            Some((code, spec)) => (code, Some(spec)),
            None => (token, None),
        };
        found.push(Placeholder {
            code,
            spec,
            start,
            end: end + 1,
        });
        i = end + 1;
    }
    found
}

/// True iff `template` contains a `{code}` or `{code:SPEC}` token.
///
/// This is an exact token match: `{TYPE_PARENT}` does not count as a use
/// of `TYPE_UE`.
pub fn contains_code(template: &str, code: &str) -> bool {
    placeholders(template).iter().any(|p| p.code == code)
}

/// Zero-padding width requested by a numeric spec.
///
/// `Some(width)` iff the spec is one or more `0` characters; anything
/// else (including an `X` run) means no padding.
pub fn zero_pad_width(spec: Option<&str>) -> Option<usize> {
    let spec = spec?;
    if !spec.is_empty() && spec.bytes().all(|b| b == b'0') {
        Some(spec.len())
    } else {
        None
    }
}

/// Abbreviation width requested by a text spec.
///
/// `Some(width)` iff the spec is one or more `X` characters; anything
/// else falls back to the caller's default width.
pub fn abbrev_width(spec: Option<&str>) -> Option<usize> {
    let spec = spec?;
    if !spec.is_empty() && spec.bytes().all(|b| b == b'X') {
        Some(spec.len())
    } else {
        None
    }
}

/// Replaces every occurrence of `code` in `template`, invoking `value`
/// once per occurrence with its parsed spec.
pub fn substitute<E, F>(template: &str, code: &str, mut value: F) -> Result<String, E>
where
    F: FnMut(Option<&str>) -> Result<String, E>,
{
    let mut out = String::with_capacity(template.len());
    let mut tail = 0;
    for p in placeholders(template) {
        if p.code != code {
            continue;
        }
        out.push_str(&template[tail..p.start]);
        out.push_str(&value(p.spec)?);
        tail = p.end;
    }
    out.push_str(&template[tail..]);
    Ok(out)
}

/// Validates a template as action configuration.
///
/// Every code must be known, every spec must be a run of `0` or `X`, and
/// the mandatory `{NUM_UE}` placeholder must be present. Intended for the
/// surrounding application's template-save path; the engine re-checks
/// only the `NUM_UE` requirement at generation time.
pub fn validate(template: &str) -> Result<(), TemplateError> {
    let found = placeholders(template);
    for p in &found {
        if !KNOWN_CODES.contains(&p.code) {
            return Err(TemplateError::UnknownPlaceholder {
                code: p.code.to_string(),
            });
        }
        if let Some(spec) = p.spec {
            if spec.is_empty() || !spec.bytes().all(|b| b == b'0' || b == b'X') {
                return Err(TemplateError::InvalidSpec {
                    code: p.code.to_string(),
                    spec: spec.to_string(),
                });
            }
        }
    }
    if !found.iter().any(|p| p.code == codes::NUM_UE) {
        return Err(TemplateError::MissingNumberPlaceholder);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_bare_and_spec_tokens() {
        let found = placeholders("{TYPE_UE}-{NUM_UE:0000}");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].code, "TYPE_UE");
        assert_eq!(found[0].spec, None);
        assert_eq!(found[1].code, "NUM_UE");
        assert_eq!(found[1].spec, Some("0000"));
    }

    #[test]
    fn test_scan_offsets_cover_braces() {
        let template = "AB-{NUM_UE:00}-CD";
        let found = placeholders(template);
        assert_eq!(&template[found[0].start..found[0].end], "{NUM_UE:00}");
    }

    #[test]
    fn test_unterminated_brace_is_literal() {
        assert!(placeholders("CHA-{NUM_UE").is_empty());
        assert!(placeholders("{").is_empty());
    }

    #[test]
    fn test_nested_open_brace_restarts_scan() {
        let found = placeholders("{{NUM_UE}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "NUM_UE");
        assert_eq!(found[0].start, 1);
    }

    #[test]
    fn test_contains_code_is_exact_token_match() {
        assert!(contains_code("ID-{TYPE_UE}-2024", "TYPE_UE"));
        assert!(contains_code("{TYPE_UE:XXXX}", "TYPE_UE"));
        assert!(contains_code("{NUM_UE}-{TYPE_UE}", "TYPE_UE"));
        assert!(!contains_code("ID-2024", "TYPE_UE"));
        assert!(!contains_code("{TYPE_PARENT}", "TYPE_UE"));
        assert!(!contains_code("", "TYPE_UE"));
    }

    #[test]
    fn test_zero_pad_width() {
        assert_eq!(zero_pad_width(Some("0000")), Some(4));
        assert_eq!(zero_pad_width(Some("0")), Some(1));
        assert_eq!(zero_pad_width(Some("XXX")), None);
        assert_eq!(zero_pad_width(Some("0X0")), None);
        assert_eq!(zero_pad_width(Some("")), None);
        assert_eq!(zero_pad_width(None), None);
    }

    #[test]
    fn test_abbrev_width() {
        assert_eq!(abbrev_width(Some("XXXXX")), Some(5));
        assert_eq!(abbrev_width(Some("000")), None);
        assert_eq!(abbrev_width(Some("")), None);
        assert_eq!(abbrev_width(None), None);
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let out: Result<String, TemplateError> =
            substitute("{NUM_UE}-{TYPE_UE}-{NUM_UE:00}", "NUM_UE", |spec| {
                Ok(match spec {
                    Some(s) => format!("<{s}>"),
                    None => "<>".to_string(),
                })
            });
        assert_eq!(out.unwrap(), "<>-{TYPE_UE}-<00>");
    }

    #[test]
    fn test_substitute_without_match_is_identity() {
        let out: Result<String, TemplateError> =
            substitute("plain text", "NUM_UE", |_| Ok("x".to_string()));
        assert_eq!(out.unwrap(), "plain text");
    }

    #[test]
    fn test_validate_accepts_well_formed_template() {
        assert!(validate("{ID_UA}-{TYPE_UE:XXX}-{NUM_UE:0000}").is_ok());
        assert!(validate("{NUM_UE}").is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_code() {
        assert_eq!(
            validate("{NUM_UE}-{BOGUS}"),
            Err(TemplateError::UnknownPlaceholder {
                code: "BOGUS".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_spec() {
        assert_eq!(
            validate("{NUM_UE:0A0}"),
            Err(TemplateError::InvalidSpec {
                code: "NUM_UE".to_string(),
                spec: "0A0".to_string()
            })
        );
        assert_eq!(
            validate("{NUM_UE:}"),
            Err(TemplateError::InvalidSpec {
                code: "NUM_UE".to_string(),
                spec: String::new()
            })
        );
    }

    #[test]
    fn test_validate_requires_number_placeholder() {
        assert_eq!(
            validate("{TYPE_UE}-{ID_UA}"),
            Err(TemplateError::MissingNumberPlaceholder)
        );
    }
}
