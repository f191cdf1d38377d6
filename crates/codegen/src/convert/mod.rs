//! Conversion of specification facets into schema fragments.
//!
//! Each converter owns the facet it was built from and renders it with
//! `schema()`. An absent facet renders as the empty string, so a node can
//! concatenate every converter in a fixed order without branching.

mod custom_type;
mod default;
mod element_type;
mod primitive;
mod validators;

pub use custom_type::{CustomTypeFacet, CustomTypeNestedObject, value_type_imports};
pub use default::{DefaultFacet, StaticDefault};
pub use element_type::{AttributeTypesFacet, ElementTypeFacet};
pub use primitive::{ComputedOptionalRequired, DeprecationMessage, Description, Sensitive};
pub use validators::{CollectionKind, PlanModifiersCustom, ValidatorsCustom};

use std::fmt::Write;

/// Render `value` as a double-quoted Go string literal
#[must_use]
pub fn go_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
