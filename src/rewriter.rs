//! Scalar Directive Rewriter
//!
//! Rewrites scalar type references in a GraphQL schema string into
//! directive-annotated type references. For each rule, the first occurrence
//! of the scalar identifier (with an optional trailing `!` non-null marker)
//! becomes `<baseType> @sql(<directives>, nullable: <bool>)`.
//!
//! Only the first occurrence per identifier is rewritten per pass; later
//! occurrences of the same scalar are left untouched.

use crate::directive_map::{ConversionMap, DirectiveValue, ScalarRule};
use regex::Regex;

/// Result of rewriting a schema against a conversion map
#[derive(Debug)]
pub struct RewriteResult {
    /// The rewritten schema (or the original if nothing matched)
    pub schema: String,
    /// Scalar identifiers that matched, in rewrite order
    pub rewritten: Vec<String>,
}

/// Rewrite the first occurrence of `rule.scalar` (optionally followed by `!`)
/// into an `@sql`-annotated type reference. No match returns the input
/// unchanged; absence of a match is not a failure.
pub fn rewrite_scalar(schema: &str, rule: &ScalarRule) -> String {
    // regex::escape yields a literal pattern, which always compiles
    let pattern = Regex::new(&format!("{}(!)?", regex::escape(&rule.scalar)))
        .expect("escaped scalar pattern");

    let Some(caps) = pattern.captures(schema) else {
        return schema.to_string();
    };
    let matched = caps.get(0).unwrap();
    // The `!` marker means the field is required, so the column is not nullable
    let is_required = caps.get(1).is_some();

    let replacement = format!(
        "{} @sql({})",
        rule.base_type,
        render_directives(&rule.directives, !is_required)
    );

    let mut result = schema.to_string();
    result.replace_range(matched.range(), &replacement);
    result
}

/// Apply every rule in the map once, in map order, threading the schema text
/// through each step. A later rule may match inside text produced by an
/// earlier rule's rewrite.
pub fn map_identifiers_to_directives(schema: &str, map: &ConversionMap) -> RewriteResult {
    let mut current = schema.to_string();
    let mut rewritten = Vec::new();

    for rule in map.iter() {
        let next = rewrite_scalar(&current, rule);
        if next != current {
            log::debug!(
                "scalar rewrite: {} -> {} @sql(...)",
                rule.scalar,
                rule.base_type
            );
            rewritten.push(rule.scalar.clone());
        }
        current = next;
    }

    RewriteResult {
        schema: current,
        rewritten,
    }
}

/// Serialize directive pairs as `key: value` joined by `, `, with the
/// computed `nullable` flag always appended last.
fn render_directives(directives: &[(String, DirectiveValue)], nullable: bool) -> String {
    let mut parts: Vec<String> = directives
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.render()))
        .collect();
    parts.push(format!("nullable: {}", nullable));
    parts.join(", ")
}
