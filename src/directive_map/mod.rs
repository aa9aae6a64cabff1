//! Conversion map: which scalar identifiers get rewritten, and into what.
//!
//! A map is an ordered list of rules. Rule order is rewrite order, and the
//! directive order inside a rule is the order the directives are emitted in.
//! Maps are immutable once constructed; nullability is never recorded on a
//! rule, it is computed per rewrite from the matched text.
//!
//! Maps can be loaded from YAML:
//!
//! ```yaml
//! rules:
//!   - scalar: ID
//!     base_type: Int
//!     directives:
//!       primary: true
//!       auto: true
//!   - scalar: String
//!     base_type: String
//!     directives:
//!       type: "TEXT"
//! ```

pub mod errors;

use self::errors::DirectiveMapError;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Scalar identifiers must stay plain names so the generated match pattern
/// is always a literal followed by an optional `!`.
static SCALAR_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// A directive argument value. Booleans render unquoted, everything else is
/// wrapped in double quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    Bool(bool),
    Text(String),
}

impl DirectiveValue {
    pub fn render(&self) -> String {
        match self {
            DirectiveValue::Bool(b) => b.to_string(),
            DirectiveValue::Text(s) => format!("\"{}\"", s),
        }
    }
}

/// One rewrite rule: a scalar identifier, the base type that replaces it,
/// and the directive arguments attached to the replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarRule {
    /// Scalar type name to match (e.g. `ID`, `String`)
    pub scalar: String,
    /// Type name emitted in place of the scalar
    pub base_type: String,
    /// Directive arguments in emission order; `nullable` is appended at
    /// rewrite time and must not appear here
    #[serde(
        default,
        serialize_with = "directives_as_map",
        deserialize_with = "ordered_directives"
    )]
    pub directives: Vec<(String, DirectiveValue)>,
}

/// Ordered conversion table. Iteration order determines rewrite order when
/// multiple identifiers could match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionMap {
    rules: Vec<ScalarRule>,
}

impl ConversionMap {
    /// Build a map from rules, validating identifiers and rejecting duplicates.
    pub fn from_rules(rules: Vec<ScalarRule>) -> Result<Self, DirectiveMapError> {
        let map = Self { rules };
        map.check()?;
        Ok(map)
    }

    /// The reference table from the original tool: `ID` becomes an
    /// auto-increment primary key, `String` becomes a TEXT column.
    pub fn default_map() -> Self {
        Self {
            rules: vec![
                ScalarRule {
                    scalar: "ID".to_string(),
                    base_type: "Int".to_string(),
                    directives: vec![
                        ("primary".to_string(), DirectiveValue::Bool(true)),
                        ("auto".to_string(), DirectiveValue::Bool(true)),
                    ],
                },
                ScalarRule {
                    scalar: "String".to_string(),
                    base_type: "String".to_string(),
                    directives: vec![(
                        "type".to_string(),
                        DirectiveValue::Text("TEXT".to_string()),
                    )],
                },
            ],
        }
    }

    /// Load and validate a conversion map from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DirectiveMapError> {
        let map: Self = serde_yaml::from_str(yaml)?;
        map.check()?;
        Ok(map)
    }

    /// Load and validate a conversion map from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectiveMapError> {
        let contents = fs::read_to_string(&path).map_err(|e| DirectiveMapError::FileRead {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScalarRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn check(&self) -> Result<(), DirectiveMapError> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !SCALAR_IDENT.is_match(&rule.scalar) {
                return Err(DirectiveMapError::InvalidScalarIdentifier(
                    rule.scalar.clone(),
                ));
            }
            if rule.base_type.trim().is_empty() {
                return Err(DirectiveMapError::EmptyBaseType(rule.scalar.clone()));
            }
            if !seen.insert(rule.scalar.clone()) {
                return Err(DirectiveMapError::DuplicateScalar(rule.scalar.clone()));
            }
        }
        Ok(())
    }
}

/// Serialize directive pairs back into a YAML mapping, preserving order
fn directives_as_map<S>(
    pairs: &[(String, DirectiveValue)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (name, value) in pairs {
        map.serialize_entry(name, value)?;
    }
    map.end()
}

/// Deserialize a YAML mapping into pairs, preserving document order.
/// A plain HashMap would lose the order, and emission order is observable
/// in the rewritten schema.
fn ordered_directives<'de, D>(deserializer: D) -> Result<Vec<(String, DirectiveValue)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, DirectiveValue)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a mapping of directive names to values")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}
