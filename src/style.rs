//! Style Rule Transformer
//!
//! Converts one CSS-flavoured property map into a platform style map. The
//! rename, allow-list and unit logic lives in [`resolve_property`]; the two
//! output modes only differ in how a resolved value is materialized:
//!
//! - [`transform_rule_values`] works on plain evaluated values,
//! - [`transform_rule_ast`] works on expression nodes and keeps opaque
//!   expressions untouched for re-insertion into the tree.

use lazy_static::lazy_static;
use oxc_allocator::CloneIn;
use oxc_ast::ast::Expression;
use oxc_ast::AstBuilder;
use oxc_span::SPAN;
use oxc_syntax::number::NumberBase;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::ConversionTables;

pub const PIXEL_SUFFIX: &str = "px";
pub const VIEWPORT_HEIGHT_SUFFIX: &str = "vh";
pub const VIEWPORT_WIDTH_SUFFIX: &str = "vw";
pub const FLEX_PROPERTY: &str = "flex";
const HEIGHT_PROPERTY: &str = "height";
const WIDTH_PROPERTY: &str = "width";
const BACKGROUND_ALIAS: &str = "background";
const BACKGROUND_COLOR: &str = "backgroundColor";

lazy_static! {
    static ref KEBAB_SEGMENT_RE: Regex = Regex::new(r"-([a-z])").unwrap();
    static ref FLOAT_PREFIX_RE: Regex =
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// STYLE MAP
// ═══════════════════════════════════════════════════════════════════════════════

/// Insertion-ordered property map. Re-inserting a key overwrites the value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for StyleMap<V> {
    fn default() -> Self {
        StyleMap {
            entries: Vec::new(),
        }
    }
}

impl<V> StyleMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> IntoIterator for StyleMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for StyleMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for StyleMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Evaluated style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for StyleValue {
    /// Whole numbers are written as integers, the way a JS number prints.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Text(s) => serializer.serialize_str(s),
            StyleValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            StyleValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl StyleValue {
    fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Outcome for one source property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyResolution {
    Drop,
    /// Replace with a single `flex: 1`
    Flex,
    /// Carry the original value under `name`
    Keep { name: String },
    /// Pixel length converted to its magnitude
    Pixels { name: String, value: f64 },
}

/// `font-size` → `fontSize`. Only a dash followed by a lowercase letter is merged.
pub fn camel_case(property: &str) -> String {
    KEBAB_SEGMENT_RE
        .replace_all(property, |caps: &regex::Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Leading float of `text` as JavaScript's `parseFloat` reads it; NaN if none.
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    FLOAT_PREFIX_RE
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Target name for `property`, or `None` when it is dropped.
pub fn resolve_property_name(tables: &ConversionTables, property: &str) -> Option<String> {
    let name = match tables.property_renames.get(property) {
        Some(mapped) if mapped.is_empty() => return None,
        Some(mapped) => mapped.clone(),
        None => {
            let camel = camel_case(property);
            if !tables.allowed_properties.contains(&camel) {
                return None;
            }
            camel
        }
    };

    if name == BACKGROUND_ALIAS {
        Some(BACKGROUND_COLOR.to_string())
    } else {
        Some(name)
    }
}

/// Decide what happens to `property`. `text` is the value when it is a string literal.
pub fn resolve_property(
    tables: &ConversionTables,
    property: &str,
    text: Option<&str>,
) -> PropertyResolution {
    let Some(name) = resolve_property_name(tables, property) else {
        return PropertyResolution::Drop;
    };

    match text {
        Some(t) if t.ends_with(PIXEL_SUFFIX) => {
            let magnitude = parse_float_prefix(&t[..t.len() - PIXEL_SUFFIX.len()]);
            if magnitude.is_nan() {
                tracing::warn!(property, value = t, "pixel value has no numeric prefix, emitting NaN");
            }
            PropertyResolution::Pixels {
                name,
                value: magnitude,
            }
        }
        Some(t) if t.ends_with(VIEWPORT_HEIGHT_SUFFIX) && name == HEIGHT_PROPERTY => {
            PropertyResolution::Flex
        }
        Some(t) if t.ends_with(VIEWPORT_WIDTH_SUFFIX) && name == WIDTH_PROPERTY => {
            PropertyResolution::Flex
        }
        _ => PropertyResolution::Keep { name },
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT MODES
// ═══════════════════════════════════════════════════════════════════════════════

pub fn transform_rule_values(
    tables: &ConversionTables,
    rule: &StyleMap<StyleValue>,
) -> StyleMap<StyleValue> {
    let mut out = StyleMap::new();
    for (property, value) in rule.iter() {
        match resolve_property(tables, property, value.as_text()) {
            PropertyResolution::Drop => {}
            PropertyResolution::Flex => out.insert(FLEX_PROPERTY, StyleValue::Number(1.0)),
            PropertyResolution::Keep { name } => out.insert(name, value.clone()),
            PropertyResolution::Pixels { name, value } => {
                out.insert(name, StyleValue::Number(value))
            }
        }
    }
    out
}

fn number<'a>(ast: AstBuilder<'a>, value: f64) -> Expression<'a> {
    ast.expression_numeric_literal(SPAN, value, None, NumberBase::Decimal)
}

pub fn transform_rule_ast<'a>(
    ast: AstBuilder<'a>,
    tables: &ConversionTables,
    rule: &StyleMap<&Expression<'a>>,
) -> StyleMap<Expression<'a>> {
    let mut out = StyleMap::new();
    for (property, value) in rule.iter() {
        let value: &Expression<'a> = value;
        let text = match value {
            Expression::StringLiteral(s) => Some(s.value.as_str()),
            _ => None,
        };
        match resolve_property(tables, property, text) {
            PropertyResolution::Drop => {
                tracing::debug!(property, "dropping unsupported style property");
            }
            PropertyResolution::Flex => out.insert(FLEX_PROPERTY, number(ast, 1.0)),
            PropertyResolution::Keep { name } => {
                out.insert(name, value.clone_in(ast.allocator))
            }
            PropertyResolution::Pixels { name, value } => out.insert(name, number(ast, value)),
        }
    }
    out
}
