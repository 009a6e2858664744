//! Translation of schema objects onto the simulation model
//!
//! Every schema type follows the same three steps: parse the raw mapping
//! and verify its `type` discriminator, validate against the compiled JSON
//! Schema for the type, then find-or-create the native object on the target
//! model. The [`EnergyObject`] trait captures the pattern once; per-type
//! adapters supply only the name lookup and the field transcription.

pub mod constructions;
pub mod materials;
pub mod model;
pub mod rooms;
pub mod window;

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{Result, TranslateError};
use crate::fields::FieldMap;
use crate::schema::{self, ObjectType};
use crate::sim;

/// A parsed schema object: its verified discriminator plus the raw mapping
#[derive(Debug, Clone)]
pub struct RawObject {
    object_type: ObjectType,
    value: Value,
}

impl RawObject {
    /// Parse a JSON value, requiring the given discriminator.
    ///
    /// A missing `type` key and a wrong discriminator are both fatal; they
    /// are never collected the way schema violations are.
    pub fn from_value(expected: ObjectType, value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(TranslateError::TypeMismatch {
                expected: expected.as_str(),
                found: value_kind(&value).to_string(),
            });
        }
        let found = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(TranslateError::MissingType)?;
        if found != expected.as_str() {
            return Err(TranslateError::TypeMismatch {
                expected: expected.as_str(),
                found: found.to_string(),
            });
        }
        Ok(Self {
            object_type: expected,
            value,
        })
    }

    /// Read a JSON document from disk, requiring the given discriminator
    pub fn read_from_disk(expected: ObjectType, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        Self::from_value(expected, value)
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// The object's name, or `unnamed` when absent
    pub fn name(&self) -> &str {
        self.value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("unnamed")
    }

    /// Display label used in error messages
    pub fn label(&self) -> String {
        format!("{} '{}'", self.object_type, self.name())
    }

    /// Typed field access carrying this object's label on errors
    pub fn fields(&self) -> FieldMap<'_> {
        FieldMap::new(self.label(), &self.value)
    }

    /// The raw mapping
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Issues from checking the raw mapping against this type's schema.
    ///
    /// An empty list means valid. Violations are collected, never raised.
    pub fn validation_errors(&self) -> Result<Vec<String>> {
        Ok(schema::store()?.validate(self.object_type, &self.value))
    }
}

/// The shared parse / validate / find-or-create pattern
pub trait EnergyObject: Sized {
    /// Discriminator this adapter accepts
    const TYPE: ObjectType;

    /// The parsed raw object
    fn raw(&self) -> &RawObject;

    /// Name identifying the native object on the target model
    fn name(&self) -> &str {
        self.raw().name()
    }

    /// Look up an already materialized counterpart by name
    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle>;

    /// Materialize a new native object, transcribing every schema field
    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle>;

    /// Issues from checking the raw mapping against this type's schema
    fn validation_errors(&self) -> Result<Vec<String>> {
        self.raw().validation_errors()
    }

    /// Whether the raw mapping passes its schema
    fn is_valid(&self) -> Result<bool> {
        Ok(self.validation_errors()?.is_empty())
    }

    /// Find-or-create against the target model.
    ///
    /// Translating the same named object twice returns the handle of the
    /// object created the first time; nothing is duplicated.
    fn translate(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        if let Some(existing) = self.find_existing(model) {
            tracing::debug!(
                object_type = %Self::TYPE,
                name = self.name(),
                "reusing existing sim object"
            );
            return Ok(existing);
        }
        self.create(model)
    }
}

/// Closest candidate to `target`, for "did you mean" suggestions
pub(crate) fn closest_name<'a>(
    target: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    use fuzzy_matcher::skim::SkimMatcherV2;
    use fuzzy_matcher::FuzzyMatcher;

    let matcher = SkimMatcherV2::default();
    let mut best: Option<(i64, &str)> = None;
    for candidate in candidates {
        if let Some(score) = matcher.fuzzy_match(candidate, target) {
            if best.map(|(s, _)| score > s).unwrap_or(true) {
                best = Some((score, candidate));
            }
        }
    }
    best.map(|(_, name)| name.to_string())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
