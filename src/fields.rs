//! Typed access to the symbolic-key mappings of schema objects
//!
//! Every adapter reads its fields through a [`FieldMap`], which carries the
//! owning object's display label so field errors name their origin. Numeric
//! accessors coerce JSON integers, floats, and numeric strings to `f64`;
//! range checking is left to the JSON Schemas and the sim setters.

use serde_json::Value;

use crate::error::{Result, TranslateError};

const EMPTY: &[Value] = &[];

/// View over one schema object's key/value mapping
pub struct FieldMap<'a> {
    object: String,
    value: &'a Value,
}

impl<'a> FieldMap<'a> {
    /// Wrap a mapping, labeling it for error messages
    pub fn new(object: impl Into<String>, value: &'a Value) -> Self {
        Self {
            object: object.into(),
            value,
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.value.get(field)
    }

    fn missing(&self, field: &str) -> TranslateError {
        TranslateError::MissingField {
            object: self.object.clone(),
            field: field.to_string(),
        }
    }

    fn invalid(&self, field: &str, expected: &'static str, value: &Value) -> TranslateError {
        TranslateError::InvalidField {
            object: self.object.clone(),
            field: field.to_string(),
            expected,
            value: value.to_string(),
        }
    }

    /// Error for a field whose value is outside its enumeration
    pub fn unknown_variant(&self, field: &str, value: &str) -> TranslateError {
        TranslateError::InvalidField {
            object: self.object.clone(),
            field: field.to_string(),
            expected: "known variant",
            value: value.to_string(),
        }
    }

    /// Required string field
    pub fn str(&self, field: &str) -> Result<&'a str> {
        match self.get(field) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(self.invalid(field, "string", other)),
            None => Err(self.missing(field)),
        }
    }

    /// Optional string field
    pub fn opt_str(&self, field: &str) -> Result<Option<&'a str>> {
        match self.get(field) {
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.invalid(field, "string", other)),
            None => Ok(None),
        }
    }

    /// Optional string field with a default
    pub fn str_or(&self, field: &str, default: &'a str) -> Result<&'a str> {
        Ok(self.opt_str(field)?.unwrap_or(default))
    }

    /// Required numeric field, coerced to `f64`
    pub fn f64(&self, field: &str) -> Result<f64> {
        match self.get(field) {
            Some(value) => as_f64(value).ok_or_else(|| self.invalid(field, "number", value)),
            None => Err(self.missing(field)),
        }
    }

    /// Optional numeric field with a default, coerced to `f64`
    pub fn f64_or(&self, field: &str, default: f64) -> Result<f64> {
        match self.get(field) {
            Some(value) => as_f64(value).ok_or_else(|| self.invalid(field, "number", value)),
            None => Ok(default),
        }
    }

    /// Optional boolean field with a default
    pub fn bool_or(&self, field: &str, default: bool) -> Result<bool> {
        match self.get(field) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(field, "boolean", other)),
            None => Ok(default),
        }
    }

    /// Optional unsigned integer field with a default
    pub fn u32_or(&self, field: &str, default: u32) -> Result<u32> {
        match self.get(field) {
            Some(value) => as_u32(value).ok_or_else(|| self.invalid(field, "integer", value)),
            None => Ok(default),
        }
    }

    /// Required array field
    pub fn array(&self, field: &str) -> Result<&'a [Value]> {
        match self.get(field) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(self.invalid(field, "array", other)),
            None => Err(self.missing(field)),
        }
    }

    /// Optional array field, absent means empty
    pub fn array_or_empty(&self, field: &str) -> Result<&'a [Value]> {
        match self.get(field) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(self.invalid(field, "array", other)),
            None => Ok(EMPTY),
        }
    }

    /// Required array of strings
    pub fn str_array(&self, field: &str) -> Result<Vec<&'a str>> {
        self.array(field)?
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.as_str()),
                other => Err(self.invalid(field, "array of strings", other)),
            })
            .collect()
    }

    /// Raw value, for nested objects the adapter walks itself
    pub fn value(&self, field: &str) -> Option<&'a Value> {
        self.get(field)
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_integers_and_numeric_strings() {
        let v = json!({"thickness": 1, "density": "1920.5", "r_value": 2.5});
        let fields = FieldMap::new("OpaqueMaterial 'x'", &v);
        assert_eq!(fields.f64("thickness").unwrap(), 1.0);
        assert_eq!(fields.f64("density").unwrap(), 1920.5);
        assert_eq!(fields.f64("r_value").unwrap(), 2.5);
    }

    #[test]
    fn missing_required_field_names_object_and_field() {
        let v = json!({});
        let fields = FieldMap::new("OpaqueMaterial 'Generic Brick'", &v);
        let err = fields.f64("thickness").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing field 'thickness' on OpaqueMaterial 'Generic Brick'"
        );
    }

    #[test]
    fn non_numeric_value_is_invalid() {
        let v = json!({"thickness": [1, 2]});
        let fields = FieldMap::new("OpaqueMaterial 'x'", &v);
        let err = fields.f64("thickness").unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn defaults_apply_when_absent() {
        let v = json!({});
        let fields = FieldMap::new("GlazingMaterial 'x'", &v);
        assert_eq!(fields.f64_or("thickness", 0.003).unwrap(), 0.003);
        assert_eq!(fields.str_or("roughness", "MediumRough").unwrap(), "MediumRough");
        assert!(!fields.bool_or("solar_diffusing", false).unwrap());
        assert_eq!(fields.u32_or("multiplier", 1).unwrap(), 1);
        assert!(fields.array_or_empty("apertures").unwrap().is_empty());
    }

    #[test]
    fn str_array_rejects_mixed_items() {
        let v = json!({"layers": ["Generic Brick", 4]});
        let fields = FieldMap::new("OpaqueConstruction 'x'", &v);
        assert!(fields.str_array("layers").is_err());

        let v = json!({"layers": ["Outer", "Inner"]});
        let fields = FieldMap::new("OpaqueConstruction 'x'", &v);
        assert_eq!(fields.str_array("layers").unwrap(), vec!["Outer", "Inner"]);
    }

    #[test]
    fn unknown_variant_error_names_the_field() {
        let v = json!({"roughness": "Shiny"});
        let fields = FieldMap::new("OpaqueMaterial 'x'", &v);
        let err = fields.unknown_variant("roughness", "Shiny");
        assert_eq!(
            err.to_string(),
            "Field 'roughness' on OpaqueMaterial 'x' is not a known variant: Shiny"
        );
    }
}
