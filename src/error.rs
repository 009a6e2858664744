//! Error types for model translation

use thiserror::Error;

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Model translation errors
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Object has no 'type' key")]
    MissingType,

    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("Unknown object type: {0}")]
    UnknownType(String),

    #[error("Missing field '{field}' on {object}")]
    MissingField { object: String, field: String },

    #[error("Field '{field}' on {object} is not a {expected}: {value}")]
    InvalidField {
        object: String,
        field: String,
        expected: &'static str,
        value: String,
    },

    #[error("No {kind} named '{name}' in the model{}", suggestion_suffix(.suggestion))]
    UnresolvedReference {
        kind: &'static str,
        name: String,
        suggestion: Option<String>,
    },

    #[error("Window construction '{construction}' has invalid layering: {reason}")]
    WindowLayers {
        construction: String,
        reason: String,
    },

    #[error("Model is not translatable: {0}")]
    NotTranslatable(String),

    #[error("Schema '{name}' failed to compile: {message}")]
    SchemaCompile { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),
}

impl TranslateError {
    /// Whether the error aborts a model translation outright.
    ///
    /// Non-fatal errors are recorded on the model and the offending
    /// object is skipped; fatal errors stop the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            TranslateError::UnresolvedReference { .. } | TranslateError::WindowLayers { .. }
        )
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_reference_formats_suggestion() {
        let err = TranslateError::UnresolvedReference {
            kind: "material",
            name: "Genric Brick".to_string(),
            suggestion: Some("Generic Brick".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "No material named 'Genric Brick' in the model (did you mean 'Generic Brick'?)"
        );

        let err = TranslateError::UnresolvedReference {
            kind: "construction",
            name: "Missing".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "No construction named 'Missing' in the model");
    }

    #[test]
    fn layer_errors_are_collected_not_fatal() {
        let unresolved = TranslateError::UnresolvedReference {
            kind: "material",
            name: "x".to_string(),
            suggestion: None,
        };
        assert!(!unresolved.is_fatal());

        let layering = TranslateError::WindowLayers {
            construction: "Double Pane".to_string(),
            reason: "gas gap cannot be the outermost layer".to_string(),
        };
        assert!(!layering.is_fatal());

        assert!(TranslateError::MissingType.is_fatal());
        assert!(TranslateError::UnknownType("Bogus".to_string()).is_fatal());
    }
}
