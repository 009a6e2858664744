//! Whole-model translator.
//!
//! Drives the per-type adapters over a complete model document in dependency
//! order: materials, then constructions, then rooms, then orphaned shades.
//! Non-fatal issues accumulate on the model across a run; fatal ones abort it.

use semver::Version;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::rooms::{Room, Shade};
use super::{constructions, materials, EnergyObject, RawObject};
use crate::error::{Result, TranslateError};
use crate::schema::{self, ObjectType, SchemaStore};
use crate::sim;

const EMPTY: &[Value] = &[];

const MATERIALS: &str = "/properties/energy/materials";
const CONSTRUCTIONS: &str = "/properties/energy/constructions";
const ROOMS: &str = "/rooms";
const SHADES: &str = "/orphaned_shades";

/// Orphaned geometry has no parent to anchor it in the target model.
const ORPHAN_SECTIONS: [(&str, &str); 3] = [
    ("/orphaned_faces", "faces"),
    ("/orphaned_apertures", "apertures"),
    ("/orphaned_doors", "doors"),
];

/// A complete model document and the issues collected while translating it.
#[derive(Debug)]
pub struct EnergyModel {
    raw: RawObject,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl EnergyModel {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::Model, value)?,
            errors: Vec::new(),
            warnings: Vec::new(),
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::Model, path)?,
            errors: Vec::new(),
            warnings: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.raw.name()
    }

    /// The semver the document claims to be written against, if any.
    pub fn schema_version(&self) -> Result<Option<Version>> {
        match self.raw.fields().opt_str("schema_version")? {
            Some(s) => Ok(Some(Version::parse(s)?)),
            None => Ok(None),
        }
    }

    pub fn materials(&self) -> &[Value] {
        section(self.raw.as_value(), MATERIALS)
    }

    pub fn constructions(&self) -> &[Value] {
        section(self.raw.as_value(), CONSTRUCTIONS)
    }

    pub fn rooms(&self) -> &[Value] {
        section(self.raw.as_value(), ROOMS)
    }

    pub fn orphaned_shades(&self) -> &[Value] {
        section(self.raw.as_value(), SHADES)
    }

    /// Non-fatal errors collected by the most recent translation run.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Soft notes collected by the most recent translation run.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Validate the document and every nested object against its schema.
    ///
    /// Issues are JSON-pointer prefixed so a reader can find the offending
    /// object in the document. Nothing here stops a later translation.
    pub fn validation_errors(&self) -> Result<Vec<String>> {
        let store = schema::store()?;
        let mut issues = self.raw.validation_errors()?;

        match self.schema_version() {
            Ok(Some(version)) => {
                let supported = store.version();
                if version.major != supported.major {
                    issues.push(format!(
                        "/schema_version: document version {version} does not match \
                         the supported schema set {supported}"
                    ));
                }
            }
            Ok(None) => {}
            Err(_) => {
                if let Some(claimed) = self.raw.as_value().get("schema_version") {
                    issues.push(format!(
                        "/schema_version: {claimed} is not a valid semver"
                    ));
                }
            }
        }

        let document = self.raw.as_value();
        nested_issues(store, section(document, MATERIALS), MATERIALS, &mut issues);

        let constructions = section(document, CONSTRUCTIONS);
        nested_issues(store, constructions, CONSTRUCTIONS, &mut issues);
        for (index, construction) in constructions.iter().enumerate() {
            let at = format!("{CONSTRUCTIONS}/{index}/materials");
            nested_issues(store, section(construction, "/materials"), &at, &mut issues);
        }

        let rooms = section(document, ROOMS);
        nested_issues(store, rooms, ROOMS, &mut issues);
        for (i, room) in rooms.iter().enumerate() {
            let faces = section(room, "/faces");
            let faces_at = format!("{ROOMS}/{i}/faces");
            nested_issues(store, faces, &faces_at, &mut issues);
            for (j, face) in faces.iter().enumerate() {
                let apertures_at = format!("{faces_at}/{j}/apertures");
                nested_issues(store, section(face, "/apertures"), &apertures_at, &mut issues);
            }
        }

        nested_issues(store, section(document, SHADES), SHADES, &mut issues);
        Ok(issues)
    }

    pub fn is_valid(&self) -> Result<bool> {
        Ok(self.validation_errors()?.is_empty())
    }

    /// Translate every section of the document into `model`.
    ///
    /// Clears `errors`/`warnings` first, so the lists always describe the
    /// latest run. Objects already present in the target by name are reused.
    pub fn translate_into(&mut self, model: &mut sim::Model) -> Result<()> {
        self.errors.clear();
        self.warnings.clear();

        let document = self.raw.as_value();
        for (pointer, label) in ORPHAN_SECTIONS {
            let count = section(document, pointer).len();
            if count > 0 {
                return Err(TranslateError::NotTranslatable(format!(
                    "contains orphaned {label} ({count})"
                )));
            }
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let outcome = run_translation(&self.raw, model, &mut errors, &mut warnings);
        self.errors = errors;
        self.warnings = warnings;
        outcome
    }

    /// Translate into a fresh model.
    pub fn to_sim_model(&mut self) -> Result<sim::Model> {
        let mut model = sim::Model::new();
        self.translate_into(&mut model)?;
        Ok(model)
    }
}

fn run_translation(
    raw: &RawObject,
    model: &mut sim::Model,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) -> Result<()> {
    let document = raw.as_value();
    let material_values = section(document, MATERIALS);
    let construction_values = section(document, CONSTRUCTIONS);
    let room_values = section(document, ROOMS);
    let shade_values = section(document, SHADES);
    debug!(
        materials = material_values.len(),
        constructions = construction_values.len(),
        rooms = room_values.len(),
        orphaned_shades = shade_values.len(),
        "translating model sections"
    );

    for value in material_values {
        record(materials::translate_any(value, model), errors)?;
    }
    for value in construction_values {
        record(constructions::translate_any(value, model), errors)?;
    }
    for value in room_values {
        record(
            Room::from_value(value.clone()).and_then(|room| room.translate(model)),
            errors,
        )?;
    }
    for value in shade_values {
        if value.get("construction").is_none() {
            warnings.push(format!(
                "Shade '{}' has no construction; default reflectances apply",
                object_name(value)
            ));
        }
        record(
            Shade::from_value(value.clone()).and_then(|shade| shade.translate(model)),
            errors,
        )?;
    }
    Ok(())
}

/// Collect a non-fatal outcome, propagate a fatal one.
fn record(outcome: Result<sim::Handle>, errors: &mut Vec<String>) -> Result<()> {
    match outcome {
        Ok(_) => Ok(()),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => {
            debug!(error = %err, "skipping object");
            errors.push(err.to_string());
            Ok(())
        }
    }
}

fn section<'v>(value: &'v Value, pointer: &str) -> &'v [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(EMPTY)
}

fn object_name(value: &Value) -> &str {
    value.get("name").and_then(Value::as_str).unwrap_or("unnamed")
}

/// Validate the objects of one document section against their own schemas.
fn nested_issues(store: &SchemaStore, objects: &[Value], prefix: &str, issues: &mut Vec<String>) {
    for (index, value) in objects.iter().enumerate() {
        let at = format!("{prefix}/{index}");
        match value.get("type").and_then(Value::as_str) {
            None => issues.push(format!("{at}: object has no 'type' key")),
            Some(type_name) => match ObjectType::parse(type_name) {
                Some(object_type) => {
                    for issue in store.validate(object_type, value) {
                        issues.push(prefixed(&at, &issue));
                    }
                }
                None => issues.push(format!("{at}: unknown object type '{type_name}'")),
            },
        }
    }
}

fn prefixed(at: &str, issue: &str) -> String {
    if issue.starts_with('/') {
        format!("{at}{issue}")
    } else {
        format!("{at}: {issue}")
    }
}
