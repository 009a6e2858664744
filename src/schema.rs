//! Schema object types and the embedded schema store

use include_dir::{include_dir, Dir};
use jsonschema::{Draft, JSONSchema};
use semver::Version;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Result, TranslateError};

/// Schema documents compiled into the binary
static EMBEDDED_SCHEMAS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/schemas");

static STORE: OnceLock<SchemaStore> = OnceLock::new();

/// Type discriminator carried by every schema object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// Opaque material with full thermal mass
    OpaqueMaterial,
    /// Opaque material described only by its R-value
    MasslessMaterial,
    /// Single glazing pane
    GlazingMaterial,
    /// Whole-window simple glazing system (U-factor + SHGC)
    SimpleGlazingMaterial,
    /// Gas gap between window panes
    GasGapMaterial,
    /// Window blind layer
    BlindMaterial,
    /// Window shade layer
    ShadeMaterial,
    /// Layered opaque construction
    OpaqueConstruction,
    /// Layered window construction
    WindowConstruction,
    /// Finish for shading surfaces
    ShadeConstruction,
    /// Zone with its bounding faces
    Room,
    /// Planar surface of a room
    Face,
    /// Window or skylight cut into a face
    Aperture,
    /// Context shading surface
    Shade,
    /// Whole model document
    Model,
}

impl ObjectType {
    /// Every type with a schema document, in a stable order
    pub const ALL: [ObjectType; 15] = [
        ObjectType::OpaqueMaterial,
        ObjectType::MasslessMaterial,
        ObjectType::GlazingMaterial,
        ObjectType::SimpleGlazingMaterial,
        ObjectType::GasGapMaterial,
        ObjectType::BlindMaterial,
        ObjectType::ShadeMaterial,
        ObjectType::OpaqueConstruction,
        ObjectType::WindowConstruction,
        ObjectType::ShadeConstruction,
        ObjectType::Room,
        ObjectType::Face,
        ObjectType::Aperture,
        ObjectType::Shade,
        ObjectType::Model,
    ];

    /// The `type` discriminator string carried in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::OpaqueMaterial => "OpaqueMaterial",
            ObjectType::MasslessMaterial => "MasslessMaterial",
            ObjectType::GlazingMaterial => "GlazingMaterial",
            ObjectType::SimpleGlazingMaterial => "SimpleGlazingMaterial",
            ObjectType::GasGapMaterial => "GasGapMaterial",
            ObjectType::BlindMaterial => "BlindMaterial",
            ObjectType::ShadeMaterial => "ShadeMaterial",
            ObjectType::OpaqueConstruction => "OpaqueConstruction",
            ObjectType::WindowConstruction => "WindowConstruction",
            ObjectType::ShadeConstruction => "ShadeConstruction",
            ObjectType::Room => "Room",
            ObjectType::Face => "Face",
            ObjectType::Aperture => "Aperture",
            ObjectType::Shade => "Shade",
            ObjectType::Model => "Model",
        }
    }

    /// Schema document file name under `schemas/`
    pub fn schema_file(&self) -> &'static str {
        match self {
            ObjectType::OpaqueMaterial => "opaque_material.schema.json",
            ObjectType::MasslessMaterial => "massless_material.schema.json",
            ObjectType::GlazingMaterial => "glazing_material.schema.json",
            ObjectType::SimpleGlazingMaterial => "simple_glazing_material.schema.json",
            ObjectType::GasGapMaterial => "gas_gap_material.schema.json",
            ObjectType::BlindMaterial => "blind_material.schema.json",
            ObjectType::ShadeMaterial => "shade_material.schema.json",
            ObjectType::OpaqueConstruction => "opaque_construction.schema.json",
            ObjectType::WindowConstruction => "window_construction.schema.json",
            ObjectType::ShadeConstruction => "shade_construction.schema.json",
            ObjectType::Room => "room.schema.json",
            ObjectType::Face => "face.schema.json",
            ObjectType::Aperture => "aperture.schema.json",
            ObjectType::Shade => "shade.schema.json",
            ObjectType::Model => "model.schema.json",
        }
    }

    /// Parse a discriminator string
    pub fn parse(s: &str) -> Option<ObjectType> {
        ObjectType::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Manifest describing a schema set
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemaManifest {
    version: Version,
}

/// Compiled JSON Schemas for every object type
pub struct SchemaStore {
    schemas: HashMap<ObjectType, JSONSchema>,
    version: Version,
    fingerprint: String,
}

impl SchemaStore {
    /// Compile the schema set embedded in the crate
    pub fn embedded() -> Result<Self> {
        let mut documents = Vec::with_capacity(ObjectType::ALL.len());
        for ty in ObjectType::ALL {
            let content = EMBEDDED_SCHEMAS
                .get_file(ty.schema_file())
                .and_then(|f| f.contents_utf8())
                .ok_or_else(|| TranslateError::SchemaCompile {
                    name: ty.as_str().to_string(),
                    message: format!("embedded document '{}' is missing", ty.schema_file()),
                })?;
            documents.push((ty, content.to_string()));
        }
        let manifest = EMBEDDED_SCHEMAS
            .get_file("manifest.json")
            .and_then(|f| f.contents_utf8())
            .ok_or_else(|| TranslateError::SchemaCompile {
                name: "manifest".to_string(),
                message: "embedded manifest.json is missing".to_string(),
            })?;
        Self::from_documents(documents, manifest)
    }

    /// Compile a schema set from a directory on disk.
    ///
    /// The directory must carry one document per object type plus a
    /// `manifest.json`, named exactly as the embedded set names them.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut documents = Vec::with_capacity(ObjectType::ALL.len());
        for ty in ObjectType::ALL {
            let content = fs::read_to_string(dir.join(ty.schema_file()))?;
            documents.push((ty, content));
        }
        let manifest = fs::read_to_string(dir.join("manifest.json"))?;
        Self::from_documents(documents, &manifest)
    }

    fn from_documents(documents: Vec<(ObjectType, String)>, manifest: &str) -> Result<Self> {
        let mut hasher = Sha256::new();
        let mut schemas = HashMap::with_capacity(documents.len());
        for (ty, content) in &documents {
            hasher.update(content.as_bytes());
            let value: serde_json::Value = serde_json::from_str(content)?;
            let compiled = JSONSchema::options()
                .with_draft(Draft::Draft7)
                .compile(&value)
                .map_err(|e| TranslateError::SchemaCompile {
                    name: ty.as_str().to_string(),
                    message: e.to_string(),
                })?;
            schemas.insert(*ty, compiled);
        }
        hasher.update(manifest.as_bytes());
        let manifest: SchemaManifest = serde_json::from_str(manifest)?;

        Ok(Self {
            schemas,
            version: manifest.version,
            fingerprint: format!("{:x}", hasher.finalize()),
        })
    }

    /// Validate an instance against the schema for `object_type`.
    ///
    /// Returns one formatted issue per violation, prefixed with the
    /// instance path where one exists. An empty list means valid.
    pub fn validate(&self, object_type: ObjectType, instance: &serde_json::Value) -> Vec<String> {
        let Some(schema) = self.schemas.get(&object_type) else {
            return vec![format!("no schema compiled for {object_type}")];
        };
        match schema.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{path}: {e}")
                    }
                })
                .collect(),
        }
    }

    /// Semver version of the schema set, from its manifest
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// SHA256 hex fingerprint of the schema documents
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Shared store compiled from the embedded schema set.
///
/// Compiled on first use and reused for the life of the process.
pub fn store() -> Result<&'static SchemaStore> {
    if let Some(store) = STORE.get() {
        return Ok(store);
    }
    let built = SchemaStore::embedded()?;
    Ok(STORE.get_or_init(|| built))
}

/// Make `dir` the shared schema set instead of the embedded one.
///
/// Must run before the first [`store`] call; once the embedded set has been
/// compiled and shared it cannot be replaced.
pub fn use_schema_dir(dir: &Path) -> Result<()> {
    let built = SchemaStore::from_dir(dir)?;
    STORE.set(built).map_err(|_| TranslateError::SchemaCompile {
        name: "store".to_string(),
        message: "schema store already initialized".to_string(),
    })
}
