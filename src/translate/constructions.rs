//! Construction adapters: opaque and window layer stacks, shade finishes.
//!
//! Layered constructions carry their own `materials` array of full material
//! objects. Those are materialized first (deduplicated by name), then the
//! `layers` name list is resolved against the model's layer store.

use serde_json::Value;
use std::path::Path;

use super::{closest_name, materials, EnergyObject, RawObject};
use crate::error::{Result, TranslateError};
use crate::schema::ObjectType;
use crate::sim;

/// Opaque layer stack referencing materials by name
pub struct OpaqueConstruction {
    raw: RawObject,
}

impl OpaqueConstruction {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::OpaqueConstruction, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::OpaqueConstruction, path)?,
        })
    }
}

impl EnergyObject for OpaqueConstruction {
    const TYPE: ObjectType = ObjectType::OpaqueConstruction;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.construction_by_name(self.name()).map(|c| c.handle())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let layers = resolve_layers(&self.raw, model)?;
        let mut construction = sim::Construction::new(self.raw.fields().str("name")?);
        construction.set_layers(layers);
        Ok(model.add_construction(construction))
    }
}

/// Window layer stack of glazing, gas gaps, blinds and shades
pub struct WindowConstruction {
    raw: RawObject,
}

impl WindowConstruction {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::WindowConstruction, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::WindowConstruction, path)?,
        })
    }
}

impl EnergyObject for WindowConstruction {
    const TYPE: ObjectType = ObjectType::WindowConstruction;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.construction_by_name(self.name()).map(|c| c.handle())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let layers = resolve_layers(&self.raw, model)?;
        if let Some(reason) = gas_gap_violation(model, &layers) {
            return Err(TranslateError::WindowLayers {
                construction: self.name().to_string(),
                reason,
            });
        }
        let mut construction = sim::Construction::new(self.raw.fields().str("name")?);
        construction.set_layers(layers);
        Ok(model.add_construction(construction))
    }
}

/// Reflectance finish applied to shading surfaces
pub struct ShadeConstruction {
    raw: RawObject,
}

impl ShadeConstruction {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::ShadeConstruction, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::ShadeConstruction, path)?,
        })
    }
}

impl EnergyObject for ShadeConstruction {
    const TYPE: ObjectType = ObjectType::ShadeConstruction;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.shade_finish_by_name(self.name()).map(|f| f.handle())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut finish = sim::ShadeFinish::new(fields.str("name")?);
        finish.set_solar_reflectance(fields.f64_or("solar_reflectance", 0.2)?);
        finish.set_visible_reflectance(fields.f64_or("visible_reflectance", 0.2)?);
        finish.set_is_specular(fields.bool_or("is_specular", false)?);
        Ok(model.add_shade_finish(finish))
    }
}

/// Translate any construction object, dispatching on its `type` key.
pub fn translate_any(value: &Value, model: &mut sim::Model) -> Result<sim::Handle> {
    let type_name = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(TranslateError::MissingType)?;
    match type_name {
        "OpaqueConstruction" => OpaqueConstruction::from_value(value.clone())?.translate(model),
        "WindowConstruction" => WindowConstruction::from_value(value.clone())?.translate(model),
        "ShadeConstruction" => ShadeConstruction::from_value(value.clone())?.translate(model),
        other => Err(TranslateError::UnknownType(other.to_string())),
    }
}

/// Materialize the nested `materials` and resolve the `layers` name list.
///
/// Material objects already present in the model by name are reused, so a
/// construction repeated across documents never duplicates its layers.
fn resolve_layers(raw: &RawObject, model: &mut sim::Model) -> Result<Vec<String>> {
    let fields = raw.fields();
    for material in fields.array_or_empty("materials")? {
        materials::translate_any(material, model)?;
    }

    let mut resolved = Vec::new();
    for name in fields.str_array("layers")? {
        if model.layer_by_name(name).is_none() {
            return Err(TranslateError::UnresolvedReference {
                kind: "material",
                name: name.to_string(),
                suggestion: closest_name(name, model.layer_names()),
            });
        }
        resolved.push(name.to_string());
    }
    Ok(resolved)
}

/// Check the gas-gap placement rule for a window layer sequence.
///
/// Gas gaps must sit between solid layers: never outermost, never innermost,
/// never two in a row.
fn gas_gap_violation(model: &sim::Model, layers: &[String]) -> Option<String> {
    let is_gas = |name: &str| {
        model
            .layer_by_name(name)
            .map(sim::Layer::is_gas)
            .unwrap_or(false)
    };

    if let Some(first) = layers.first() {
        if is_gas(first) {
            return Some(format!("gas gap '{first}' is the outermost layer"));
        }
    }
    if let Some(last) = layers.last() {
        if is_gas(last) {
            return Some(format!("gas gap '{last}' is the innermost layer"));
        }
    }
    for pair in layers.windows(2) {
        if is_gas(&pair[0]) && is_gas(&pair[1]) {
            return Some(format!("gas gaps '{}' and '{}' are adjacent", pair[0], pair[1]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opaque_material(name: &str) -> Value {
        json!({
            "type": "OpaqueMaterial",
            "name": name,
            "thickness": 0.1,
            "conductivity": 0.53,
            "density": 1400.0,
            "specific_heat": 840.0
        })
    }

    fn glazing(name: &str) -> Value {
        json!({"type": "GlazingMaterial", "name": name})
    }

    fn gas_gap(name: &str) -> Value {
        json!({"type": "GasGapMaterial", "name": name})
    }

    #[test]
    fn opaque_construction_materializes_nested_materials() {
        let mut model = sim::Model::new();
        OpaqueConstruction::from_value(json!({
            "type": "OpaqueConstruction",
            "name": "Exterior Wall",
            "materials": [opaque_material("Brick"), opaque_material("Insulation")],
            "layers": ["Brick", "Insulation"]
        }))
        .unwrap()
        .translate(&mut model)
        .unwrap();

        assert_eq!(model.layers().len(), 2);
        let construction = model.construction_by_name("Exterior Wall").unwrap();
        assert_eq!(construction.layers(), ["Brick", "Insulation"]);
    }

    #[test]
    fn shared_materials_are_not_duplicated_across_constructions() {
        let mut model = sim::Model::new();
        let wall = json!({
            "type": "OpaqueConstruction",
            "name": "Wall",
            "materials": [opaque_material("Brick"), opaque_material("Plaster")],
            "layers": ["Brick", "Plaster"]
        });
        let partition = json!({
            "type": "OpaqueConstruction",
            "name": "Partition",
            "materials": [opaque_material("Plaster")],
            "layers": ["Plaster"]
        });

        translate_any(&wall, &mut model).unwrap();
        translate_any(&partition, &mut model).unwrap();

        assert_eq!(model.layers().len(), 2);
        assert_eq!(model.constructions().len(), 2);
    }

    #[test]
    fn construction_translation_is_idempotent() {
        let mut model = sim::Model::new();
        let construction = OpaqueConstruction::from_value(json!({
            "type": "OpaqueConstruction",
            "name": "Wall",
            "materials": [opaque_material("Brick")],
            "layers": ["Brick"]
        }))
        .unwrap();

        let first = construction.translate(&mut model).unwrap();
        let second = construction.translate(&mut model).unwrap();
        assert_eq!(first, second);
        assert_eq!(model.constructions().len(), 1);
        assert_eq!(model.layers().len(), 1);
    }

    #[test]
    fn unknown_layer_name_carries_a_suggestion() {
        let mut model = sim::Model::new();
        let err = OpaqueConstruction::from_value(json!({
            "type": "OpaqueConstruction",
            "name": "Wall",
            "materials": [opaque_material("Generic Brick")],
            "layers": ["Genric Brick"]
        }))
        .unwrap()
        .translate(&mut model)
        .unwrap_err();

        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "No material named 'Genric Brick' in the model (did you mean 'Generic Brick'?)"
        );
        assert!(model.constructions().is_empty());
        assert_eq!(model.layers().len(), 1);
    }

    #[test]
    fn gas_gap_cannot_be_the_outermost_layer() {
        let mut model = sim::Model::new();
        let err = WindowConstruction::from_value(json!({
            "type": "WindowConstruction",
            "name": "Backwards Pane",
            "materials": [gas_gap("Air Gap"), glazing("Clear")],
            "layers": ["Air Gap", "Clear"]
        }))
        .unwrap()
        .translate(&mut model)
        .unwrap_err();

        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Window construction 'Backwards Pane' has invalid layering: \
             gas gap 'Air Gap' is the outermost layer"
        );
        assert!(model.constructions().is_empty());
    }

    #[test]
    fn gas_gap_cannot_be_the_innermost_layer() {
        let mut model = sim::Model::new();
        let err = WindowConstruction::from_value(json!({
            "type": "WindowConstruction",
            "name": "Open Pane",
            "materials": [glazing("Clear"), gas_gap("Air Gap")],
            "layers": ["Clear", "Air Gap"]
        }))
        .unwrap()
        .translate(&mut model)
        .unwrap_err();

        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Window construction 'Open Pane' has invalid layering: \
             gas gap 'Air Gap' is the innermost layer"
        );
        assert!(model.constructions().is_empty());
    }

    #[test]
    fn adjacent_gas_gaps_are_rejected() {
        let mut model = sim::Model::new();
        let err = WindowConstruction::from_value(json!({
            "type": "WindowConstruction",
            "name": "Double Gap",
            "materials": [
                glazing("Outer"),
                gas_gap("Gap A"),
                gas_gap("Gap B"),
                glazing("Inner")
            ],
            "layers": ["Outer", "Gap A", "Gap B", "Inner"]
        }))
        .unwrap()
        .translate(&mut model)
        .unwrap_err();

        assert!(matches!(err, TranslateError::WindowLayers { .. }));
        assert!(err.to_string().contains("'Gap A' and 'Gap B' are adjacent"));
    }

    #[test]
    fn well_formed_double_pane_translates() {
        let mut model = sim::Model::new();
        WindowConstruction::from_value(json!({
            "type": "WindowConstruction",
            "name": "Double Pane",
            "materials": [glazing("Outer"), gas_gap("Air Gap"), glazing("Inner")],
            "layers": ["Outer", "Air Gap", "Inner"]
        }))
        .unwrap()
        .translate(&mut model)
        .unwrap();

        let construction = model.construction_by_name("Double Pane").unwrap();
        assert_eq!(construction.layers().len(), 3);
    }

    #[test]
    fn shade_construction_becomes_a_finish_with_defaults() {
        let mut model = sim::Model::new();
        ShadeConstruction::from_value(json!({
            "type": "ShadeConstruction",
            "name": "Overhang Finish"
        }))
        .unwrap()
        .translate(&mut model)
        .unwrap();

        let finish = model.shade_finish_by_name("Overhang Finish").unwrap();
        assert_eq!(finish.solar_reflectance(), 0.2);
        assert_eq!(finish.visible_reflectance(), 0.2);
        assert!(!finish.is_specular());
    }

    #[test]
    fn dispatcher_rejects_unknown_construction_types() {
        let mut model = sim::Model::new();
        let err = translate_any(&json!({"type": "AirBoundaryConstruction"}), &mut model)
            .unwrap_err();
        assert!(matches!(err, TranslateError::UnknownType(_)));
    }
}
