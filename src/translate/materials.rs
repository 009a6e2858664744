//! Opaque material adapters, plus the dispatcher over every material kind

use serde_json::Value;
use std::path::Path;

use super::window::{
    BlindMaterial, GasGapMaterial, GlazingMaterial, ShadeMaterial, SimpleGlazingMaterial,
};
use super::{EnergyObject, RawObject};
use crate::error::{Result, TranslateError};
use crate::schema::ObjectType;
use crate::sim;

/// Opaque material with full thermal mass
#[derive(Debug)]
pub struct OpaqueMaterial {
    raw: RawObject,
}

impl OpaqueMaterial {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::OpaqueMaterial, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::OpaqueMaterial, path)?,
        })
    }
}

impl EnergyObject for OpaqueMaterial {
    const TYPE: ObjectType = ObjectType::OpaqueMaterial;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.layer_handle_of(sim::LayerKind::Opaque, self.name())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut layer = sim::OpaqueLayer::new(fields.str("name")?);
        let roughness = fields.str_or("roughness", "MediumRough")?;
        layer.set_roughness(
            sim::Roughness::parse(roughness)
                .ok_or_else(|| fields.unknown_variant("roughness", roughness))?,
        );
        layer.set_thickness(fields.f64("thickness")?);
        layer.set_conductivity(fields.f64("conductivity")?);
        layer.set_density(fields.f64("density")?);
        layer.set_specific_heat(fields.f64("specific_heat")?);
        layer.set_thermal_absorptance(fields.f64_or("thermal_absorptance", 0.9)?);
        layer.set_solar_absorptance(fields.f64_or("solar_absorptance", 0.7)?);
        layer.set_visible_absorptance(fields.f64_or("visible_absorptance", 0.7)?);
        Ok(model.add_layer(sim::Layer::Opaque(layer)))
    }
}

/// Opaque material described only by its R-value
pub struct MasslessMaterial {
    raw: RawObject,
}

impl MasslessMaterial {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::MasslessMaterial, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::MasslessMaterial, path)?,
        })
    }
}

impl EnergyObject for MasslessMaterial {
    const TYPE: ObjectType = ObjectType::MasslessMaterial;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.layer_handle_of(sim::LayerKind::NoMass, self.name())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut layer = sim::NoMassLayer::new(fields.str("name")?);
        layer.set_r_value(fields.f64("r_value")?);
        let roughness = fields.str_or("roughness", "MediumRough")?;
        layer.set_roughness(
            sim::Roughness::parse(roughness)
                .ok_or_else(|| fields.unknown_variant("roughness", roughness))?,
        );
        layer.set_thermal_absorptance(fields.f64_or("thermal_absorptance", 0.9)?);
        layer.set_solar_absorptance(fields.f64_or("solar_absorptance", 0.7)?);
        layer.set_visible_absorptance(fields.f64_or("visible_absorptance", 0.7)?);
        Ok(model.add_layer(sim::Layer::NoMass(layer)))
    }
}

/// Translate a material of any discriminator onto the model
pub fn translate_any(value: &Value, model: &mut sim::Model) -> Result<sim::Handle> {
    let type_str = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(TranslateError::MissingType)?;
    match type_str {
        "OpaqueMaterial" => OpaqueMaterial::from_value(value.clone())?.translate(model),
        "MasslessMaterial" => MasslessMaterial::from_value(value.clone())?.translate(model),
        "GlazingMaterial" => GlazingMaterial::from_value(value.clone())?.translate(model),
        "SimpleGlazingMaterial" => {
            SimpleGlazingMaterial::from_value(value.clone())?.translate(model)
        }
        "GasGapMaterial" => GasGapMaterial::from_value(value.clone())?.translate(model),
        "BlindMaterial" => BlindMaterial::from_value(value.clone())?.translate(model),
        "ShadeMaterial" => ShadeMaterial::from_value(value.clone())?.translate(model),
        other => Err(TranslateError::UnknownType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brick() -> Value {
        json!({
            "type": "OpaqueMaterial",
            "name": "Generic Brick",
            "roughness": "MediumRough",
            "thickness": 0.1,
            "conductivity": 0.9,
            "density": 1920,
            "specific_heat": 790
        })
    }

    #[test]
    fn translating_twice_returns_the_same_handle() {
        let mut model = sim::Model::new();
        let material = OpaqueMaterial::from_value(brick()).unwrap();

        let first = material.translate(&mut model).unwrap();
        let second = material.translate(&mut model).unwrap();

        assert_eq!(first, second);
        assert_eq!(model.layers().len(), 1);
    }

    #[test]
    fn absent_optionals_take_schema_defaults() {
        let mut model = sim::Model::new();
        OpaqueMaterial::from_value(brick())
            .unwrap()
            .translate(&mut model)
            .unwrap();

        match model.layer_by_name("Generic Brick").unwrap() {
            sim::Layer::Opaque(l) => {
                assert_eq!(l.thermal_absorptance(), 0.9);
                assert_eq!(l.solar_absorptance(), 0.7);
                assert_eq!(l.visible_absorptance(), 0.7);
                // integer-valued density is coerced
                assert_eq!(l.density(), 1920.0);
            }
            other => panic!("unexpected layer kind: {other:?}"),
        }
    }

    #[test]
    fn wrong_discriminator_is_fatal() {
        let err = OpaqueMaterial::from_value(json!({
            "type": "MasslessMaterial",
            "name": "x",
            "r_value": 2.0
        }))
        .unwrap_err();
        assert!(matches!(err, TranslateError::TypeMismatch { .. }));
    }

    #[test]
    fn missing_required_field_fails_translation() {
        let mut model = sim::Model::new();
        let material = MasslessMaterial::from_value(json!({
            "type": "MasslessMaterial",
            "name": "Thermal Break"
        }))
        .unwrap();
        let err = material.translate(&mut model).unwrap_err();
        assert!(matches!(err, TranslateError::MissingField { .. }));
        assert!(model.is_empty());
    }

    #[test]
    fn validation_collects_instead_of_raising() {
        let material = OpaqueMaterial::from_value(json!({
            "type": "OpaqueMaterial",
            "name": "Bad Brick",
            "thickness": "thick",
            "conductivity": 0.9,
            "density": 1920,
            "specific_heat": 790
        }))
        .unwrap();

        let issues = material.validation_errors().unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("/thickness:"));
        assert!(!material.is_valid().unwrap());
    }

    #[test]
    fn dispatcher_rejects_unknown_material_types() {
        let mut model = sim::Model::new();
        let err = translate_any(&json!({"type": "Mystery", "name": "x"}), &mut model).unwrap_err();
        assert!(matches!(err, TranslateError::UnknownType(_)));
    }

    #[test]
    fn dispatcher_routes_both_opaque_kinds() {
        let mut model = sim::Model::new();
        translate_any(&brick(), &mut model).unwrap();
        translate_any(
            &json!({"type": "MasslessMaterial", "name": "Thermal Break", "r_value": 2.0}),
            &mut model,
        )
        .unwrap();

        assert!(model
            .layer_handle_of(sim::LayerKind::Opaque, "Generic Brick")
            .is_some());
        assert!(model
            .layer_handle_of(sim::LayerKind::NoMass, "Thermal Break")
            .is_some());
    }
}
