//! Window layer adapters: glazing, simple glazing, gas gaps, blinds, shades

use serde_json::Value;
use std::path::Path;

use super::{EnergyObject, RawObject};
use crate::error::Result;
use crate::schema::ObjectType;
use crate::sim;

/// Single glazing pane
pub struct GlazingMaterial {
    raw: RawObject,
}

impl GlazingMaterial {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::GlazingMaterial, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::GlazingMaterial, path)?,
        })
    }
}

impl EnergyObject for GlazingMaterial {
    const TYPE: ObjectType = ObjectType::GlazingMaterial;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.layer_handle_of(sim::LayerKind::Glazing, self.name())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut pane = sim::GlazingLayer::new(fields.str("name")?);
        pane.set_thickness(fields.f64_or("thickness", 0.003)?);
        pane.set_solar_transmittance(fields.f64_or("solar_transmittance", 0.85)?);
        pane.set_solar_reflectance(fields.f64_or("solar_reflectance", 0.075)?);
        pane.set_visible_transmittance(fields.f64_or("visible_transmittance", 0.9)?);
        pane.set_visible_reflectance(fields.f64_or("visible_reflectance", 0.075)?);
        pane.set_infrared_transmittance(fields.f64_or("infrared_transmittance", 0.0)?);
        pane.set_front_emissivity(fields.f64_or("front_emissivity", 0.84)?);
        pane.set_back_emissivity(fields.f64_or("back_emissivity", 0.84)?);
        pane.set_conductivity(fields.f64_or("conductivity", 0.9)?);
        pane.set_dirt_correction(fields.f64_or("dirt_correction", 1.0)?);
        pane.set_solar_diffusing(fields.bool_or("solar_diffusing", false)?);
        Ok(model.add_layer(sim::Layer::Glazing(pane)))
    }
}

/// Whole-window glazing system described by U-factor and SHGC
pub struct SimpleGlazingMaterial {
    raw: RawObject,
}

impl SimpleGlazingMaterial {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::SimpleGlazingMaterial, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::SimpleGlazingMaterial, path)?,
        })
    }
}

impl EnergyObject for SimpleGlazingMaterial {
    const TYPE: ObjectType = ObjectType::SimpleGlazingMaterial;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.layer_handle_of(sim::LayerKind::SimpleGlazing, self.name())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut system = sim::SimpleGlazingLayer::new(fields.str("name")?);
        system.set_u_factor(fields.f64("u_factor")?);
        system.set_shgc(fields.f64("shgc")?);
        system.set_visible_transmittance(fields.f64_or("visible_transmittance", 0.54)?);
        Ok(model.add_layer(sim::Layer::SimpleGlazing(system)))
    }
}

/// Gas gap between panes.
///
/// The polynomial coefficients are transcribed whatever the gas type; the
/// deck writer only renders them for `Custom` fills.
pub struct GasGapMaterial {
    raw: RawObject,
}

impl GasGapMaterial {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::GasGapMaterial, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::GasGapMaterial, path)?,
        })
    }
}

impl EnergyObject for GasGapMaterial {
    const TYPE: ObjectType = ObjectType::GasGapMaterial;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.layer_handle_of(sim::LayerKind::Gas, self.name())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut gap = sim::GasLayer::new(fields.str("name")?);
        let gas_type = fields.str_or("gas_type", "Air")?;
        gap.set_gas_type(
            sim::GasType::parse(gas_type)
                .ok_or_else(|| fields.unknown_variant("gas_type", gas_type))?,
        );
        gap.set_thickness(fields.f64_or("thickness", 0.0125)?);
        gap.set_conductivity_coeff_a(fields.f64_or("conductivity_coeff_a", 0.0)?);
        gap.set_conductivity_coeff_b(fields.f64_or("conductivity_coeff_b", 0.0)?);
        gap.set_conductivity_coeff_c(fields.f64_or("conductivity_coeff_c", 0.0)?);
        gap.set_viscosity_coeff_a(fields.f64_or("viscosity_coeff_a", 0.0)?);
        gap.set_viscosity_coeff_b(fields.f64_or("viscosity_coeff_b", 0.0)?);
        gap.set_viscosity_coeff_c(fields.f64_or("viscosity_coeff_c", 0.0)?);
        gap.set_specific_heat_coeff_a(fields.f64_or("specific_heat_coeff_a", 0.0)?);
        gap.set_specific_heat_coeff_b(fields.f64_or("specific_heat_coeff_b", 0.0)?);
        gap.set_specific_heat_coeff_c(fields.f64_or("specific_heat_coeff_c", 0.0)?);
        gap.set_specific_heat_ratio(fields.f64_or("specific_heat_ratio", 0.0)?);
        gap.set_molecular_weight(fields.f64_or("molecular_weight", 0.0)?);
        Ok(model.add_layer(sim::Layer::Gas(gap)))
    }
}

/// Slatted blind layer
pub struct BlindMaterial {
    raw: RawObject,
}

impl BlindMaterial {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::BlindMaterial, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::BlindMaterial, path)?,
        })
    }
}

impl EnergyObject for BlindMaterial {
    const TYPE: ObjectType = ObjectType::BlindMaterial;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.layer_handle_of(sim::LayerKind::Blind, self.name())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut blind = sim::BlindLayer::new(fields.str("name")?);
        let orientation = fields.str_or("slat_orientation", "Horizontal")?;
        blind.set_slat_orientation(
            sim::SlatOrientation::parse(orientation)
                .ok_or_else(|| fields.unknown_variant("slat_orientation", orientation))?,
        );
        blind.set_slat_width(fields.f64_or("slat_width", 0.025)?);
        blind.set_slat_separation(fields.f64_or("slat_separation", 0.01875)?);
        blind.set_slat_thickness(fields.f64_or("slat_thickness", 0.001)?);
        blind.set_slat_angle(fields.f64_or("slat_angle", 45.0)?);
        blind.set_slat_conductivity(fields.f64_or("slat_conductivity", 221.0)?);
        blind.set_solar_transmittance(fields.f64_or("solar_transmittance", 0.0)?);
        blind.set_solar_reflectance(fields.f64_or("solar_reflectance", 0.5)?);
        blind.set_visible_transmittance(fields.f64_or("visible_transmittance", 0.0)?);
        blind.set_visible_reflectance(fields.f64_or("visible_reflectance", 0.5)?);
        blind.set_infrared_emissivity(fields.f64_or("infrared_emissivity", 0.9)?);
        blind.set_distance_to_glass(fields.f64_or("distance_to_glass", 0.05)?);
        blind.set_opening_multiplier(fields.f64_or("opening_multiplier", 0.5)?);
        Ok(model.add_layer(sim::Layer::Blind(blind)))
    }
}

/// Diffusing shade layer
pub struct ShadeMaterial {
    raw: RawObject,
}

impl ShadeMaterial {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::ShadeMaterial, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::ShadeMaterial, path)?,
        })
    }
}

impl EnergyObject for ShadeMaterial {
    const TYPE: ObjectType = ObjectType::ShadeMaterial;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.layer_handle_of(sim::LayerKind::Shade, self.name())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut shade = sim::ShadeLayer::new(fields.str("name")?);
        shade.set_solar_transmittance(fields.f64_or("solar_transmittance", 0.4)?);
        shade.set_solar_reflectance(fields.f64_or("solar_reflectance", 0.5)?);
        shade.set_visible_transmittance(fields.f64_or("visible_transmittance", 0.4)?);
        shade.set_visible_reflectance(fields.f64_or("visible_reflectance", 0.4)?);
        shade.set_infrared_emissivity(fields.f64_or("infrared_emissivity", 0.9)?);
        shade.set_infrared_transmittance(fields.f64_or("infrared_transmittance", 0.0)?);
        shade.set_thickness(fields.f64_or("thickness", 0.005)?);
        shade.set_conductivity(fields.f64_or("conductivity", 0.1)?);
        shade.set_distance_to_glass(fields.f64_or("distance_to_glass", 0.05)?);
        shade.set_opening_multiplier(fields.f64_or("opening_multiplier", 0.5)?);
        shade.set_airflow_permeability(fields.f64_or("airflow_permeability", 0.0)?);
        Ok(model.add_layer(sim::Layer::Shade(shade)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use serde_json::json;

    #[test]
    fn gas_gap_defaults_to_air() {
        let mut model = sim::Model::new();
        GasGapMaterial::from_value(json!({"type": "GasGapMaterial", "name": "Generic Gap"}))
            .unwrap()
            .translate(&mut model)
            .unwrap();

        match model.layer_by_name("Generic Gap").unwrap() {
            sim::Layer::Gas(gap) => {
                assert_eq!(gap.gas_type(), sim::GasType::Air);
                assert_eq!(gap.thickness(), 0.0125);
            }
            other => panic!("unexpected layer kind: {other:?}"),
        }
    }

    #[test]
    fn custom_gas_transcribes_every_coefficient() {
        let mut model = sim::Model::new();
        GasGapMaterial::from_value(json!({
            "type": "GasGapMaterial",
            "name": "SF6 Gap",
            "gas_type": "Custom",
            "thickness": 0.01,
            "conductivity_coeff_a": 0.0013,
            "conductivity_coeff_b": 0.0000171,
            "conductivity_coeff_c": 0.0,
            "viscosity_coeff_a": 0.0000072,
            "viscosity_coeff_b": 0.0000000491,
            "viscosity_coeff_c": 0.0,
            "specific_heat_coeff_a": 418.6,
            "specific_heat_coeff_b": 0.0,
            "specific_heat_coeff_c": 0.0,
            "specific_heat_ratio": 1.09,
            "molecular_weight": 146.1
        }))
        .unwrap()
        .translate(&mut model)
        .unwrap();

        match model.layer_by_name("SF6 Gap").unwrap() {
            sim::Layer::Gas(gap) => {
                assert_eq!(gap.gas_type(), sim::GasType::Custom);
                assert_eq!(gap.conductivity_coeff_a(), 0.0013);
                assert_eq!(gap.specific_heat_coeff_a(), 418.6);
                assert_eq!(gap.specific_heat_ratio(), 1.09);
                assert_eq!(gap.molecular_weight(), 146.1);
            }
            other => panic!("unexpected layer kind: {other:?}"),
        }
    }

    #[test]
    fn glazing_defaults_fill_absent_fields() {
        let mut model = sim::Model::new();
        GlazingMaterial::from_value(json!({"type": "GlazingMaterial", "name": "Clear 3mm"}))
            .unwrap()
            .translate(&mut model)
            .unwrap();

        match model.layer_by_name("Clear 3mm").unwrap() {
            sim::Layer::Glazing(pane) => {
                assert_eq!(pane.thickness(), 0.003);
                assert_eq!(pane.solar_transmittance(), 0.85);
                assert_eq!(pane.front_emissivity(), 0.84);
                assert_eq!(pane.dirt_correction(), 1.0);
                assert!(!pane.solar_diffusing());
            }
            other => panic!("unexpected layer kind: {other:?}"),
        }
    }

    #[test]
    fn simple_glazing_requires_u_factor_and_shgc() {
        let mut model = sim::Model::new();
        let system = SimpleGlazingMaterial::from_value(json!({
            "type": "SimpleGlazingMaterial",
            "name": "Double Low-E"
        }))
        .unwrap();
        let err = system.translate(&mut model).unwrap_err();
        assert!(matches!(err, TranslateError::MissingField { .. }));
    }

    #[test]
    fn unknown_slat_orientation_is_an_invalid_field() {
        let mut model = sim::Model::new();
        let blind = BlindMaterial::from_value(json!({
            "type": "BlindMaterial",
            "name": "Venetian",
            "slat_orientation": "Diagonal"
        }))
        .unwrap();
        let err = blind.translate(&mut model).unwrap_err();
        assert!(err.to_string().contains("slat_orientation"));
    }

    #[test]
    fn same_name_under_different_kinds_does_not_collide() {
        let mut model = sim::Model::new();
        GasGapMaterial::from_value(json!({"type": "GasGapMaterial", "name": "Generic"}))
            .unwrap()
            .translate(&mut model)
            .unwrap();
        GlazingMaterial::from_value(json!({"type": "GlazingMaterial", "name": "Generic"}))
            .unwrap()
            .translate(&mut model)
            .unwrap();

        assert_eq!(model.layers().len(), 2);
        assert!(model.layer_handle_of(sim::LayerKind::Gas, "Generic").is_some());
        assert!(model.layer_handle_of(sim::LayerKind::Glazing, "Generic").is_some());
    }

    #[test]
    fn shade_material_translation_is_idempotent() {
        let mut model = sim::Model::new();
        let shade = ShadeMaterial::from_value(json!({
            "type": "ShadeMaterial",
            "name": "Roller Shade",
            "solar_transmittance": 0.3
        }))
        .unwrap();

        let first = shade.translate(&mut model).unwrap();
        let second = shade.translate(&mut model).unwrap();
        assert_eq!(first, second);
        assert_eq!(model.layers().len(), 1);
    }
}
