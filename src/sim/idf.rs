//! Input-deck export
//!
//! Renders a populated [`Model`](super::Model) to an EnergyPlus-style text
//! deck. Objects are written in insertion order, one class per store:
//! material layers, constructions, zones, surfaces, sub-surfaces, and
//! shading surfaces with their reflectance properties. The pretty format
//! aligns a `!-` field comment per line; the compact format writes one
//! object per line.

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use super::{Boundary, GasType, Layer, Model, SurfaceKind};
use crate::error::Result;

static STRUCTURAL: OnceLock<Regex> = OnceLock::new();

/// Layout of the rendered deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeckFormat {
    /// One field per line with aligned `!-` comments
    #[default]
    Pretty,
    /// One object per line
    Compact,
}

/// Rendering options
#[derive(Debug, Clone)]
pub struct DeckOptions {
    pub format: DeckFormat,
    /// Decimal places kept before trailing zeros are trimmed
    pub precision: usize,
    /// Emit the generator header comment
    pub header: bool,
    /// Extra header line, typically the schema-set fingerprint
    pub note: Option<String>,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            format: DeckFormat::Pretty,
            precision: 6,
            header: true,
            note: None,
        }
    }
}

/// Render the model to deck text
pub fn write_deck(model: &Model, opts: &DeckOptions) -> String {
    let mut out = String::new();

    if opts.header {
        out.push_str(&format!(
            "!- Generated by atrium-energy {}\n",
            env!("CARGO_PKG_VERSION")
        ));
        out.push_str(&format!(
            "!- {}\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if let Some(note) = &opts.note {
            out.push_str(&format!("!- {note}\n"));
        }
        out.push('\n');
    }

    for layer in model.layers() {
        layer_object(layer, opts.precision).render(&mut out, opts.format);
    }
    for construction in model.constructions() {
        construction_object(construction).render(&mut out, opts.format);
    }
    for space in model.spaces() {
        zone_object(space).render(&mut out, opts.format);
    }
    for surface in model.surfaces() {
        surface_object(surface, opts.precision).render(&mut out, opts.format);
    }
    for sub_surface in model.sub_surfaces() {
        sub_surface_object(sub_surface, opts.precision).render(&mut out, opts.format);
    }
    for shading in model.shading_surfaces() {
        shading_object(shading, opts.precision).render(&mut out, opts.format);
        if let Some(finish) = shading.finish().and_then(|n| model.shade_finish_by_name(n)) {
            let mut obj = DeckObject::new("ShadingProperty:Reflectance");
            obj.field(sanitize(shading.name()), "Shading Surface Name");
            obj.field(
                num(finish.solar_reflectance(), opts.precision),
                "Diffuse Solar Reflectance",
            );
            obj.field(
                num(finish.visible_reflectance(), opts.precision),
                "Diffuse Visible Reflectance",
            );
            obj.field(
                if finish.is_specular() { "1" } else { "0" },
                "Is Specular",
            );
            obj.render(&mut out, opts.format);
        }
    }

    out
}

/// Render the model and write it to disk
pub fn write_deck_to(path: &Path, model: &Model, opts: &DeckOptions) -> Result<()> {
    fs::write(path, write_deck(model, opts))?;
    Ok(())
}

/// Replace characters that are structural in the deck format
pub fn sanitize(name: &str) -> String {
    let re = STRUCTURAL.get_or_init(|| Regex::new(r"[,;!]").unwrap());
    re.replace_all(name, "-").into_owned()
}

/// Format a number at the given precision, trimming trailing zeros
fn num(value: f64, precision: usize) -> String {
    let s = format!("{value:.precision$}");
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        &s
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

struct DeckObject {
    class: &'static str,
    fields: Vec<(String, String)>,
}

impl DeckObject {
    fn new(class: &'static str) -> Self {
        Self {
            class,
            fields: Vec::new(),
        }
    }

    fn field(&mut self, value: impl Into<String>, comment: impl Into<String>) {
        self.fields.push((value.into(), comment.into()));
    }

    fn render(&self, out: &mut String, format: DeckFormat) {
        match format {
            DeckFormat::Pretty => {
                out.push_str(self.class);
                out.push_str(",\n");
                let last = self.fields.len().saturating_sub(1);
                for (i, (value, comment)) in self.fields.iter().enumerate() {
                    let sep = if i == last { ';' } else { ',' };
                    let cell = format!("{value}{sep}");
                    out.push_str("  ");
                    out.push_str(&cell);
                    if !comment.is_empty() {
                        if cell.len() < 34 {
                            out.push_str(&" ".repeat(34 - cell.len()));
                        } else {
                            out.push(' ');
                        }
                        out.push_str("!- ");
                        out.push_str(comment);
                    }
                    out.push('\n');
                }
                out.push('\n');
            }
            DeckFormat::Compact => {
                out.push_str(self.class);
                for (value, _) in &self.fields {
                    out.push(',');
                    out.push_str(value);
                }
                out.push_str(";\n");
            }
        }
    }
}

fn layer_object(layer: &Layer, precision: usize) -> DeckObject {
    match layer {
        Layer::Opaque(l) => {
            let mut obj = DeckObject::new("Material");
            obj.field(sanitize(l.name()), "Name");
            obj.field(l.roughness().as_str(), "Roughness");
            obj.field(num(l.thickness(), precision), "Thickness {m}");
            obj.field(num(l.conductivity(), precision), "Conductivity {W/m-K}");
            obj.field(num(l.density(), precision), "Density {kg/m3}");
            obj.field(num(l.specific_heat(), precision), "Specific Heat {J/kg-K}");
            obj.field(num(l.thermal_absorptance(), precision), "Thermal Absorptance");
            obj.field(num(l.solar_absorptance(), precision), "Solar Absorptance");
            obj.field(num(l.visible_absorptance(), precision), "Visible Absorptance");
            obj
        }
        Layer::NoMass(l) => {
            let mut obj = DeckObject::new("Material:NoMass");
            obj.field(sanitize(l.name()), "Name");
            obj.field(l.roughness().as_str(), "Roughness");
            obj.field(num(l.r_value(), precision), "Thermal Resistance {m2-K/W}");
            obj.field(num(l.thermal_absorptance(), precision), "Thermal Absorptance");
            obj.field(num(l.solar_absorptance(), precision), "Solar Absorptance");
            obj.field(num(l.visible_absorptance(), precision), "Visible Absorptance");
            obj
        }
        Layer::Glazing(l) => {
            let mut obj = DeckObject::new("WindowMaterial:Glazing");
            obj.field(sanitize(l.name()), "Name");
            obj.field("SpectralAverage", "Optical Data Type");
            obj.field("", "Spectral Data Set Name");
            obj.field(num(l.thickness(), precision), "Thickness {m}");
            obj.field(num(l.solar_transmittance(), precision), "Solar Transmittance");
            obj.field(
                num(l.solar_reflectance(), precision),
                "Front Side Solar Reflectance",
            );
            obj.field(
                num(l.solar_reflectance(), precision),
                "Back Side Solar Reflectance",
            );
            obj.field(
                num(l.visible_transmittance(), precision),
                "Visible Transmittance",
            );
            obj.field(
                num(l.visible_reflectance(), precision),
                "Front Side Visible Reflectance",
            );
            obj.field(
                num(l.visible_reflectance(), precision),
                "Back Side Visible Reflectance",
            );
            obj.field(
                num(l.infrared_transmittance(), precision),
                "Infrared Transmittance",
            );
            obj.field(
                num(l.front_emissivity(), precision),
                "Front Side Infrared Emissivity",
            );
            obj.field(
                num(l.back_emissivity(), precision),
                "Back Side Infrared Emissivity",
            );
            obj.field(num(l.conductivity(), precision), "Conductivity {W/m-K}");
            obj.field(
                num(l.dirt_correction(), precision),
                "Dirt Correction Factor",
            );
            obj.field(
                if l.solar_diffusing() { "Yes" } else { "No" },
                "Solar Diffusing",
            );
            obj
        }
        Layer::SimpleGlazing(l) => {
            let mut obj = DeckObject::new("WindowMaterial:SimpleGlazingSystem");
            obj.field(sanitize(l.name()), "Name");
            obj.field(num(l.u_factor(), precision), "U-Factor {W/m2-K}");
            obj.field(num(l.shgc(), precision), "Solar Heat Gain Coefficient");
            obj.field(
                num(l.visible_transmittance(), precision),
                "Visible Transmittance",
            );
            obj
        }
        Layer::Gas(l) => {
            let mut obj = DeckObject::new("WindowMaterial:Gas");
            obj.field(sanitize(l.name()), "Name");
            obj.field(l.gas_type().as_str(), "Gas Type");
            obj.field(num(l.thickness(), precision), "Thickness {m}");
            if l.gas_type() == GasType::Custom {
                obj.field(
                    num(l.conductivity_coeff_a(), precision),
                    "Conductivity Coefficient A",
                );
                obj.field(
                    num(l.conductivity_coeff_b(), precision),
                    "Conductivity Coefficient B",
                );
                obj.field(
                    num(l.conductivity_coeff_c(), precision),
                    "Conductivity Coefficient C",
                );
                obj.field(
                    num(l.viscosity_coeff_a(), precision),
                    "Viscosity Coefficient A",
                );
                obj.field(
                    num(l.viscosity_coeff_b(), precision),
                    "Viscosity Coefficient B",
                );
                obj.field(
                    num(l.viscosity_coeff_c(), precision),
                    "Viscosity Coefficient C",
                );
                obj.field(
                    num(l.specific_heat_coeff_a(), precision),
                    "Specific Heat Coefficient A",
                );
                obj.field(
                    num(l.specific_heat_coeff_b(), precision),
                    "Specific Heat Coefficient B",
                );
                obj.field(
                    num(l.specific_heat_coeff_c(), precision),
                    "Specific Heat Coefficient C",
                );
                obj.field(num(l.molecular_weight(), precision), "Molecular Weight");
                obj.field(
                    num(l.specific_heat_ratio(), precision),
                    "Specific Heat Ratio",
                );
            }
            obj
        }
        Layer::Blind(l) => {
            let mut obj = DeckObject::new("WindowMaterial:Blind");
            obj.field(sanitize(l.name()), "Name");
            obj.field(l.slat_orientation().as_str(), "Slat Orientation");
            obj.field(num(l.slat_width(), precision), "Slat Width {m}");
            obj.field(num(l.slat_separation(), precision), "Slat Separation {m}");
            obj.field(num(l.slat_thickness(), precision), "Slat Thickness {m}");
            obj.field(num(l.slat_angle(), precision), "Slat Angle {deg}");
            obj.field(
                num(l.slat_conductivity(), precision),
                "Slat Conductivity {W/m-K}",
            );
            obj.field(
                num(l.solar_transmittance(), precision),
                "Slat Beam Solar Transmittance",
            );
            obj.field(
                num(l.solar_reflectance(), precision),
                "Slat Beam Solar Reflectance",
            );
            obj.field(
                num(l.visible_transmittance(), precision),
                "Slat Beam Visible Transmittance",
            );
            obj.field(
                num(l.visible_reflectance(), precision),
                "Slat Beam Visible Reflectance",
            );
            obj.field(
                num(l.infrared_emissivity(), precision),
                "Slat Infrared Emissivity",
            );
            obj.field(
                num(l.distance_to_glass(), precision),
                "Blind to Glass Distance {m}",
            );
            obj.field(num(l.opening_multiplier(), precision), "Opening Multiplier");
            obj
        }
        Layer::Shade(l) => {
            let mut obj = DeckObject::new("WindowMaterial:Shade");
            obj.field(sanitize(l.name()), "Name");
            obj.field(num(l.solar_transmittance(), precision), "Solar Transmittance");
            obj.field(num(l.solar_reflectance(), precision), "Solar Reflectance");
            obj.field(
                num(l.visible_transmittance(), precision),
                "Visible Transmittance",
            );
            obj.field(num(l.visible_reflectance(), precision), "Visible Reflectance");
            obj.field(num(l.infrared_emissivity(), precision), "Infrared Emissivity");
            obj.field(
                num(l.infrared_transmittance(), precision),
                "Infrared Transmittance",
            );
            obj.field(num(l.thickness(), precision), "Thickness {m}");
            obj.field(num(l.conductivity(), precision), "Conductivity {W/m-K}");
            obj.field(
                num(l.distance_to_glass(), precision),
                "Shade to Glass Distance {m}",
            );
            obj.field(num(l.opening_multiplier(), precision), "Opening Multiplier");
            obj.field(
                num(l.airflow_permeability(), precision),
                "Airflow Permeability",
            );
            obj
        }
    }
}

fn construction_object(construction: &super::Construction) -> DeckObject {
    let mut obj = DeckObject::new("Construction");
    obj.field(sanitize(construction.name()), "Name");
    for (i, layer) in construction.layers().iter().enumerate() {
        let comment = if i == 0 {
            "Outside Layer".to_string()
        } else {
            format!("Layer {}", i + 1)
        };
        obj.field(sanitize(layer), comment);
    }
    obj
}

fn zone_object(space: &super::Space) -> DeckObject {
    let mut obj = DeckObject::new("Zone");
    obj.field(sanitize(space.name()), "Name");
    obj.field(space.multiplier().to_string(), "Multiplier");
    obj
}

fn surface_object(surface: &super::Surface, precision: usize) -> DeckObject {
    let mut obj = DeckObject::new("BuildingSurface:Detailed");
    obj.field(sanitize(surface.name()), "Name");
    obj.field(surface_type_str(surface), "Surface Type");
    obj.field(
        surface.construction().map(sanitize).unwrap_or_default(),
        "Construction Name",
    );
    obj.field(sanitize(surface.space()), "Zone Name");

    let (condition, object, sun, wind) = match surface.boundary() {
        Boundary::Outdoors {
            sun_exposure,
            wind_exposure,
        } => (
            "Outdoors",
            String::new(),
            if *sun_exposure { "SunExposed" } else { "NoSun" },
            if *wind_exposure { "WindExposed" } else { "NoWind" },
        ),
        Boundary::Ground => ("Ground", String::new(), "NoSun", "NoWind"),
        Boundary::Adiabatic => ("Adiabatic", String::new(), "NoSun", "NoWind"),
        Boundary::Surface { adjacent_surface } => {
            ("Surface", sanitize(adjacent_surface), "NoSun", "NoWind")
        }
    };
    obj.field(condition, "Outside Boundary Condition");
    obj.field(object, "Outside Boundary Condition Object");
    obj.field(sun, "Sun Exposure");
    obj.field(wind, "Wind Exposure");
    push_vertices(&mut obj, surface.vertices(), precision);
    obj
}

fn sub_surface_object(sub_surface: &super::SubSurface, precision: usize) -> DeckObject {
    let mut obj = DeckObject::new("FenestrationSurface:Detailed");
    obj.field(sanitize(sub_surface.name()), "Name");
    obj.field("Window", "Surface Type");
    obj.field(
        sub_surface.construction().map(sanitize).unwrap_or_default(),
        "Construction Name",
    );
    obj.field(sanitize(sub_surface.parent_surface()), "Building Surface Name");
    push_vertices(&mut obj, sub_surface.vertices(), precision);
    obj
}

fn shading_object(shading: &super::ShadingSurface, precision: usize) -> DeckObject {
    let mut obj = DeckObject::new("Shading:Building:Detailed");
    obj.field(sanitize(shading.name()), "Name");
    obj.field("", "Transmittance Schedule Name");
    push_vertices(&mut obj, shading.vertices(), precision);
    obj
}

/// Roof/ceiling surfaces export as Roof only when exposed to the outdoors
fn surface_type_str(surface: &super::Surface) -> &'static str {
    match surface.kind() {
        SurfaceKind::Wall => "Wall",
        SurfaceKind::Floor => "Floor",
        SurfaceKind::RoofCeiling => match surface.boundary() {
            Boundary::Outdoors { .. } => "Roof",
            _ => "Ceiling",
        },
    }
}

fn push_vertices(obj: &mut DeckObject, vertices: &[[f64; 3]], precision: usize) {
    obj.field(vertices.len().to_string(), "Number of Vertices");
    for (i, [x, y, z]) in vertices.iter().enumerate() {
        obj.field(
            format!(
                "{}, {}, {}",
                num(*x, precision),
                num(*y, precision),
                num(*z, precision)
            ),
            format!("X,Y,Z Vertex {} {{m}}", i + 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Construction, OpaqueLayer, ShadeFinish, ShadingSurface, Space, Surface};
    use super::*;

    fn no_header() -> DeckOptions {
        DeckOptions {
            header: false,
            ..DeckOptions::default()
        }
    }

    #[test]
    fn pretty_material_matches_expected_layout() {
        let mut model = Model::new();
        let mut brick = OpaqueLayer::new("Generic Brick");
        brick.set_thickness(0.1);
        brick.set_conductivity(0.9);
        brick.set_density(1920.0);
        brick.set_specific_heat(790.0);
        model.add_layer(Layer::Opaque(brick));

        let deck = write_deck(&model, &no_header());
        let expected = "\
Material,
  Generic Brick,                    !- Name
  MediumRough,                      !- Roughness
  0.1,                              !- Thickness {m}
  0.9,                              !- Conductivity {W/m-K}
  1920,                             !- Density {kg/m3}
  790,                              !- Specific Heat {J/kg-K}
  0.9,                              !- Thermal Absorptance
  0.7,                              !- Solar Absorptance
  0.7;                              !- Visible Absorptance

";
        assert_eq!(deck, expected);
    }

    #[test]
    fn compact_writes_one_object_per_line() {
        let mut model = Model::new();
        let mut c = Construction::new("Exterior Wall");
        c.set_layers(vec!["Brick".to_string(), "Insulation".to_string()]);
        model.add_construction(c);

        let opts = DeckOptions {
            format: DeckFormat::Compact,
            header: false,
            ..DeckOptions::default()
        };
        assert_eq!(
            write_deck(&model, &opts),
            "Construction,Exterior Wall,Brick,Insulation;\n"
        );
    }

    #[test]
    fn numbers_trim_trailing_zeros() {
        assert_eq!(num(0.7, 6), "0.7");
        assert_eq!(num(1920.0, 6), "1920");
        assert_eq!(num(0.0, 6), "0");
        assert_eq!(num(-0.0, 6), "0");
        assert_eq!(num(0.0125, 6), "0.0125");
        assert_eq!(num(1.0 / 3.0, 4), "0.3333");
    }

    #[test]
    fn names_are_sanitized() {
        assert_eq!(sanitize("North Wall; rev 2"), "North Wall- rev 2");
        assert_eq!(sanitize("plain"), "plain");
    }

    #[test]
    fn roof_ceiling_maps_by_boundary() {
        let mut model = Model::new();
        model.add_space(Space::new("Attic"));

        let mut roof = Surface::new("Roof Deck", "Attic");
        roof.set_kind(SurfaceKind::RoofCeiling);
        roof.set_vertices(vec![[0.0, 0.0, 3.0], [1.0, 0.0, 3.0], [1.0, 1.0, 3.0]]);
        model.add_surface(roof);

        let mut ceiling = Surface::new("Ceiling Deck", "Attic");
        ceiling.set_kind(SurfaceKind::RoofCeiling);
        ceiling.set_boundary(Boundary::Adiabatic);
        ceiling.set_vertices(vec![[0.0, 0.0, 3.0], [1.0, 0.0, 3.0], [1.0, 1.0, 3.0]]);
        model.add_surface(ceiling);

        let deck = write_deck(&model, &no_header());
        assert!(deck.contains("  Roof,"));
        assert!(deck.contains("  Ceiling,"));
    }

    #[test]
    fn finish_renders_reflectance_property() {
        let mut model = Model::new();
        let mut finish = ShadeFinish::new("Overhang Finish");
        finish.set_solar_reflectance(0.35);
        finish.set_is_specular(true);
        model.add_shade_finish(finish);

        let mut shade = ShadingSurface::new("South Overhang");
        shade.set_vertices(vec![[0.0, 0.0, 3.0], [2.0, 0.0, 3.0], [2.0, 1.0, 3.0]]);
        shade.set_finish("Overhang Finish");
        model.add_shading_surface(shade);

        let deck = write_deck(&model, &no_header());
        assert!(deck.contains("Shading:Building:Detailed,"));
        assert!(deck.contains("ShadingProperty:Reflectance,"));
        assert!(deck.contains("0.35"));
        let specular_line = deck
            .lines()
            .find(|l| l.contains("!- Is Specular"))
            .unwrap();
        assert!(specular_line.trim_start().starts_with("1;"));
    }

    #[test]
    fn header_carries_version_and_note() {
        let model = Model::new();
        let opts = DeckOptions {
            note: Some("schema set 1.43.0".to_string()),
            ..DeckOptions::default()
        };
        let deck = write_deck(&model, &opts);
        assert!(deck.starts_with("!- Generated by atrium-energy"));
        assert!(deck.contains("!- schema set 1.43.0\n"));
    }
}
