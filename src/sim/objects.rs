//! Typed objects of the simulation model
//!
//! Every object carries a [`Handle`] assigned at construction and a name.
//! Setters transcribe values as given; the only adjustment is that
//! fraction-valued setters clamp to [0, 1], the way the deck format's
//! consumers would. Nothing here checks physical consistency.

use super::Handle;

fn frac(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Relative roughness of an opaque surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Roughness {
    VeryRough,
    Rough,
    #[default]
    MediumRough,
    MediumSmooth,
    Smooth,
    VerySmooth,
}

impl Roughness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Roughness::VeryRough => "VeryRough",
            Roughness::Rough => "Rough",
            Roughness::MediumRough => "MediumRough",
            Roughness::MediumSmooth => "MediumSmooth",
            Roughness::Smooth => "Smooth",
            Roughness::VerySmooth => "VerySmooth",
        }
    }

    pub fn parse(s: &str) -> Option<Roughness> {
        match s {
            "VeryRough" => Some(Roughness::VeryRough),
            "Rough" => Some(Roughness::Rough),
            "MediumRough" => Some(Roughness::MediumRough),
            "MediumSmooth" => Some(Roughness::MediumSmooth),
            "Smooth" => Some(Roughness::Smooth),
            "VerySmooth" => Some(Roughness::VerySmooth),
            _ => None,
        }
    }
}

/// Fill gas of a window gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasType {
    #[default]
    Air,
    Argon,
    Krypton,
    Xenon,
    Custom,
}

impl GasType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GasType::Air => "Air",
            GasType::Argon => "Argon",
            GasType::Krypton => "Krypton",
            GasType::Xenon => "Xenon",
            GasType::Custom => "Custom",
        }
    }

    pub fn parse(s: &str) -> Option<GasType> {
        match s {
            "Air" => Some(GasType::Air),
            "Argon" => Some(GasType::Argon),
            "Krypton" => Some(GasType::Krypton),
            "Xenon" => Some(GasType::Xenon),
            "Custom" => Some(GasType::Custom),
            _ => None,
        }
    }
}

/// Orientation of blind slats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlatOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl SlatOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlatOrientation::Horizontal => "Horizontal",
            SlatOrientation::Vertical => "Vertical",
        }
    }

    pub fn parse(s: &str) -> Option<SlatOrientation> {
        match s {
            "Horizontal" => Some(SlatOrientation::Horizontal),
            "Vertical" => Some(SlatOrientation::Vertical),
            _ => None,
        }
    }
}

/// Kind of a heat-transfer surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    #[default]
    Wall,
    Floor,
    RoofCeiling,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Wall => "Wall",
            SurfaceKind::Floor => "Floor",
            SurfaceKind::RoofCeiling => "RoofCeiling",
        }
    }

    pub fn parse(s: &str) -> Option<SurfaceKind> {
        match s {
            "Wall" => Some(SurfaceKind::Wall),
            "Floor" => Some(SurfaceKind::Floor),
            "RoofCeiling" => Some(SurfaceKind::RoofCeiling),
            _ => None,
        }
    }
}

/// Outward boundary condition of a surface
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    Outdoors {
        sun_exposure: bool,
        wind_exposure: bool,
    },
    Ground,
    Adiabatic,
    Surface {
        adjacent_surface: String,
    },
}

impl Boundary {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Boundary::Outdoors { .. } => "Outdoors",
            Boundary::Ground => "Ground",
            Boundary::Adiabatic => "Adiabatic",
            Boundary::Surface { .. } => "Surface",
        }
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Boundary::Outdoors {
            sun_exposure: true,
            wind_exposure: true,
        }
    }
}

/// Discriminates the layer variants without carrying their data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Opaque,
    NoMass,
    Glazing,
    SimpleGlazing,
    Gas,
    Blind,
    Shade,
}

/// One material layer of any kind
#[derive(Debug, Clone)]
pub enum Layer {
    Opaque(OpaqueLayer),
    NoMass(NoMassLayer),
    Glazing(GlazingLayer),
    SimpleGlazing(SimpleGlazingLayer),
    Gas(GasLayer),
    Blind(BlindLayer),
    Shade(ShadeLayer),
}

impl Layer {
    pub fn handle(&self) -> Handle {
        match self {
            Layer::Opaque(l) => l.handle(),
            Layer::NoMass(l) => l.handle(),
            Layer::Glazing(l) => l.handle(),
            Layer::SimpleGlazing(l) => l.handle(),
            Layer::Gas(l) => l.handle(),
            Layer::Blind(l) => l.handle(),
            Layer::Shade(l) => l.handle(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Layer::Opaque(l) => l.name(),
            Layer::NoMass(l) => l.name(),
            Layer::Glazing(l) => l.name(),
            Layer::SimpleGlazing(l) => l.name(),
            Layer::Gas(l) => l.name(),
            Layer::Blind(l) => l.name(),
            Layer::Shade(l) => l.name(),
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Opaque(_) => LayerKind::Opaque,
            Layer::NoMass(_) => LayerKind::NoMass,
            Layer::Glazing(_) => LayerKind::Glazing,
            Layer::SimpleGlazing(_) => LayerKind::SimpleGlazing,
            Layer::Gas(_) => LayerKind::Gas,
            Layer::Blind(_) => LayerKind::Blind,
            Layer::Shade(_) => LayerKind::Shade,
        }
    }

    pub fn is_gas(&self) -> bool {
        matches!(self, Layer::Gas(_))
    }
}

/// Opaque material layer with full thermal mass
#[derive(Debug, Clone)]
pub struct OpaqueLayer {
    handle: Handle,
    name: String,
    roughness: Roughness,
    thickness: f64,
    conductivity: f64,
    density: f64,
    specific_heat: f64,
    thermal_absorptance: f64,
    solar_absorptance: f64,
    visible_absorptance: f64,
}

impl OpaqueLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            roughness: Roughness::default(),
            thickness: 0.0,
            conductivity: 0.0,
            density: 0.0,
            specific_heat: 0.0,
            thermal_absorptance: 0.9,
            solar_absorptance: 0.7,
            visible_absorptance: 0.7,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_roughness(&mut self, value: Roughness) {
        self.roughness = value;
    }

    pub fn set_thickness(&mut self, value: f64) {
        self.thickness = value;
    }

    pub fn set_conductivity(&mut self, value: f64) {
        self.conductivity = value;
    }

    pub fn set_density(&mut self, value: f64) {
        self.density = value;
    }

    pub fn set_specific_heat(&mut self, value: f64) {
        self.specific_heat = value;
    }

    pub fn set_thermal_absorptance(&mut self, value: f64) {
        self.thermal_absorptance = frac(value);
    }

    pub fn set_solar_absorptance(&mut self, value: f64) {
        self.solar_absorptance = frac(value);
    }

    pub fn set_visible_absorptance(&mut self, value: f64) {
        self.visible_absorptance = frac(value);
    }

    pub fn roughness(&self) -> Roughness {
        self.roughness
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn specific_heat(&self) -> f64 {
        self.specific_heat
    }

    pub fn thermal_absorptance(&self) -> f64 {
        self.thermal_absorptance
    }

    pub fn solar_absorptance(&self) -> f64 {
        self.solar_absorptance
    }

    pub fn visible_absorptance(&self) -> f64 {
        self.visible_absorptance
    }
}

/// Opaque layer described only by its thermal resistance
#[derive(Debug, Clone)]
pub struct NoMassLayer {
    handle: Handle,
    name: String,
    r_value: f64,
    roughness: Roughness,
    thermal_absorptance: f64,
    solar_absorptance: f64,
    visible_absorptance: f64,
}

impl NoMassLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            r_value: 0.0,
            roughness: Roughness::default(),
            thermal_absorptance: 0.9,
            solar_absorptance: 0.7,
            visible_absorptance: 0.7,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_r_value(&mut self, value: f64) {
        self.r_value = value;
    }

    pub fn set_roughness(&mut self, value: Roughness) {
        self.roughness = value;
    }

    pub fn set_thermal_absorptance(&mut self, value: f64) {
        self.thermal_absorptance = frac(value);
    }

    pub fn set_solar_absorptance(&mut self, value: f64) {
        self.solar_absorptance = frac(value);
    }

    pub fn set_visible_absorptance(&mut self, value: f64) {
        self.visible_absorptance = frac(value);
    }

    pub fn r_value(&self) -> f64 {
        self.r_value
    }

    pub fn roughness(&self) -> Roughness {
        self.roughness
    }

    pub fn thermal_absorptance(&self) -> f64 {
        self.thermal_absorptance
    }

    pub fn solar_absorptance(&self) -> f64 {
        self.solar_absorptance
    }

    pub fn visible_absorptance(&self) -> f64 {
        self.visible_absorptance
    }
}

/// Single glazing pane
#[derive(Debug, Clone)]
pub struct GlazingLayer {
    handle: Handle,
    name: String,
    thickness: f64,
    solar_transmittance: f64,
    solar_reflectance: f64,
    visible_transmittance: f64,
    visible_reflectance: f64,
    infrared_transmittance: f64,
    front_emissivity: f64,
    back_emissivity: f64,
    conductivity: f64,
    dirt_correction: f64,
    solar_diffusing: bool,
}

impl GlazingLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            thickness: 0.003,
            solar_transmittance: 0.85,
            solar_reflectance: 0.075,
            visible_transmittance: 0.9,
            visible_reflectance: 0.075,
            infrared_transmittance: 0.0,
            front_emissivity: 0.84,
            back_emissivity: 0.84,
            conductivity: 0.9,
            dirt_correction: 1.0,
            solar_diffusing: false,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_thickness(&mut self, value: f64) {
        self.thickness = value;
    }

    pub fn set_solar_transmittance(&mut self, value: f64) {
        self.solar_transmittance = frac(value);
    }

    pub fn set_solar_reflectance(&mut self, value: f64) {
        self.solar_reflectance = frac(value);
    }

    pub fn set_visible_transmittance(&mut self, value: f64) {
        self.visible_transmittance = frac(value);
    }

    pub fn set_visible_reflectance(&mut self, value: f64) {
        self.visible_reflectance = frac(value);
    }

    pub fn set_infrared_transmittance(&mut self, value: f64) {
        self.infrared_transmittance = frac(value);
    }

    pub fn set_front_emissivity(&mut self, value: f64) {
        self.front_emissivity = frac(value);
    }

    pub fn set_back_emissivity(&mut self, value: f64) {
        self.back_emissivity = frac(value);
    }

    pub fn set_conductivity(&mut self, value: f64) {
        self.conductivity = value;
    }

    pub fn set_dirt_correction(&mut self, value: f64) {
        self.dirt_correction = frac(value);
    }

    pub fn set_solar_diffusing(&mut self, value: bool) {
        self.solar_diffusing = value;
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn solar_transmittance(&self) -> f64 {
        self.solar_transmittance
    }

    pub fn solar_reflectance(&self) -> f64 {
        self.solar_reflectance
    }

    pub fn visible_transmittance(&self) -> f64 {
        self.visible_transmittance
    }

    pub fn visible_reflectance(&self) -> f64 {
        self.visible_reflectance
    }

    pub fn infrared_transmittance(&self) -> f64 {
        self.infrared_transmittance
    }

    pub fn front_emissivity(&self) -> f64 {
        self.front_emissivity
    }

    pub fn back_emissivity(&self) -> f64 {
        self.back_emissivity
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    pub fn dirt_correction(&self) -> f64 {
        self.dirt_correction
    }

    pub fn solar_diffusing(&self) -> bool {
        self.solar_diffusing
    }
}

/// Whole-window glazing system described by U-factor and SHGC
#[derive(Debug, Clone)]
pub struct SimpleGlazingLayer {
    handle: Handle,
    name: String,
    u_factor: f64,
    shgc: f64,
    visible_transmittance: f64,
}

impl SimpleGlazingLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            u_factor: 0.0,
            shgc: 0.0,
            visible_transmittance: 0.54,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_u_factor(&mut self, value: f64) {
        self.u_factor = value;
    }

    pub fn set_shgc(&mut self, value: f64) {
        self.shgc = frac(value);
    }

    pub fn set_visible_transmittance(&mut self, value: f64) {
        self.visible_transmittance = frac(value);
    }

    pub fn u_factor(&self) -> f64 {
        self.u_factor
    }

    pub fn shgc(&self) -> f64 {
        self.shgc
    }

    pub fn visible_transmittance(&self) -> f64 {
        self.visible_transmittance
    }
}

/// Gas gap between window panes
#[derive(Debug, Clone)]
pub struct GasLayer {
    handle: Handle,
    name: String,
    gas_type: GasType,
    thickness: f64,
    conductivity_coeff_a: f64,
    conductivity_coeff_b: f64,
    conductivity_coeff_c: f64,
    viscosity_coeff_a: f64,
    viscosity_coeff_b: f64,
    viscosity_coeff_c: f64,
    specific_heat_coeff_a: f64,
    specific_heat_coeff_b: f64,
    specific_heat_coeff_c: f64,
    specific_heat_ratio: f64,
    molecular_weight: f64,
}

impl GasLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            gas_type: GasType::default(),
            thickness: 0.0125,
            conductivity_coeff_a: 0.0,
            conductivity_coeff_b: 0.0,
            conductivity_coeff_c: 0.0,
            viscosity_coeff_a: 0.0,
            viscosity_coeff_b: 0.0,
            viscosity_coeff_c: 0.0,
            specific_heat_coeff_a: 0.0,
            specific_heat_coeff_b: 0.0,
            specific_heat_coeff_c: 0.0,
            specific_heat_ratio: 0.0,
            molecular_weight: 0.0,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_gas_type(&mut self, value: GasType) {
        self.gas_type = value;
    }

    pub fn set_thickness(&mut self, value: f64) {
        self.thickness = value;
    }

    pub fn set_conductivity_coeff_a(&mut self, value: f64) {
        self.conductivity_coeff_a = value;
    }

    pub fn set_conductivity_coeff_b(&mut self, value: f64) {
        self.conductivity_coeff_b = value;
    }

    pub fn set_conductivity_coeff_c(&mut self, value: f64) {
        self.conductivity_coeff_c = value;
    }

    pub fn set_viscosity_coeff_a(&mut self, value: f64) {
        self.viscosity_coeff_a = value;
    }

    pub fn set_viscosity_coeff_b(&mut self, value: f64) {
        self.viscosity_coeff_b = value;
    }

    pub fn set_viscosity_coeff_c(&mut self, value: f64) {
        self.viscosity_coeff_c = value;
    }

    pub fn set_specific_heat_coeff_a(&mut self, value: f64) {
        self.specific_heat_coeff_a = value;
    }

    pub fn set_specific_heat_coeff_b(&mut self, value: f64) {
        self.specific_heat_coeff_b = value;
    }

    pub fn set_specific_heat_coeff_c(&mut self, value: f64) {
        self.specific_heat_coeff_c = value;
    }

    pub fn set_specific_heat_ratio(&mut self, value: f64) {
        self.specific_heat_ratio = value;
    }

    pub fn set_molecular_weight(&mut self, value: f64) {
        self.molecular_weight = value;
    }

    pub fn gas_type(&self) -> GasType {
        self.gas_type
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn conductivity_coeff_a(&self) -> f64 {
        self.conductivity_coeff_a
    }

    pub fn conductivity_coeff_b(&self) -> f64 {
        self.conductivity_coeff_b
    }

    pub fn conductivity_coeff_c(&self) -> f64 {
        self.conductivity_coeff_c
    }

    pub fn viscosity_coeff_a(&self) -> f64 {
        self.viscosity_coeff_a
    }

    pub fn viscosity_coeff_b(&self) -> f64 {
        self.viscosity_coeff_b
    }

    pub fn viscosity_coeff_c(&self) -> f64 {
        self.viscosity_coeff_c
    }

    pub fn specific_heat_coeff_a(&self) -> f64 {
        self.specific_heat_coeff_a
    }

    pub fn specific_heat_coeff_b(&self) -> f64 {
        self.specific_heat_coeff_b
    }

    pub fn specific_heat_coeff_c(&self) -> f64 {
        self.specific_heat_coeff_c
    }

    pub fn specific_heat_ratio(&self) -> f64 {
        self.specific_heat_ratio
    }

    pub fn molecular_weight(&self) -> f64 {
        self.molecular_weight
    }
}

/// Slatted blind layer
#[derive(Debug, Clone)]
pub struct BlindLayer {
    handle: Handle,
    name: String,
    slat_orientation: SlatOrientation,
    slat_width: f64,
    slat_separation: f64,
    slat_thickness: f64,
    slat_angle: f64,
    slat_conductivity: f64,
    solar_transmittance: f64,
    solar_reflectance: f64,
    visible_transmittance: f64,
    visible_reflectance: f64,
    infrared_emissivity: f64,
    distance_to_glass: f64,
    opening_multiplier: f64,
}

impl BlindLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            slat_orientation: SlatOrientation::default(),
            slat_width: 0.025,
            slat_separation: 0.01875,
            slat_thickness: 0.001,
            slat_angle: 45.0,
            slat_conductivity: 221.0,
            solar_transmittance: 0.0,
            solar_reflectance: 0.5,
            visible_transmittance: 0.0,
            visible_reflectance: 0.5,
            infrared_emissivity: 0.9,
            distance_to_glass: 0.05,
            opening_multiplier: 0.5,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_slat_orientation(&mut self, value: SlatOrientation) {
        self.slat_orientation = value;
    }

    pub fn set_slat_width(&mut self, value: f64) {
        self.slat_width = value;
    }

    pub fn set_slat_separation(&mut self, value: f64) {
        self.slat_separation = value;
    }

    pub fn set_slat_thickness(&mut self, value: f64) {
        self.slat_thickness = value;
    }

    pub fn set_slat_angle(&mut self, value: f64) {
        self.slat_angle = value.clamp(0.0, 180.0);
    }

    pub fn set_slat_conductivity(&mut self, value: f64) {
        self.slat_conductivity = value;
    }

    pub fn set_solar_transmittance(&mut self, value: f64) {
        self.solar_transmittance = frac(value);
    }

    pub fn set_solar_reflectance(&mut self, value: f64) {
        self.solar_reflectance = frac(value);
    }

    pub fn set_visible_transmittance(&mut self, value: f64) {
        self.visible_transmittance = frac(value);
    }

    pub fn set_visible_reflectance(&mut self, value: f64) {
        self.visible_reflectance = frac(value);
    }

    pub fn set_infrared_emissivity(&mut self, value: f64) {
        self.infrared_emissivity = frac(value);
    }

    pub fn set_distance_to_glass(&mut self, value: f64) {
        self.distance_to_glass = value;
    }

    pub fn set_opening_multiplier(&mut self, value: f64) {
        self.opening_multiplier = frac(value);
    }

    pub fn slat_orientation(&self) -> SlatOrientation {
        self.slat_orientation
    }

    pub fn slat_width(&self) -> f64 {
        self.slat_width
    }

    pub fn slat_separation(&self) -> f64 {
        self.slat_separation
    }

    pub fn slat_thickness(&self) -> f64 {
        self.slat_thickness
    }

    pub fn slat_angle(&self) -> f64 {
        self.slat_angle
    }

    pub fn slat_conductivity(&self) -> f64 {
        self.slat_conductivity
    }

    pub fn solar_transmittance(&self) -> f64 {
        self.solar_transmittance
    }

    pub fn solar_reflectance(&self) -> f64 {
        self.solar_reflectance
    }

    pub fn visible_transmittance(&self) -> f64 {
        self.visible_transmittance
    }

    pub fn visible_reflectance(&self) -> f64 {
        self.visible_reflectance
    }

    pub fn infrared_emissivity(&self) -> f64 {
        self.infrared_emissivity
    }

    pub fn distance_to_glass(&self) -> f64 {
        self.distance_to_glass
    }

    pub fn opening_multiplier(&self) -> f64 {
        self.opening_multiplier
    }
}

/// Diffusing shade layer
#[derive(Debug, Clone)]
pub struct ShadeLayer {
    handle: Handle,
    name: String,
    solar_transmittance: f64,
    solar_reflectance: f64,
    visible_transmittance: f64,
    visible_reflectance: f64,
    infrared_emissivity: f64,
    infrared_transmittance: f64,
    thickness: f64,
    conductivity: f64,
    distance_to_glass: f64,
    opening_multiplier: f64,
    airflow_permeability: f64,
}

impl ShadeLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            solar_transmittance: 0.4,
            solar_reflectance: 0.5,
            visible_transmittance: 0.4,
            visible_reflectance: 0.4,
            infrared_emissivity: 0.9,
            infrared_transmittance: 0.0,
            thickness: 0.005,
            conductivity: 0.1,
            distance_to_glass: 0.05,
            opening_multiplier: 0.5,
            airflow_permeability: 0.0,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_solar_transmittance(&mut self, value: f64) {
        self.solar_transmittance = frac(value);
    }

    pub fn set_solar_reflectance(&mut self, value: f64) {
        self.solar_reflectance = frac(value);
    }

    pub fn set_visible_transmittance(&mut self, value: f64) {
        self.visible_transmittance = frac(value);
    }

    pub fn set_visible_reflectance(&mut self, value: f64) {
        self.visible_reflectance = frac(value);
    }

    pub fn set_infrared_emissivity(&mut self, value: f64) {
        self.infrared_emissivity = frac(value);
    }

    pub fn set_infrared_transmittance(&mut self, value: f64) {
        self.infrared_transmittance = frac(value);
    }

    pub fn set_thickness(&mut self, value: f64) {
        self.thickness = value;
    }

    pub fn set_conductivity(&mut self, value: f64) {
        self.conductivity = value;
    }

    pub fn set_distance_to_glass(&mut self, value: f64) {
        self.distance_to_glass = value;
    }

    pub fn set_opening_multiplier(&mut self, value: f64) {
        self.opening_multiplier = frac(value);
    }

    pub fn set_airflow_permeability(&mut self, value: f64) {
        self.airflow_permeability = frac(value);
    }

    pub fn solar_transmittance(&self) -> f64 {
        self.solar_transmittance
    }

    pub fn solar_reflectance(&self) -> f64 {
        self.solar_reflectance
    }

    pub fn visible_transmittance(&self) -> f64 {
        self.visible_transmittance
    }

    pub fn visible_reflectance(&self) -> f64 {
        self.visible_reflectance
    }

    pub fn infrared_emissivity(&self) -> f64 {
        self.infrared_emissivity
    }

    pub fn infrared_transmittance(&self) -> f64 {
        self.infrared_transmittance
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    pub fn distance_to_glass(&self) -> f64 {
        self.distance_to_glass
    }

    pub fn opening_multiplier(&self) -> f64 {
        self.opening_multiplier
    }

    pub fn airflow_permeability(&self) -> f64 {
        self.airflow_permeability
    }
}

/// Layered construction referencing its layers by name, outside to inside
#[derive(Debug, Clone)]
pub struct Construction {
    handle: Handle,
    name: String,
    layers: Vec<String>,
}

impl Construction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            layers: Vec::new(),
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_layers(&mut self, layers: Vec<String>) {
        self.layers = layers;
    }

    pub fn layers(&self) -> &[String] {
        &self.layers
    }
}

/// Reflective finish for shading surfaces
#[derive(Debug, Clone)]
pub struct ShadeFinish {
    handle: Handle,
    name: String,
    solar_reflectance: f64,
    visible_reflectance: f64,
    is_specular: bool,
}

impl ShadeFinish {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            solar_reflectance: 0.2,
            visible_reflectance: 0.2,
            is_specular: false,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_solar_reflectance(&mut self, value: f64) {
        self.solar_reflectance = frac(value);
    }

    pub fn set_visible_reflectance(&mut self, value: f64) {
        self.visible_reflectance = frac(value);
    }

    pub fn set_is_specular(&mut self, value: bool) {
        self.is_specular = value;
    }

    pub fn solar_reflectance(&self) -> f64 {
        self.solar_reflectance
    }

    pub fn visible_reflectance(&self) -> f64 {
        self.visible_reflectance
    }

    pub fn is_specular(&self) -> bool {
        self.is_specular
    }
}

/// Thermal zone
#[derive(Debug, Clone)]
pub struct Space {
    handle: Handle,
    name: String,
    multiplier: u32,
}

impl Space {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            multiplier: 1,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_multiplier(&mut self, value: u32) {
        self.multiplier = value.max(1);
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }
}

/// Heat-transfer surface belonging to a space
#[derive(Debug, Clone)]
pub struct Surface {
    handle: Handle,
    name: String,
    space: String,
    kind: SurfaceKind,
    boundary: Boundary,
    vertices: Vec<[f64; 3]>,
    construction: Option<String>,
}

impl Surface {
    pub fn new(name: impl Into<String>, space: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            space: space.into(),
            kind: SurfaceKind::default(),
            boundary: Boundary::default(),
            vertices: Vec::new(),
            construction: None,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn space(&self) -> &str {
        &self.space
    }

    pub fn set_kind(&mut self, value: SurfaceKind) {
        self.kind = value;
    }

    pub fn set_boundary(&mut self, value: Boundary) {
        self.boundary = value;
    }

    pub fn set_vertices(&mut self, vertices: Vec<[f64; 3]>) {
        self.vertices = vertices;
    }

    pub fn set_construction(&mut self, name: impl Into<String>) {
        self.construction = Some(name.into());
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn construction(&self) -> Option<&str> {
        self.construction.as_deref()
    }
}

/// Window or skylight cut into a parent surface
#[derive(Debug, Clone)]
pub struct SubSurface {
    handle: Handle,
    name: String,
    parent_surface: String,
    vertices: Vec<[f64; 3]>,
    construction: Option<String>,
}

impl SubSurface {
    pub fn new(name: impl Into<String>, parent_surface: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            parent_surface: parent_surface.into(),
            vertices: Vec::new(),
            construction: None,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_surface(&self) -> &str {
        &self.parent_surface
    }

    pub fn set_vertices(&mut self, vertices: Vec<[f64; 3]>) {
        self.vertices = vertices;
    }

    pub fn set_construction(&mut self, name: impl Into<String>) {
        self.construction = Some(name.into());
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn construction(&self) -> Option<&str> {
        self.construction.as_deref()
    }
}

/// Shading surface detached from any space
#[derive(Debug, Clone)]
pub struct ShadingSurface {
    handle: Handle,
    name: String,
    vertices: Vec<[f64; 3]>,
    finish: Option<String>,
}

impl ShadingSurface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(),
            name: name.into(),
            vertices: Vec::new(),
            finish: None,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_vertices(&mut self, vertices: Vec<[f64; 3]>) {
        self.vertices = vertices;
    }

    pub fn set_finish(&mut self, name: impl Into<String>) {
        self.finish = Some(name.into());
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn finish(&self) -> Option<&str> {
        self.finish.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_setters_clamp() {
        let mut pane = GlazingLayer::new("Clear 3mm");
        pane.set_solar_transmittance(1.4);
        assert_eq!(pane.solar_transmittance(), 1.0);
        pane.set_solar_reflectance(-0.2);
        assert_eq!(pane.solar_reflectance(), 0.0);

        let mut finish = ShadeFinish::new("Overhang Finish");
        finish.set_solar_reflectance(2.0);
        assert_eq!(finish.solar_reflectance(), 1.0);
    }

    #[test]
    fn dimensional_setters_do_not_clamp() {
        let mut layer = OpaqueLayer::new("Generic Brick");
        layer.set_thickness(3.5);
        assert_eq!(layer.thickness(), 3.5);
        layer.set_conductivity(400.0);
        assert_eq!(layer.conductivity(), 400.0);
    }

    #[test]
    fn layer_kind_matches_variant() {
        let gas = Layer::Gas(GasLayer::new("Air Gap"));
        assert_eq!(gas.kind(), LayerKind::Gas);
        assert!(gas.is_gas());
        assert_eq!(gas.name(), "Air Gap");

        let pane = Layer::Glazing(GlazingLayer::new("Clear 3mm"));
        assert_eq!(pane.kind(), LayerKind::Glazing);
        assert!(!pane.is_gas());
    }

    #[test]
    fn handles_are_distinct() {
        let a = OpaqueLayer::new("A");
        let b = OpaqueLayer::new("A");
        assert_ne!(a.handle(), b.handle());
    }

    #[test]
    fn space_multiplier_is_at_least_one() {
        let mut space = Space::new("Zone 1");
        space.set_multiplier(0);
        assert_eq!(space.multiplier(), 1);
        space.set_multiplier(4);
        assert_eq!(space.multiplier(), 4);
    }
}
