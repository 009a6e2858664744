//! In-memory stand-in for the building-energy simulation object model
//!
//! The translation layer populates a [`Model`] the way the original system
//! populated an external SDK: named objects with per-field setters, created
//! once and found by name afterwards. The model stores objects in insertion
//! order, enforces nothing beyond what its setters do, and performs no
//! simulation. [`idf`] renders a populated model to an input deck.

pub mod idf;
mod objects;

pub use objects::{
    BlindLayer, Boundary, Construction, GasLayer, GasType, GlazingLayer, Layer, LayerKind,
    NoMassLayer, OpaqueLayer, Roughness, ShadeFinish, ShadeLayer, ShadingSurface,
    SimpleGlazingLayer, SlatOrientation, Space, SubSurface, Surface, SurfaceKind,
};

use uuid::Uuid;

/// Stable identity of a simulation object.
///
/// Handles are assigned when an object is constructed and never change;
/// comparing the handles returned by two translations of the same named
/// object is how callers observe deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(Uuid);

impl Handle {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target simulation model.
///
/// Lookups return the first object inserted under a name; keeping names
/// unique is the caller's find-or-create discipline, not a constraint the
/// model enforces.
#[derive(Debug, Default)]
pub struct Model {
    layers: Vec<Layer>,
    constructions: Vec<Construction>,
    shade_finishes: Vec<ShadeFinish>,
    spaces: Vec<Space>,
    surfaces: Vec<Surface>,
    sub_surfaces: Vec<SubSurface>,
    shading_surfaces: Vec<ShadingSurface>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material layer, returning its handle
    pub fn add_layer(&mut self, layer: Layer) -> Handle {
        let handle = layer.handle();
        self.layers.push(layer);
        handle
    }

    /// Add a construction, returning its handle
    pub fn add_construction(&mut self, construction: Construction) -> Handle {
        let handle = construction.handle();
        self.constructions.push(construction);
        handle
    }

    /// Add a shade finish, returning its handle
    pub fn add_shade_finish(&mut self, finish: ShadeFinish) -> Handle {
        let handle = finish.handle();
        self.shade_finishes.push(finish);
        handle
    }

    /// Add a space, returning its handle
    pub fn add_space(&mut self, space: Space) -> Handle {
        let handle = space.handle();
        self.spaces.push(space);
        handle
    }

    /// Add a heat-transfer surface, returning its handle
    pub fn add_surface(&mut self, surface: Surface) -> Handle {
        let handle = surface.handle();
        self.surfaces.push(surface);
        handle
    }

    /// Add a sub-surface, returning its handle
    pub fn add_sub_surface(&mut self, sub_surface: SubSurface) -> Handle {
        let handle = sub_surface.handle();
        self.sub_surfaces.push(sub_surface);
        handle
    }

    /// Add a shading surface, returning its handle
    pub fn add_shading_surface(&mut self, surface: ShadingSurface) -> Handle {
        let handle = surface.handle();
        self.shading_surfaces.push(surface);
        handle
    }

    /// Find a layer of any kind by name
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    /// Find a layer of a specific kind by name, returning its handle
    pub fn layer_handle_of(&self, kind: LayerKind, name: &str) -> Option<Handle> {
        self.layers
            .iter()
            .find(|l| l.kind() == kind && l.name() == name)
            .map(Layer::handle)
    }

    /// Find a construction by name
    pub fn construction_by_name(&self, name: &str) -> Option<&Construction> {
        self.constructions.iter().find(|c| c.name() == name)
    }

    /// Find a shade finish by name
    pub fn shade_finish_by_name(&self, name: &str) -> Option<&ShadeFinish> {
        self.shade_finishes.iter().find(|f| f.name() == name)
    }

    /// Find a space by name
    pub fn space_by_name(&self, name: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.name() == name)
    }

    /// Find a heat-transfer surface by name
    pub fn surface_by_name(&self, name: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.name() == name)
    }

    /// Find a sub-surface by name
    pub fn sub_surface_by_name(&self, name: &str) -> Option<&SubSurface> {
        self.sub_surfaces.iter().find(|s| s.name() == name)
    }

    /// Find a shading surface by name
    pub fn shading_surface_by_name(&self, name: &str) -> Option<&ShadingSurface> {
        self.shading_surfaces.iter().find(|s| s.name() == name)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn constructions(&self) -> &[Construction] {
        &self.constructions
    }

    pub fn shade_finishes(&self) -> &[ShadeFinish] {
        &self.shade_finishes
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn sub_surfaces(&self) -> &[SubSurface] {
        &self.sub_surfaces
    }

    pub fn shading_surfaces(&self) -> &[ShadingSurface] {
        &self.shading_surfaces
    }

    /// Names of all material layers, for suggestion lookups
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(Layer::name)
    }

    /// Names of all constructions, for suggestion lookups
    pub fn construction_names(&self) -> impl Iterator<Item = &str> {
        self.constructions.iter().map(Construction::name)
    }

    /// Names of all shade finishes, for suggestion lookups
    pub fn shade_finish_names(&self) -> impl Iterator<Item = &str> {
        self.shade_finishes.iter().map(ShadeFinish::name)
    }

    /// Total number of stored objects
    pub fn object_count(&self) -> usize {
        self.layers.len()
            + self.constructions.len()
            + self.shade_finishes.len()
            + self.spaces.len()
            + self.surfaces.len()
            + self.sub_surfaces.len()
            + self.shading_surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_return_first_inserted_match() {
        let mut model = Model::new();
        let mut first = OpaqueLayer::new("Generic Brick");
        first.set_thickness(0.1);
        let first_handle = model.add_layer(Layer::Opaque(first));

        let mut second = OpaqueLayer::new("Generic Brick");
        second.set_thickness(0.2);
        model.add_layer(Layer::Opaque(second));

        let found = model.layer_by_name("Generic Brick").unwrap();
        assert_eq!(found.handle(), first_handle);
        match found {
            Layer::Opaque(l) => assert_eq!(l.thickness(), 0.1),
            other => panic!("unexpected layer kind: {other:?}"),
        }
    }

    #[test]
    fn layer_lookup_is_kind_scoped() {
        let mut model = Model::new();
        model.add_layer(Layer::Gas(GasLayer::new("Generic Gap")));

        assert!(model.layer_handle_of(LayerKind::Gas, "Generic Gap").is_some());
        assert!(model.layer_handle_of(LayerKind::Glazing, "Generic Gap").is_none());
        assert!(model.layer_handle_of(LayerKind::Gas, "Other").is_none());
    }

    #[test]
    fn object_count_spans_all_stores() {
        let mut model = Model::new();
        assert!(model.is_empty());

        model.add_layer(Layer::Opaque(OpaqueLayer::new("m")));
        model.add_construction(Construction::new("c"));
        model.add_shade_finish(ShadeFinish::new("f"));
        model.add_space(Space::new("z"));
        model.add_surface(Surface::new("s", "z"));
        model.add_sub_surface(SubSurface::new("w", "s"));
        model.add_shading_surface(ShadingSurface::new("o"));

        assert_eq!(model.object_count(), 7);
        assert!(!model.is_empty());
    }
}
