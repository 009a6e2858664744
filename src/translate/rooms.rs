//! Geometry adapters: rooms, faces, apertures and detached shades.
//!
//! These are pure transcription: vertex lists are copied verbatim onto the
//! sim objects, with no planarity or winding checks.

use serde_json::Value;
use std::path::Path;

use super::{closest_name, EnergyObject, RawObject};
use crate::error::{Result, TranslateError};
use crate::fields::FieldMap;
use crate::schema::ObjectType;
use crate::sim;

/// Thermal zone with its heat-transfer faces
pub struct Room {
    raw: RawObject,
}

impl Room {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::Room, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::Room, path)?,
        })
    }
}

impl EnergyObject for Room {
    const TYPE: ObjectType = ObjectType::Room;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.space_by_name(self.name()).map(|s| s.handle())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let name = fields.str("name")?;

        let mut space = sim::Space::new(name);
        space.set_multiplier(fields.u32_or("multiplier", 1)?);
        let handle = model.add_space(space);

        for face in fields.array("faces")? {
            Face::from_value(face.clone(), name)?.translate(model)?;
        }
        Ok(handle)
    }
}

/// Heat-transfer face of a room
pub struct Face {
    raw: RawObject,
    space: String,
}

impl Face {
    /// `space` is the name of the owning room's zone.
    pub fn from_value(value: Value, space: impl Into<String>) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::Face, value)?,
            space: space.into(),
        })
    }
}

impl EnergyObject for Face {
    const TYPE: ObjectType = ObjectType::Face;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.surface_by_name(self.name()).map(|s| s.handle())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let name = fields.str("name")?;

        let mut surface = sim::Surface::new(name, &self.space);
        let face_type = fields.str_or("face_type", "Wall")?;
        surface.set_kind(
            sim::SurfaceKind::parse(face_type)
                .ok_or_else(|| fields.unknown_variant("face_type", face_type))?,
        );
        surface.set_boundary(match fields.value("boundary_condition") {
            Some(value) => parse_boundary(&self.raw.label(), value)?,
            None => sim::Boundary::default(),
        });
        surface.set_vertices(geometry_vertices(&self.raw.label(), &fields)?);
        if let Some(construction) = fields.opt_str("construction")? {
            if model.construction_by_name(construction).is_none() {
                return Err(TranslateError::UnresolvedReference {
                    kind: "construction",
                    name: construction.to_string(),
                    suggestion: closest_name(construction, model.construction_names()),
                });
            }
            surface.set_construction(construction);
        }
        let handle = model.add_surface(surface);

        for aperture in fields.array_or_empty("apertures")? {
            Aperture::from_value(aperture.clone(), name)?.translate(model)?;
        }
        Ok(handle)
    }
}

/// Window or skylight cut into a face
pub struct Aperture {
    raw: RawObject,
    parent: String,
}

impl Aperture {
    /// `parent` is the name of the face the aperture is cut into.
    pub fn from_value(value: Value, parent: impl Into<String>) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::Aperture, value)?,
            parent: parent.into(),
        })
    }
}

impl EnergyObject for Aperture {
    const TYPE: ObjectType = ObjectType::Aperture;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.sub_surface_by_name(self.name()).map(|s| s.handle())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut sub_surface = sim::SubSurface::new(fields.str("name")?, &self.parent);
        sub_surface.set_vertices(geometry_vertices(&self.raw.label(), &fields)?);
        if let Some(construction) = fields.opt_str("construction")? {
            if model.construction_by_name(construction).is_none() {
                return Err(TranslateError::UnresolvedReference {
                    kind: "construction",
                    name: construction.to_string(),
                    suggestion: closest_name(construction, model.construction_names()),
                });
            }
            sub_surface.set_construction(construction);
        }
        Ok(model.add_sub_surface(sub_surface))
    }
}

/// Context-free shading surface
pub struct Shade {
    raw: RawObject,
}

impl Shade {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: RawObject::from_value(ObjectType::Shade, value)?,
        })
    }

    pub fn read_from_disk(path: &Path) -> Result<Self> {
        Ok(Self {
            raw: RawObject::read_from_disk(ObjectType::Shade, path)?,
        })
    }
}

impl EnergyObject for Shade {
    const TYPE: ObjectType = ObjectType::Shade;

    fn raw(&self) -> &RawObject {
        &self.raw
    }

    fn find_existing(&self, model: &sim::Model) -> Option<sim::Handle> {
        model.shading_surface_by_name(self.name()).map(|s| s.handle())
    }

    fn create(&self, model: &mut sim::Model) -> Result<sim::Handle> {
        let fields = self.raw.fields();
        let mut shading = sim::ShadingSurface::new(fields.str("name")?);
        shading.set_vertices(geometry_vertices(&self.raw.label(), &fields)?);
        if let Some(finish) = fields.opt_str("construction")? {
            if model.shade_finish_by_name(finish).is_none() {
                return Err(TranslateError::UnresolvedReference {
                    kind: "shade construction",
                    name: finish.to_string(),
                    suggestion: closest_name(finish, model.shade_finish_names()),
                });
            }
            shading.set_finish(finish);
        }
        Ok(model.add_shading_surface(shading))
    }
}

/// Parse a boundary-condition object by its own `type` discriminator.
fn parse_boundary(face: &str, value: &Value) -> Result<sim::Boundary> {
    let fields = FieldMap::new(format!("boundary condition of {face}"), value);
    let kind = fields.str("type")?;
    match kind {
        "Outdoors" => Ok(sim::Boundary::Outdoors {
            sun_exposure: fields.bool_or("sun_exposure", true)?,
            wind_exposure: fields.bool_or("wind_exposure", true)?,
        }),
        "Ground" => Ok(sim::Boundary::Ground),
        "Adiabatic" => Ok(sim::Boundary::Adiabatic),
        "Surface" => Ok(sim::Boundary::Surface {
            adjacent_surface: fields.str("adjacent_face")?.to_string(),
        }),
        other => Err(TranslateError::UnknownType(other.to_string())),
    }
}

/// Read `geometry.boundary` as a list of `[x, y, z]` triples.
fn geometry_vertices(label: &str, fields: &FieldMap) -> Result<Vec<[f64; 3]>> {
    let geometry = fields.value("geometry").ok_or_else(|| {
        TranslateError::MissingField {
            object: label.to_string(),
            field: "geometry".to_string(),
        }
    })?;
    let points = FieldMap::new(label, geometry).array("boundary")?;

    let mut vertices = Vec::with_capacity(points.len());
    for point in points {
        let triple = point
            .as_array()
            .filter(|items| items.len() == 3)
            .and_then(|items| {
                let x = items[0].as_f64()?;
                let y = items[1].as_f64()?;
                let z = items[2].as_f64()?;
                Some([x, y, z])
            })
            .ok_or_else(|| TranslateError::InvalidField {
                object: label.to_string(),
                field: "boundary".to_string(),
                expected: "vertex triple",
                value: point.to_string(),
            })?;
        vertices.push(triple);
    }
    Ok(vertices)
}
