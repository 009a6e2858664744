//! End-to-end translation tests
//!
//! Each test loads a complete model document from `fixtures/`, translates it
//! onto a fresh simulation model, and checks the resulting objects or the
//! rendered input deck.

use std::path::{Path, PathBuf};

use atrium_energy::schema::{self, SchemaStore};
use atrium_energy::sim::{self, idf};
use atrium_energy::translate::constructions::WindowConstruction;
use atrium_energy::translate::EnergyObject;
use atrium_energy::EnergyModel;

const SINGLE_ZONE: &str = include_str!("fixtures/model_single_zone.json");
const ORPHANED_FACE: &str = include_str!("fixtures/model_orphaned_face.json");
const BAD_REFERENCES: &str = include_str!("fixtures/model_bad_references.json");

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn single_zone() -> EnergyModel {
    EnergyModel::from_value(serde_json::from_str(SINGLE_ZONE).unwrap()).unwrap()
}

// ====== Validation ======

#[test]
fn test_single_zone_document_is_valid() {
    let document = single_zone();
    let issues = document.validation_errors().unwrap();
    assert!(issues.is_empty(), "unexpected issues: {issues:#?}");
    assert!(document.is_valid().unwrap());
}

// ====== Whole-document translation ======

#[test]
fn test_single_zone_document_translates() {
    let mut document = single_zone();
    let model = document.to_sim_model().unwrap();

    assert!(
        document.errors().is_empty(),
        "unexpected errors: {:#?}",
        document.errors()
    );
    assert!(document.warnings().is_empty());

    assert_eq!(model.layers().len(), 4);
    assert_eq!(model.constructions().len(), 2);
    assert_eq!(model.shade_finishes().len(), 1);
    assert_eq!(model.spaces().len(), 1);
    assert_eq!(model.surfaces().len(), 2);
    assert_eq!(model.sub_surfaces().len(), 1);
    assert_eq!(model.shading_surfaces().len(), 1);
    assert_eq!(model.object_count(), 12);

    let wall = match model.surface_by_name("South Wall") {
        Some(s) => s,
        None => panic!("Expected surface 'South Wall'"),
    };
    assert_eq!(wall.construction(), Some("Exterior Wall"));
    assert_eq!(wall.boundary().kind_str(), "Outdoors");
    assert_eq!(wall.space(), "Office");

    let floor = model.surface_by_name("Office Floor").unwrap();
    assert_eq!(floor.kind().as_str(), "Floor");
    assert_eq!(floor.boundary().kind_str(), "Ground");

    let window = model.sub_surface_by_name("South Window").unwrap();
    assert_eq!(window.parent_surface(), "South Wall");
    assert_eq!(window.construction(), Some("Double Pane"));

    let pane_stack = model.construction_by_name("Double Pane").unwrap();
    assert_eq!(pane_stack.layers(), ["Clear 3mm", "Air Gap 12mm", "Clear 3mm"]);

    let overhang = model.shading_surface_by_name("South Overhang").unwrap();
    assert_eq!(overhang.finish(), Some("Overhang Finish"));
    assert_eq!(overhang.vertices().len(), 4);
}

#[test]
fn test_translation_is_idempotent() {
    let mut document = single_zone();
    let mut model = sim::Model::new();

    document.translate_into(&mut model).unwrap();
    let first_count = model.object_count();
    document.translate_into(&mut model).unwrap();
    assert_eq!(model.object_count(), first_count);

    // A second copy of the same document finds every object by name.
    let mut copy = single_zone();
    copy.translate_into(&mut model).unwrap();
    assert_eq!(model.object_count(), first_count);
}

#[test]
fn test_orphaned_faces_abort_translation() {
    let mut document =
        EnergyModel::from_value(serde_json::from_str(ORPHANED_FACE).unwrap()).unwrap();
    let mut model = sim::Model::new();

    match document.translate_into(&mut model) {
        Err(e) => assert_eq!(
            e.to_string(),
            "Model is not translatable: contains orphaned faces (1)"
        ),
        Ok(()) => panic!("Expected orphaned faces to abort translation"),
    }
    assert!(model.is_empty());
}

#[test]
fn test_unresolved_references_are_collected() {
    let mut document =
        EnergyModel::from_value(serde_json::from_str(BAD_REFERENCES).unwrap()).unwrap();
    let model = document.to_sim_model().unwrap();

    assert_eq!(document.errors().len(), 2);
    assert_eq!(
        document.errors()[0],
        "No material named 'Genric Brick' in the model (did you mean 'Generic Brick'?)"
    );
    assert_eq!(
        document.errors()[1],
        "No construction named 'Exterior Wall' in the model"
    );

    // The skipped construction and face are absent; everything else landed.
    assert_eq!(model.layers().len(), 1);
    assert!(model.constructions().is_empty());
    assert_eq!(model.spaces().len(), 1);
    assert!(model.surfaces().is_empty());
}

// ====== Deck export ======

#[test]
fn test_compact_deck_matches_golden() {
    let mut document = single_zone();
    let model = document.to_sim_model().unwrap();

    let opts = idf::DeckOptions {
        format: idf::DeckFormat::Compact,
        header: false,
        ..idf::DeckOptions::default()
    };
    let deck = idf::write_deck(&model, &opts);

    let expected = "\
Material,Generic Brick,MediumRough,0.1,0.9,1920,790,0.9,0.7,0.7;
Material:NoMass,Insulation Board,MediumRough,2.5,0.9,0.7,0.7;
WindowMaterial:Glazing,Clear 3mm,SpectralAverage,,0.003,0.837,0.075,0.075,0.9,0.075,0.075,0,0.84,0.84,0.9,1,No;
WindowMaterial:Gas,Air Gap 12mm,Air,0.0125;
Construction,Exterior Wall,Generic Brick,Insulation Board;
Construction,Double Pane,Clear 3mm,Air Gap 12mm,Clear 3mm;
Zone,Office,1;
BuildingSurface:Detailed,South Wall,Wall,Exterior Wall,Office,Outdoors,,SunExposed,WindExposed,4,0, 0, 0,5, 0, 0,5, 0, 3,0, 0, 3;
BuildingSurface:Detailed,Office Floor,Floor,,Office,Ground,,NoSun,NoWind,4,0, 0, 0,0, 4, 0,5, 4, 0,5, 0, 0;
FenestrationSurface:Detailed,South Window,Window,Double Pane,South Wall,4,1, 0, 0.8,4, 0, 0.8,4, 0, 2.2,1, 0, 2.2;
Shading:Building:Detailed,South Overhang,,4,0, -1, 3,5, -1, 3,5, 0, 3,0, 0, 3;
ShadingProperty:Reflectance,South Overhang,0.35,0.35,0;
";
    assert_eq!(deck, expected);
}

#[test]
fn test_deck_written_to_disk_carries_header() {
    let mut document = EnergyModel::read_from_disk(&fixture("model_single_zone.json")).unwrap();
    let model = document.to_sim_model().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single_zone.idf");
    let opts = idf::DeckOptions {
        note: Some("Schema set 1.43.0".to_string()),
        ..idf::DeckOptions::default()
    };
    idf::write_deck_to(&path, &model, &opts).unwrap();

    let deck = std::fs::read_to_string(&path).unwrap();
    assert!(deck.starts_with("!- Generated by atrium-energy"));
    assert!(deck.contains("!- Schema set 1.43.0\n"));
    // Default format is pretty: class on its own line, fields indented.
    assert!(deck.contains("BuildingSurface:Detailed,\n"));
    assert!(deck.contains("!- Outside Boundary Condition\n"));
}

// ====== Schema set ======

#[test]
fn test_external_schema_dir_matches_embedded() {
    let embedded = schema::store().unwrap();
    let external =
        SchemaStore::from_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas")).unwrap();

    assert_eq!(external.version(), embedded.version());
    assert_eq!(external.fingerprint(), embedded.fingerprint());
}

// ====== Single-object documents ======

#[test]
fn test_window_construction_reads_from_disk() {
    let mut model = sim::Model::new();
    let construction =
        WindowConstruction::read_from_disk(&fixture("construction_double_pane.json")).unwrap();
    let handle = construction.translate(&mut model).unwrap();

    let stack = model.construction_by_name("Double Pane").unwrap();
    assert_eq!(stack.handle(), handle);
    assert_eq!(stack.layers().len(), 3);
    // Two distinct layers back the three-entry stack.
    assert_eq!(model.layers().len(), 2);

    assert_eq!(construction.translate(&mut model).unwrap(), handle);
    assert_eq!(model.constructions().len(), 1);
}
