//! Atrium Energy Model Translator
//!
//! Translates JSON building-energy-model documents (rooms, constructions,
//! materials, window layers) into a populated simulation object model,
//! exported as an EnergyPlus-style input deck.
//!
//! ## Features
//!
//! - **Schema Validation**: every object is checked against an embedded JSON
//!   Schema set; issues are collected as a list, never raised
//! - **Find-or-Create**: sim objects are deduplicated by name, so repeated
//!   references to the same named object share one handle
//! - **Field Transcription**: schema fields map one-to-one onto sim setters,
//!   with numerics coerced to `f64` and schema defaults for absent optionals
//! - **Deck Export**: pretty (aligned field comments) or compact output
//!
//! ## Architecture
//!
//! ```text
//! model.json
//! ├── properties.energy.materials     ──> sim::Layer
//! ├── properties.energy.constructions ──> sim::Construction / sim::ShadeFinish
//! ├── rooms                           ──> sim::Space / sim::Surface / sim::SubSurface
//! └── orphaned_shades                 ──> sim::ShadingSurface
//!                                               │
//!                                               └── sim::idf::write_deck ──> model.idf
//! ```

pub mod error;
pub mod schema;
pub mod fields;
pub mod sim;
pub mod translate;
pub mod config;

pub use config::TranslatorConfig;
pub use error::{Result, TranslateError};
pub use schema::{ObjectType, SchemaStore};
pub use translate::model::EnergyModel;
pub use translate::{EnergyObject, RawObject};
