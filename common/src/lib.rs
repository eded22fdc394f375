//! Shared survey types and the document pipeline for BA Survey forms.
//!
//! The crate is split the way the flow runs:
//! - `model`: the survey record and its value types.
//! - `validation`: turns a loosely-typed candidate from the UI into a record.
//! - `document`: composes a record into a self-contained HTML document body.
//! - `export`: the seam to whatever turns that body into a file.
//! - `jobs` and `requests`: wire types shared with the export service.

pub mod document;
pub mod export;
pub mod jobs;
pub mod model;
pub mod requests;
pub mod validation;

pub use document::{compose, DocumentBody};
pub use export::{export, generate, DocumentRenderer, RenderFailure, RenderedDocument};
pub use model::options::RenderOptions;
pub use model::survey::SurveyRecord;
pub use validation::{validate, validate_at, SurveyCandidate, ValidationError};
