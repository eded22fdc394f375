//! The seam between a composed document and whatever produces a file from it.
//!
//! Renderers report failures as [`RenderFailure`]; callers of [`export`] and
//! [`generate`] only see whether a document was produced. A validation
//! rejection is a different outcome and stays an `Err`.

use crate::document::{compose, DocumentBody};
use crate::model::options::RenderOptions;
use crate::validation::{validate, SurveyCandidate, ValidationError};
use log::{info, warn};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderFailure {
    #[error("renderer unavailable: {0}")]
    Unavailable(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(String),
    #[error("pdf error: {0}")]
    Pdf(String),
}

/// A file produced by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub path: PathBuf,
    pub media_type: &'static str,
}

impl RenderedDocument {
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Turns a document body into a distributable file.
pub trait DocumentRenderer {
    fn render(&self, body: &DocumentBody) -> Result<RenderedDocument, RenderFailure>;
}

impl<R: DocumentRenderer + ?Sized> DocumentRenderer for Box<R> {
    fn render(&self, body: &DocumentBody) -> Result<RenderedDocument, RenderFailure> {
        (**self).render(body)
    }
}

/// Renders `body`, returning `None` when nothing was produced. No retry.
pub fn export<R: DocumentRenderer + ?Sized>(
    body: &DocumentBody,
    renderer: &R,
) -> Option<RenderedDocument> {
    match renderer.render(body) {
        Ok(document) => {
            info!("survey document rendered to {}", document.path.display());
            Some(document)
        }
        Err(e) => {
            warn!("survey document was not produced: {}", e);
            None
        }
    }
}

/// Validates, composes and renders a submission in one go.
pub fn generate<R: DocumentRenderer + ?Sized>(
    candidate: SurveyCandidate,
    options: &RenderOptions,
    renderer: &R,
) -> Result<Option<RenderedDocument>, ValidationError> {
    let record = validate(candidate)?;
    let body = compose(&record, options);
    Ok(export(&body, renderer))
}
