//! # Survey document endpoints
//!
//! Routes under `/api/surveys`:
//!
//! - `POST /preview`: validates a `SurveySubmission` and answers with the composed
//!   HTML document straight away. Nothing is written to disk.
//! - `POST /export`: same validation, then schedules a background job that
//!   renders the document to a file (HTML or PDF, per the submission's `format`).
//!   Answers with the `job_id` to poll.
//! - `GET /export/status/{job_id}`: current `JobStatus` of an export job.
//! - `GET /export/file/{job_id}`: the exported file once the job has completed.
//!
//! Rejected submissions answer `400 Bad Request` with `{ "error", "field" }`
//! and never create a job.

mod download;
mod export;
mod preview;
mod status;

use crate::config::ServerConfig;
use actix_web::web::{get, post, scope};
use actix_web::{HttpResponse, Scope};
use common::requests::{ExportFormat, SubmissionError, SurveySubmission};
use common::{compose, validate, DocumentBody, ValidationError};
use log::debug;
use serde_json::json;

const API_PATH: &str = "/api/surveys";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/preview", post().to(preview::process))
        .route("/export", post().to(export::process))
        .route("/export/status/{job_id}", get().to(status::process))
        .route("/export/file/{job_id}", get().to(download::process))
}

/// A submission that passed validation, composed and ready to render.
pub(crate) struct Prepared {
    pub body: DocumentBody,
    pub format: ExportFormat,
}

/// Why a submission was turned away before composition.
#[derive(Debug)]
pub(crate) enum Rejection {
    Submission(SubmissionError),
    Validation(ValidationError),
}

impl Rejection {
    pub fn into_response(self) -> HttpResponse {
        let (field, message) = match &self {
            Rejection::Submission(e) => (e.field(), e.to_string()),
            Rejection::Validation(e) => (e.field(), e.to_string()),
        };
        debug!("submission rejected on {}: {}", field, message);
        HttpResponse::BadRequest().json(json!({ "error": message, "field": field }))
    }
}

pub(crate) fn prepare(
    submission: SurveySubmission,
    config: &ServerConfig,
) -> Result<Prepared, Rejection> {
    let format = submission.format;
    let (candidate, options) = submission
        .into_parts(&config.render_options)
        .map_err(Rejection::Submission)?;
    let record = validate(candidate).map_err(Rejection::Validation)?;
    Ok(Prepared {
        body: compose(&record, &options),
        format,
    })
}
