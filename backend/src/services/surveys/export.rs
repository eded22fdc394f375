//! `POST /api/surveys/export`
//!
//! Validation and composition happen inside the request, so a bad submission
//! is answered with `400` and no job. Rendering runs afterwards on the
//! blocking pool; the job ends `Completed(file_name)` or
//! `Failed(NOTHING_PRODUCED)`. Nothing is retried.

use super::{prepare, Prepared};
use crate::config::ServerConfig;
use crate::job_controller::state::{JobUpdate, JobsState};
use crate::renderers::renderer_for;
use actix_web::{web, HttpResponse};
use common::export;
use common::jobs::JobStatus;
use common::requests::SurveySubmission;
use log::{info, warn};
use serde_json::json;
use uuid::Uuid;

pub(crate) const NOTHING_PRODUCED: &str = "no document was produced";

pub(crate) async fn process(
    state: web::Data<JobsState>,
    config: web::Data<ServerConfig>,
    payload: web::Json<SurveySubmission>,
) -> HttpResponse {
    match prepare(payload.into_inner(), &config) {
        Ok(prepared) => {
            let job_id =
                schedule_export_job(state.get_ref().clone(), config.get_ref().clone(), prepared)
                    .await;
            HttpResponse::Ok().json(json!({ "job_id": job_id }))
        }
        Err(rejection) => rejection.into_response(),
    }
}

async fn schedule_export_job(state: JobsState, config: ServerConfig, prepared: Prepared) -> String {
    let job_id = Uuid::new_v4().to_string();
    state.register(&job_id).await;

    let tx = state.tx.clone();
    let id = job_id.clone();
    tokio::spawn(async move {
        if let Err(e) = tx.send(JobUpdate::new(id.clone(), JobStatus::Rendering)).await {
            warn!("export job {} status not recorded: {}", id, e);
        }

        let Prepared { body, format } = prepared;
        let handle = tokio::task::spawn_blocking(move || {
            let renderer = renderer_for(format, &config);
            export(&body, &renderer)
        });

        let status = match handle.await {
            Ok(Some(document)) => {
                let file_name = document.file_name().unwrap_or_default().to_string();
                info!("export job {} completed: {}", id, file_name);
                JobStatus::Completed(file_name)
            }
            Ok(None) => {
                warn!("export job {} failed: {}", id, NOTHING_PRODUCED);
                JobStatus::Failed(NOTHING_PRODUCED.to_string())
            }
            Err(join_err) => JobStatus::Failed(format!("join error: {}", join_err)),
        };
        if let Err(e) = tx.send(JobUpdate::new(id.clone(), status)).await {
            warn!("export job {} final status not recorded: {}", id, e);
        }
    });

    job_id
}
