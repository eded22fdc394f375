use crate::config::ServerConfig;
use crate::job_controller::state::JobsState;
use actix_files::NamedFile;
use actix_web::{web, HttpRequest, HttpResponse};
use common::jobs::JobStatus;
use log::error;

/// Serves the file of a completed export job.
///
/// `409 Conflict` while the job is still running or after it failed, `404` for
/// unknown jobs or a file that has since been removed.
pub(crate) async fn process(
    req: HttpRequest,
    job_id: web::Path<String>,
    state: web::Data<JobsState>,
    config: web::Data<ServerConfig>,
) -> HttpResponse {
    let job_id = job_id.into_inner();
    match state.status(&job_id).await {
        Some(JobStatus::Completed(file_name)) => {
            let path = config.export_dir.join(&file_name);
            match NamedFile::open_async(&path).await {
                Ok(file) => file.into_response(&req),
                Err(e) => {
                    error!("export file {} for job {} unreadable: {}", path.display(), job_id, e);
                    HttpResponse::NotFound().body("Export file not found")
                }
            }
        }
        Some(status) => HttpResponse::Conflict().json(status),
        None => HttpResponse::NotFound().body("Job ID not found"),
    }
}
