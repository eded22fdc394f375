mod config;
mod job_controller;
mod renderers;
mod services;
#[cfg(test)]
mod test_support;

use crate::config::ServerConfig;
use crate::job_controller::state::JobsState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env();

    // Initialize job controller state
    let (jobs_state, rx) = JobsState::new(100);

    // Start job updater task
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });
    tokio::spawn(job_controller::state::start_job_sweeper(
        jobs_state.clone(),
        config.retention(),
    ));

    info!(
        "Survey export service running at {} (exports in {} kept {}s, issuing unit '{}')",
        config.url(),
        config.export_dir.display(),
        config.job_ttl.as_secs(),
        config.render_options.organizational_unit_name
    );

    let bind = (config.host.clone(), config.port);
    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(services::surveys::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}
