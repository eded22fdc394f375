//! Shared state of background export jobs.
//!
//! An export request registers its job as `Pending` and hands rendering to a
//! blocking worker. The worker reports progress over an mpsc channel, and
//! `start_job_updater` folds those reports into the shared map that the status
//! and download endpoints read. `start_job_sweeper` forgets finished jobs once
//! their retention runs out and removes their export files.

use common::jobs::JobStatus;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// A job's latest status and when it reached a final one.
#[derive(Debug, Clone)]
pub struct JobEntry {
    pub status: JobStatus,
    finished_at: Option<Instant>,
}

impl JobEntry {
    fn new(status: JobStatus, now: Instant) -> Self {
        let finished_at = status.is_finished().then_some(now);
        Self {
            status,
            finished_at,
        }
    }
}

/// How long finished jobs and their files are kept around.
#[derive(Debug, Clone)]
pub struct Retention {
    pub ttl: Duration,
    pub sweep_every: Duration,
    pub export_dir: PathBuf,
}

/// Clonable handle to the job map and the update channel.
#[derive(Clone)]
pub struct JobsState {
    /// Job id (uuid v4) to its latest status.
    pub jobs: Arc<RwLock<HashMap<String, JobEntry>>>,
    /// Workers send their updates here instead of locking `jobs` themselves.
    pub tx: mpsc::Sender<JobUpdate>,
}

impl JobsState {
    /// Builds an empty state and the receiver `start_job_updater` should drain.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(buffer);
        let state = Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
        };
        (state, rx)
    }

    pub async fn register(&self, job_id: &str) {
        self.jobs.write().await.insert(
            job_id.to_string(),
            JobEntry::new(JobStatus::Pending, Instant::now()),
        );
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs
            .read()
            .await
            .get(job_id)
            .map(|entry| entry.status.clone())
    }

    pub(crate) async fn apply(&self, update: JobUpdate, now: Instant) {
        debug!("job {} -> {:?}", update.job_id, update.status);
        self.jobs
            .write()
            .await
            .insert(update.job_id, JobEntry::new(update.status, now));
    }

    /// Drops jobs that finished more than `retention.ttl` before `now` and
    /// deletes their files. Returns the number of evicted jobs.
    ///
    /// Identical submissions render to the same file name, so a file is only
    /// deleted once no remaining job points at it.
    pub async fn evict_finished(&self, retention: &Retention, now: Instant) -> usize {
        let (evicted, orphaned) = {
            let mut jobs = self.jobs.write().await;
            let before = jobs.len();
            let mut released: Vec<String> = Vec::new();
            jobs.retain(|job_id, entry| {
                let expired = entry
                    .finished_at
                    .is_some_and(|at| now.saturating_duration_since(at) >= retention.ttl);
                if expired {
                    debug!("evicting job {}", job_id);
                    if let JobStatus::Completed(file_name) = &entry.status {
                        released.push(file_name.clone());
                    }
                }
                !expired
            });
            released.sort();
            released.dedup();
            released.retain(|file_name| {
                !jobs.values().any(
                    |entry| matches!(&entry.status, JobStatus::Completed(kept) if kept == file_name),
                )
            });
            (before - jobs.len(), released)
        };

        for file_name in &orphaned {
            let path = retention.export_dir.join(file_name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!("removed export file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("could not remove export file {}: {}", path.display(), e),
            }
        }
        evicted
    }
}

#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobUpdate {
    pub fn new(job_id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            job_id: job_id.into(),
            status,
        }
    }
}

/// Applies job updates until every sender is dropped. Spawn once at startup.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        state.apply(update, Instant::now()).await;
    }
}

/// Evicts expired jobs every `retention.sweep_every`. Spawn once at startup.
pub async fn start_job_sweeper(state: JobsState, retention: Retention) {
    let mut interval = tokio::time::interval(retention.sweep_every);
    loop {
        interval.tick().await;
        let evicted = state.evict_finished(&retention, Instant::now()).await;
        if evicted > 0 {
            info!("evicted {} finished export jobs", evicted);
        }
    }
}
