//! Service configuration, read from the environment at startup.
//!
//! Every key has a default so the service starts with no environment at all.
//! `from_lookup` takes the key lookup as a closure, which keeps tests away from
//! the real process environment.

use crate::job_controller::state::Retention;
use common::model::options::{RenderOptions, DEFAULT_UNIT_NAME};
use log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_HOST: &str = "SURVEY_HOST";
pub const ENV_PORT: &str = "SURVEY_PORT";
pub const ENV_EXPORT_DIR: &str = "SURVEY_EXPORT_DIR";
pub const ENV_FONTS_DIR: &str = "SURVEY_FONTS_DIR";
pub const ENV_UNIT_NAME: &str = "SURVEY_UNIT_NAME";
pub const ENV_JSON_LIMIT: &str = "SURVEY_JSON_LIMIT_BYTES";
pub const ENV_JOB_TTL: &str = "SURVEY_JOB_TTL_SECS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
// Two signature images as data URLs fit comfortably.
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024;
const DEFAULT_JOB_TTL_SECS: u64 = 60 * 60;
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub export_dir: PathBuf,
    pub fonts_dir: PathBuf,
    pub json_limit: usize,
    /// How long a finished export job and its file are kept.
    pub job_ttl: Duration,
    /// Defaults applied to every request; a submission may override the unit name.
    pub render_options: RenderOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            export_dir: PathBuf::from("exports"),
            fonts_dir: PathBuf::from("fonts"),
            json_limit: DEFAULT_JSON_LIMIT,
            job_ttl: Duration::from_secs(DEFAULT_JOB_TTL_SECS),
            render_options: RenderOptions::new(DEFAULT_UNIT_NAME),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            host: text(ENV_HOST).unwrap_or(defaults.host),
            port: parse_or(ENV_PORT, text(ENV_PORT), defaults.port),
            export_dir: text(ENV_EXPORT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            fonts_dir: text(ENV_FONTS_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.fonts_dir),
            json_limit: parse_or(ENV_JSON_LIMIT, text(ENV_JSON_LIMIT), defaults.json_limit),
            job_ttl: Duration::from_secs(parse_or(
                ENV_JOB_TTL,
                text(ENV_JOB_TTL),
                defaults.job_ttl.as_secs(),
            )),
            render_options: defaults
                .render_options
                .with_unit_name(text(ENV_UNIT_NAME).as_deref()),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Eviction settings for finished jobs. Sweeps at least once a minute,
    /// more often when the ttl is shorter.
    pub fn retention(&self) -> Retention {
        Retention {
            ttl: self.job_ttl,
            sweep_every: self.job_ttl.clamp(Duration::from_secs(1), MAX_SWEEP_INTERVAL),
            export_dir: self.export_dir.clone(),
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.export_dir, PathBuf::from("exports"));
        assert_eq!(config.render_options.organizational_unit_name, DEFAULT_UNIT_NAME);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert_eq!(config.job_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn retention_follows_the_job_ttl() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_JOB_TTL, "15"),
            (ENV_EXPORT_DIR, "/tmp/ba"),
        ]));
        let retention = config.retention();
        assert_eq!(retention.ttl, Duration::from_secs(15));
        assert_eq!(retention.sweep_every, Duration::from_secs(15));
        assert_eq!(retention.export_dir, PathBuf::from("/tmp/ba"));

        let retention = ServerConfig::default().retention();
        assert_eq!(retention.sweep_every, MAX_SWEEP_INTERVAL);

        let retention = ServerConfig::from_lookup(lookup(&[(ENV_JOB_TTL, "0")])).retention();
        assert_eq!(retention.sweep_every, Duration::from_secs(1));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_HOST, "0.0.0.0"),
            (ENV_PORT, "9090"),
            (ENV_EXPORT_DIR, "/var/lib/ba-survey"),
            (ENV_UNIT_NAME, "ULP Cikarang Kota"),
            (ENV_JSON_LIMIT, "2048"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.export_dir, PathBuf::from("/var/lib/ba-survey"));
        assert_eq!(config.render_options.organizational_unit_name, "ULP Cikarang Kota");
        assert_eq!(config.json_limit, 2048);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[(ENV_PORT, "eighty"), (ENV_UNIT_NAME, "  ")]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.render_options.organizational_unit_name, DEFAULT_UNIT_NAME);
    }
}
