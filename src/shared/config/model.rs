use serde::Deserialize;

use crate::engine::core::merge::bucket::{BUCKET_ATTRIBUTE, UnkeyedSegments};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub merge: MergeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct MergeConfig {
    /// Segment attribute that carries the partition key
    pub bucket_attribute: String,
    /// Whether segments without a partition key may merge with each other
    pub unkeyed_segments: UnkeyedSegments,
    /// Number of segments the k-way policy merges per group
    pub segments_per_merge: usize,
    /// Deleted-document percentage above which forced-deletes merges pick a segment up
    pub forced_deletes_pct: f64,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

use std::env;

pub const CONFIG_ENV: &str = "BUCKETED_MERGE_CONFIG";

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Loads settings from `path` (extension optional). A missing file falls back
/// to the built-in defaults.
pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("merge.bucket_attribute", BUCKET_ATTRIBUTE)?
        .set_default("merge.unkeyed_segments", "merge")?
        .set_default("merge.segments_per_merge", 10_i64)?
        .set_default("merge.forced_deletes_pct", 10.0_f64)?
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .add_source(config::File::with_name(path).required(false))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
