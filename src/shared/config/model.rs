use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub target: TargetConfig,
    pub generator: GeneratorConfig,
    pub discovery: DiscoveryConfig,
    pub monitor: MonitorConfig,
    pub artifacts: ArtifactsConfig,
    pub aws: AwsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    /// CSV file with an `email` column used to seed the email pool.
    pub seed_file: String,
    pub stress_length: usize,
}

#[derive(Debug, Deserialize)]
pub struct GeneratorConfig {
    /// Number of simulated users, each running its own behavior loop.
    pub users: usize,
    /// Run duration in seconds; absent means run until interrupted.
    pub run_secs: Option<u64>,
    /// Starting offset for the user-write and product-write cursors.
    pub write_start_index: u64,
    pub product_sample_size: usize,
    pub product_id_min: u64,
    pub product_id_max: u64,
    pub price_min: u32,
    pub price_max: u32,
}

#[derive(Debug, Deserialize)]
pub struct DiscoveryConfig {
    /// Interval between parameter-store host refreshes, in seconds.
    pub refresh_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct MonitorConfig {
    /// Interval between instance-count samples, in seconds.
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactsConfig {
    pub bucket: String,
    /// Directory holding the harness-produced metric CSVs.
    pub metrics_dir: String,
    pub instances_file: String,
}

#[derive(Debug, Deserialize)]
pub struct AwsConfig {
    pub region: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("LOADMIX_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
