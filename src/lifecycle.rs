use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::infra::artifacts::ArtifactStore;
use crate::infra::instances::InstanceProvider;
use crate::infra::monitor::{InstanceMonitor, InstanceSample};

/// Metric CSVs produced by the surrounding harness, uploaded when present.
pub const METRIC_ARTIFACTS: [&str; 4] = ["exceptions", "failures", "stats_history", "stats"];

pub fn on_start(monitor: &mut InstanceMonitor, provider: Arc<dyn InstanceProvider>) {
    monitor.start(provider);
    info!("instance monitoring started");
}

/// Teardown glue: stop the monitor, persist its samples, upload artifacts.
/// Nothing here fails the run; every fault is logged and swallowed.
pub async fn on_quit(
    monitor: &mut InstanceMonitor,
    store: &dyn ArtifactStore,
    bucket: &str,
    username: &str,
    metrics_dir: &Path,
    instances_path: &Path,
) {
    monitor.stop().await;
    info!("instance monitoring stopped");

    let samples = monitor.take_samples();
    if let Err(e) = write_instance_report(&samples, instances_path) {
        warn!("failed to write instance report: {e:#}");
    }
    upload_artifacts(store, bucket, username, metrics_dir, instances_path).await;
}

/// Serialize the instance sample log to a CSV artifact.
pub fn write_instance_report(samples: &[InstanceSample], path: &Path) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["timestamp", "running_instances"])?;
    for sample in samples {
        wtr.write_record([sample.taken_at.to_rfc3339(), sample.running.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Upload the harness metric CSVs plus the instance report under the
/// `{username}/` prefix. Missing metric files are skipped; upload failures
/// are logged and do not affect exit status.
pub async fn upload_artifacts(
    store: &dyn ArtifactStore,
    bucket: &str,
    username: &str,
    metrics_dir: &Path,
    instances_path: &Path,
) {
    for metric in METRIC_ARTIFACTS {
        let file = format!("{username}_{metric}.csv");
        let local = metrics_dir.join(&file);
        if !local.exists() {
            warn!("metric artifact {} not found, skipping", local.display());
            continue;
        }
        let key = format!("{username}/{file}");
        match store.upload(&local, bucket, &key).await {
            Ok(()) => info!("uploaded {key}"),
            Err(e) => warn!("upload of {key} failed: {e:#}"),
        }
    }

    if let Some(name) = instances_path.file_name().and_then(|n| n.to_str()) {
        let key = format!("{username}/{name}");
        match store.upload(instances_path, bucket, &key).await {
            Ok(()) => info!("uploaded {key}"),
            Err(e) => warn!("upload of {key} failed: {e:#}"),
        }
    }
}
