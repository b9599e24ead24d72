use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::infra::instances::InstanceProvider;

#[derive(Debug, Clone, Serialize)]
pub struct InstanceSample {
    pub taken_at: DateTime<Utc>,
    pub running: usize,
}

/// Periodic background sampler of the running-instance count.
///
/// Idle until `start`, then samples immediately and on every interval tick
/// until `stop`, which signals the task and awaits it; no sample is appended
/// after `stop` returns. A provider failure ends the loop for good.
pub struct InstanceMonitor {
    interval: Duration,
    samples: Arc<Mutex<Vec<InstanceSample>>>,
    stop: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
    stopped: bool,
}

impl InstanceMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            samples: Arc::new(Mutex::new(Vec::new())),
            stop: Arc::new(Notify::new()),
            handle: None,
            stopped: false,
        }
    }

    /// No-op when already running or already stopped; Stopped is terminal.
    pub fn start(&mut self, provider: Arc<dyn InstanceProvider>) {
        if self.handle.is_some() || self.stopped {
            return;
        }
        let samples = Arc::clone(&self.samples);
        let stop = Arc::clone(&self.stop);
        let interval = self.interval;
        self.handle = Some(tokio::spawn(async move {
            loop {
                match provider.running_count().await {
                    Ok(running) => {
                        info!(running, "running instances");
                        samples.lock().push(InstanceSample {
                            taken_at: Utc::now(),
                            running,
                        });
                    }
                    Err(e) => {
                        warn!("instance count query failed, monitor exiting: {e:#}");
                        break;
                    }
                }
                tokio::select! {
                    _ = stop.notified() => break,
                    _ = sleep(interval) => {}
                }
            }
        }));
    }

    pub async fn stop(&mut self) {
        self.stopped = true;
        self.stop.notify_one();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.lock().len()
    }

    /// Drain the collected samples; the log is logically dead afterwards.
    pub fn take_samples(&mut self) -> Vec<InstanceSample> {
        std::mem::take(&mut *self.samples.lock())
    }
}
