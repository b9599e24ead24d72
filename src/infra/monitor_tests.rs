use crate::infra::instances::InstanceProvider;
use crate::infra::monitor::InstanceMonitor;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

struct FixedCount(usize);

#[async_trait]
impl InstanceProvider for FixedCount {
    async fn running_count(&self) -> Result<usize> {
        Ok(self.0)
    }
}

struct AlwaysFailing;

#[async_trait]
impl InstanceProvider for AlwaysFailing {
    async fn running_count(&self) -> Result<usize> {
        anyhow::bail!("describe call failed")
    }
}

#[tokio::test]
async fn samples_immediately_then_stops_cleanly() {
    crate::logging::init_for_tests();
    let mut monitor = InstanceMonitor::new(Duration::from_secs(300));
    monitor.start(Arc::new(FixedCount(7)));
    assert!(monitor.is_running());

    sleep(Duration::from_millis(30)).await;
    monitor.stop().await;
    assert!(!monitor.is_running());

    // One immediate tick, none after stop returned.
    assert_eq!(monitor.sample_count(), 1);
    sleep(Duration::from_millis(40)).await;
    assert_eq!(monitor.sample_count(), 1);

    let samples = monitor.take_samples();
    assert_eq!(samples[0].running, 7);
    assert_eq!(monitor.sample_count(), 0);
}

#[tokio::test]
async fn ticks_keep_appending_while_running() {
    let mut monitor = InstanceMonitor::new(Duration::from_millis(15));
    monitor.start(Arc::new(FixedCount(3)));

    sleep(Duration::from_millis(60)).await;
    monitor.stop().await;

    let count = monitor.sample_count();
    assert!(count >= 2, "expected several ticks, got {count}");
    sleep(Duration::from_millis(40)).await;
    assert_eq!(monitor.sample_count(), count);
}

#[tokio::test]
async fn provider_failure_ends_the_loop_without_samples() {
    let mut monitor = InstanceMonitor::new(Duration::from_millis(5));
    monitor.start(Arc::new(AlwaysFailing));

    sleep(Duration::from_millis(30)).await;
    monitor.stop().await;
    assert_eq!(monitor.sample_count(), 0);
}

#[tokio::test]
async fn start_is_idempotent_while_running() {
    let mut monitor = InstanceMonitor::new(Duration::from_secs(300));
    monitor.start(Arc::new(FixedCount(1)));
    monitor.start(Arc::new(FixedCount(99)));

    sleep(Duration::from_millis(30)).await;
    monitor.stop().await;

    let samples = monitor.take_samples();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].running, 1);
}

#[tokio::test]
async fn stopped_is_terminal() {
    let mut monitor = InstanceMonitor::new(Duration::from_secs(300));
    monitor.start(Arc::new(FixedCount(5)));
    sleep(Duration::from_millis(30)).await;
    monitor.stop().await;
    assert_eq!(monitor.sample_count(), 1);

    monitor.start(Arc::new(FixedCount(5)));
    assert!(!monitor.is_running());
    sleep(Duration::from_millis(40)).await;
    assert_eq!(monitor.sample_count(), 1);
}
