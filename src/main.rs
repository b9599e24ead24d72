use anyhow::Context;
use loadmix::generator::context::TestContext;
use loadmix::generator::http;
use loadmix::generator::user::{RunCounters, SimUser, TrafficProfile};
use loadmix::infra::artifacts::S3ArtifactStore;
use loadmix::infra::host::SharedHost;
use loadmix::infra::instances::Ec2InstanceProvider;
use loadmix::infra::monitor::InstanceMonitor;
use loadmix::infra::params::{ParameterStore, SsmParameterStore};
use loadmix::lifecycle;
use loadmix::logging;
use loadmix::shared::config::CONFIG;
use loadmix::shared::fake::FakeData;
use std::env;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;
    info!("Starting loadmix");

    let event_id = env::var("eventId").context("eventId env var is required")?;
    let username = env::var("username").context("username env var is required")?;

    let sdk_config = aws_sdk_config().await;
    let params: Arc<dyn ParameterStore> = Arc::new(SsmParameterStore::new(&sdk_config));

    // Startup-fatal: no traffic without an initial target host.
    let param_key = format!("/{event_id}/{username}");
    let host = SharedHost::resolve(params.as_ref(), &param_key).await?;
    let refresher = host.clone().spawn_refresher(
        Arc::clone(&params),
        param_key,
        Duration::from_secs(CONFIG.discovery.refresh_secs),
    );

    let ctx = Arc::new(TestContext::from_config()?);
    info!(
        seed_emails = ctx.email_pool_len(),
        "seed email pool loaded"
    );

    let mut monitor = InstanceMonitor::new(Duration::from_secs(CONFIG.monitor.interval_secs));
    lifecycle::on_start(&mut monitor, Arc::new(Ec2InstanceProvider::new(&sdk_config)));

    let client = Arc::new(http::build_client());
    let fake = Arc::new(FakeData::new());
    let counters = Arc::new(RunCounters::default());
    let profile = TrafficProfile::from_config();
    let stop = Arc::new(AtomicBool::new(false));

    let reporter = spawn_reporter(Arc::clone(&counters), Arc::clone(&stop));

    let mut users = Vec::with_capacity(CONFIG.generator.users);
    for _ in 0..CONFIG.generator.users {
        let user = SimUser::new(
            Arc::clone(&client),
            Arc::clone(&host),
            Arc::clone(&ctx),
            Arc::clone(&fake),
            Arc::clone(&counters),
            profile.clone(),
        );
        let stop = Arc::clone(&stop);
        users.push(tokio::spawn(async move { user.run(stop).await }));
    }
    info!(users = CONFIG.generator.users, "traffic generation started");

    match CONFIG.generator.run_secs {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => info!("run duration elapsed"),
                _ = tokio::signal::ctrl_c() => info!("interrupt received"),
            }
        }
        None => {
            let _ = tokio::signal::ctrl_c().await;
            info!("interrupt received");
        }
    }

    // Users finish their current behavior; in-flight requests are not cancelled.
    stop.store(true, Ordering::Relaxed);
    for user in users {
        let _ = user.await;
    }
    let _ = reporter.await;
    refresher.abort();

    let artifacts = S3ArtifactStore::new(&sdk_config);
    lifecycle::on_quit(
        &mut monitor,
        &artifacts,
        &CONFIG.artifacts.bucket,
        &username,
        Path::new(&CONFIG.artifacts.metrics_dir),
        &Path::new(&CONFIG.artifacts.metrics_dir).join(&CONFIG.artifacts.instances_file),
    )
    .await;

    info!(
        sent = counters.sent.load(Ordering::Relaxed),
        http_errors = counters.http_errors.load(Ordering::Relaxed),
        failed = counters.failed.load(Ordering::Relaxed),
        "run finished"
    );
    Ok(())
}

/// Region from config; credentials from the profile's env vars when present,
/// otherwise the default provider chain.
async fn aws_sdk_config() -> aws_config::SdkConfig {
    let region = aws_config::Region::new(CONFIG.aws.region.clone());
    let loader = aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);
    let loader = match (env::var("access_key"), env::var("secret_access_key")) {
        (Ok(access_key), Ok(secret_key)) => loader.credentials_provider(
            aws_sdk_s3::config::Credentials::new(access_key, secret_key, None, None, "loadmix-env"),
        ),
        _ => loader,
    };
    loader.load().await
}

fn spawn_reporter(counters: Arc<RunCounters>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = 0usize;
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if stop.load(Ordering::Relaxed) {
                break;
            }
            let sent = counters.sent.load(Ordering::Relaxed);
            let http_errors = counters.http_errors.load(Ordering::Relaxed);
            let failed = counters.failed.load(Ordering::Relaxed);
            info!(
                sent,
                per_sec = sent - last,
                http_errors,
                failed,
                "progress"
            );
            last = sent;
        }
    })
}
