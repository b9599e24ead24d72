use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::warn;
use uuid::Uuid;

use crate::generator::behaviors::{self, Behavior};
use crate::generator::context::TestContext;
use crate::generator::http::{self, HttpClient};
use crate::infra::host::SharedHost;
use crate::shared::config::CONFIG;
use crate::shared::fake::FakeData;

/// Request-mix knobs shared by every simulated user.
#[derive(Debug, Clone)]
pub struct TrafficProfile {
    pub stress_length: usize,
    pub price_min: u32,
    pub price_max: u32,
}

impl TrafficProfile {
    pub fn from_config() -> Self {
        Self {
            stress_length: CONFIG.target.stress_length,
            price_min: CONFIG.generator.price_min,
            price_max: CONFIG.generator.price_max,
        }
    }
}

/// Cumulative per-run request counters, read by the progress reporter.
#[derive(Debug, Default)]
pub struct RunCounters {
    pub sent: AtomicUsize,
    pub http_errors: AtomicUsize,
    pub failed: AtomicUsize,
}

/// One simulated user: repeatedly picks a weighted behavior and executes it
/// to completion before picking again.
pub struct SimUser {
    client: Arc<HttpClient>,
    host: Arc<SharedHost>,
    ctx: Arc<TestContext>,
    fake: Arc<FakeData>,
    counters: Arc<RunCounters>,
    profile: TrafficProfile,
    dist: WeightedIndex<u32>,
}

impl SimUser {
    pub fn new(
        client: Arc<HttpClient>,
        host: Arc<SharedHost>,
        ctx: Arc<TestContext>,
        fake: Arc<FakeData>,
        counters: Arc<RunCounters>,
        profile: TrafficProfile,
    ) -> Self {
        let dist = WeightedIndex::new(Behavior::ALL.iter().map(|b| b.weight()))
            .expect("behavior weights are non-zero");
        Self {
            client,
            host,
            ctx,
            fake,
            counters,
            profile,
            dist,
        }
    }

    pub async fn run(&self, stop: Arc<AtomicBool>) {
        while !stop.load(Ordering::Relaxed) {
            let behavior = self.pick();
            self.counters.sent.fetch_add(1, Ordering::Relaxed);
            match self.run_behavior(behavior).await {
                Ok(status) if !status.is_success() => {
                    self.counters.http_errors.fetch_add(1, Ordering::Relaxed);
                    warn!(behavior = behavior.name(), %status, "request rejected");
                }
                Ok(_) => {}
                Err(e) => {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(behavior = behavior.name(), "request failed: {e:#}");
                }
            }
        }
    }

    fn pick(&self) -> Behavior {
        let mut rng = rand::thread_rng();
        Behavior::ALL[self.dist.sample(&mut rng)]
    }

    pub async fn run_behavior(&self, behavior: Behavior) -> anyhow::Result<hyper::StatusCode> {
        match behavior {
            Behavior::Stress => self.stress().await,
            Behavior::WriteUser => self.write_user().await,
            Behavior::ReadUser => self.read_user().await,
            Behavior::ReadUserEmailError => self.read_user_email_error().await,
            Behavior::ReadProduct => self.read_product().await,
            Behavior::WriteProduct => self.write_product().await,
        }
    }

    async fn stress(&self) -> anyhow::Result<hyper::StatusCode> {
        let host = self.host.get();
        let body = behaviors::stress_body(self.profile.stress_length);
        http::post_json(&self.client, &format!("{host}/v1/stress"), &body).await
    }

    async fn write_user(&self) -> anyhow::Result<hyper::StatusCode> {
        let username = self.fake.username();
        let email = self.fake.email();
        let status_message = self.fake.sentence();
        let write_now = self.ctx.push_email(email.clone());
        let body = behaviors::user_create_body(
            write_now,
            &Uuid::now_v7(),
            &username,
            &email,
            &status_message,
        );
        let host = self.host.get();
        http::post_json(&self.client, &format!("{host}/v1/user"), &body).await
    }

    async fn read_user(&self) -> anyhow::Result<hyper::StatusCode> {
        let (read_now, email) = self.ctx.claim_user_read()?;
        let url = behaviors::user_lookup_url(&self.host.get(), &email, read_now, &Uuid::now_v7());
        http::get(&self.client, &url).await
    }

    async fn read_user_email_error(&self) -> anyhow::Result<hyper::StatusCode> {
        let (read_now, email) = self.ctx.claim_user_read()?;
        let truncated = behaviors::truncate_at_dot(&email);
        let url =
            behaviors::user_lookup_url(&self.host.get(), truncated, read_now, &Uuid::now_v7());
        http::get(&self.client, &url).await
    }

    async fn read_product(&self) -> anyhow::Result<hyper::StatusCode> {
        let id = self.ctx.pick_product_id();
        let url = behaviors::product_lookup_url(&self.host.get(), id, &Uuid::now_v7());
        http::get(&self.client, &url).await
    }

    async fn write_product(&self) -> anyhow::Result<hyper::StatusCode> {
        let write_now = self.ctx.claim(crate::generator::context::Cursor::ProductWrite);
        let name = self.fake.product_name();
        let price = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.profile.price_min..=self.profile.price_max)
        };
        let body = behaviors::product_create_body(write_now, &Uuid::now_v7(), &name, price);
        let host = self.host.get();
        http::post_json(&self.client, &format!("{host}/v1/product"), &body).await
    }
}
