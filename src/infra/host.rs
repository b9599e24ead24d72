use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::infra::params::ParameterStore;

/// Current target base URL, shared by all simulated users.
///
/// The value is swapped wholesale by the background refresher; readers clone
/// the `Arc`, so a refresh never produces a torn read. When a refresh fetch
/// fails the refresher exits and the last good value stays in place, with
/// `is_stale` flipped so the condition is observable.
#[derive(Debug)]
pub struct SharedHost {
    current: RwLock<Arc<str>>,
    stale: AtomicBool,
}

impl SharedHost {
    pub fn fixed(url: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new(Self {
            current: RwLock::new(url.into()),
            stale: AtomicBool::new(false),
        })
    }

    /// Initial synchronous resolution; a failure here aborts startup.
    pub async fn resolve(store: &dyn ParameterStore, key: &str) -> Result<Arc<Self>> {
        let url = store
            .get(key)
            .await
            .with_context(|| format!("initial host lookup for {key} failed"))?;
        info!("resolved target host {url}");
        Ok(Self::fixed(url))
    }

    pub fn get(&self) -> Arc<str> {
        Arc::clone(&self.current.read())
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Relaxed)
    }

    /// Replace the stored value unconditionally every `every` until a fetch
    /// fails.
    pub fn spawn_refresher(
        self: Arc<Self>,
        store: Arc<dyn ParameterStore>,
        key: String,
        every: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                sleep(every).await;
                match store.get(&key).await {
                    Ok(url) => {
                        debug!("refreshed target host {url}");
                        *self.current.write() = Arc::from(url);
                    }
                    Err(e) => {
                        warn!("host refresh failed, keeping {}: {e:#}", self.get());
                        self.stale.store(true, Ordering::Relaxed);
                        break;
                    }
                }
            }
        })
    }
}
