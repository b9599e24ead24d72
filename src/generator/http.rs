use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;

pub type HttpClient = Client<HttpConnector, Full<Bytes>>;

/// Pooled client shared by all simulated users.
pub fn build_client() -> HttpClient {
    let mut connector = HttpConnector::new();
    connector.set_nodelay(true);
    connector.set_keepalive(Some(Duration::from_secs(30)));
    connector.set_connect_timeout(Some(Duration::from_secs(5)));

    Client::builder(TokioExecutor::new())
        .pool_max_idle_per_host(32)
        .pool_idle_timeout(Duration::from_secs(30))
        .build(connector)
}

pub async fn post_json(client: &HttpClient, url: &str, body: &serde_json::Value) -> Result<StatusCode> {
    let uri = url
        .parse::<hyper::Uri>()
        .with_context(|| format!("invalid URL: {url}"))?;
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .context("failed to build HTTP request")?;

    let res = client.request(req).await.context("HTTP request failed")?;
    let status = res.status();
    // Drain the body so the connection can go back to the pool.
    let _ = res.into_body().collect().await;
    Ok(status)
}

pub async fn get(client: &HttpClient, url: &str) -> Result<StatusCode> {
    let uri = url
        .parse::<hyper::Uri>()
        .with_context(|| format!("invalid URL: {url}"))?;
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Full::new(Bytes::new()))
        .context("failed to build HTTP request")?;

    let res = client.request(req).await.context("HTTP request failed")?;
    let status = res.status();
    let _ = res.into_body().collect().await;
    Ok(status)
}
