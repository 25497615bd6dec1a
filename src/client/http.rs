//! ureq-backed link API client
//!
//! ureq is blocking; every call runs inside `spawn_blocking` so callers stay
//! cooperative. Status codes are handled here rather than by ureq, so the
//! agent is built with `http_status_as_error(false)`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use ureq::Agent;

use super::{LinkApi, UNREACHABLE_MESSAGE};
use crate::config::ApiConfig;
use crate::errors::{Result, TinyLinkError};
use crate::models::{
    CreateLinkBody, CreatedLink, ErrorBody, HealthBody, HealthReport, LinkRecord,
};

type HttpResponse = ureq::http::Response<ureq::Body>;

const CREATE_FAILED: &str = "Something went wrong";
const FETCH_FAILED: &str = "Failed to fetch URL data";
const FETCH_ALL_FAILED: &str = "Failed to load all links";
const DELETE_FAILED: &str = "Delete failed";
const DEFAULT_VERSION: &str = "1.0";

/// HTTP implementation of [`LinkApi`].
#[derive(Clone)]
pub struct HttpLinkApi {
    base_url: String,
    agent: Agent,
}

impl HttpLinkApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn links_url(&self) -> String {
        format!("{}/api/links", self.base_url)
    }

    fn link_url(&self, code: &str) -> String {
        format!("{}/api/links/{}", self.base_url, urlencoding::encode(code))
    }

    /// Run a blocking request off the async executor.
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Agent) -> Result<T> + Send + 'static,
    {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || f(&agent))
            .await
            .unwrap_or_else(|e| {
                warn!("Link API spawn_blocking failed: {}", e);
                Err(TinyLinkError::unreachable(UNREACHABLE_MESSAGE))
            })
    }

    fn create_sync(
        agent: &Agent,
        url: &str,
        long_url: &str,
        short_code: &str,
    ) -> Result<CreatedLink> {
        let body = CreateLinkBody {
            long_url,
            short_code,
        };
        let mut resp = agent
            .post(url)
            .send_json(&body)
            .map_err(|e| transport_error(url, e))?;

        let status = resp.status().as_u16();
        if status == 201 {
            return read_body(&mut resp, url);
        }

        debug!("Create {} rejected with status {}", short_code, status);
        Err(TinyLinkError::server(
            error_msg(&mut resp).unwrap_or_else(|| CREATE_FAILED.to_string()),
        ))
    }

    fn fetch_sync(agent: &Agent, url: &str) -> Result<LinkRecord> {
        let mut resp = agent.get(url).call().map_err(|e| transport_error(url, e))?;

        let status = resp.status();
        if status.as_u16() == 404 {
            return Err(TinyLinkError::not_found(
                error_msg(&mut resp).unwrap_or_else(|| "URL not found".to_string()),
            ));
        }
        if !status.is_success() {
            return Err(TinyLinkError::server(
                error_msg(&mut resp).unwrap_or_else(|| FETCH_FAILED.to_string()),
            ));
        }
        read_body(&mut resp, url)
    }

    fn fetch_all_sync(agent: &Agent, url: &str) -> Result<Vec<LinkRecord>> {
        let mut resp = agent.get(url).call().map_err(|e| transport_error(url, e))?;

        if !resp.status().is_success() {
            return Err(TinyLinkError::server(
                error_msg(&mut resp).unwrap_or_else(|| FETCH_ALL_FAILED.to_string()),
            ));
        }
        read_body(&mut resp, url)
    }

    fn delete_sync(agent: &Agent, url: &str) -> Result<()> {
        let mut resp = agent
            .delete(url)
            .call()
            .map_err(|e| transport_error(url, e))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let msg = error_msg(&mut resp);
        if status.as_u16() == 404 {
            return Err(TinyLinkError::not_found(
                msg.unwrap_or_else(|| "Short code not found".to_string()),
            ));
        }
        Err(TinyLinkError::server(
            msg.unwrap_or_else(|| DELETE_FAILED.to_string()),
        ))
    }

    fn health_sync(agent: &Agent, url: &str) -> Result<HealthReport> {
        let started = Instant::now();
        let mut resp = agent.get(url).call().map_err(|e| transport_error(url, e))?;
        let latency = started.elapsed();

        let status = resp.status();
        if !status.is_success() {
            return Err(TinyLinkError::server(format!(
                "Health check failed with status: {}",
                status.as_u16()
            )));
        }

        // 版本号缺失或响应体不是 JSON 时沿用默认值
        let body: HealthBody = resp.body_mut().read_json().unwrap_or_default();
        trace!("Health check round trip: {:?}", latency);

        Ok(HealthReport {
            version: body.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            latency,
            checked_at: chrono::Utc::now(),
        })
    }
}

fn transport_error(url: &str, err: ureq::Error) -> TinyLinkError {
    warn!("Link API request to \"{}\" failed: {}", url, err);
    TinyLinkError::unreachable(UNREACHABLE_MESSAGE)
}

fn error_msg(resp: &mut HttpResponse) -> Option<String> {
    resp.body_mut()
        .read_json::<ErrorBody>()
        .ok()
        .and_then(|body| body.error_msg)
        .filter(|msg| !msg.is_empty())
}

fn read_body<T: DeserializeOwned>(resp: &mut HttpResponse, url: &str) -> Result<T> {
    resp.body_mut().read_json::<T>().map_err(|e| {
        warn!("Link API response from \"{}\" parse failed: {}", url, e);
        TinyLinkError::serialization(format!("Invalid response from server: {}", e))
    })
}

#[async_trait]
impl LinkApi for HttpLinkApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn create(&self, long_url: &str, short_code: &str) -> Result<CreatedLink> {
        let url = self.links_url();
        let long_url = long_url.to_string();
        let short_code = short_code.to_string();
        self.blocking(move |agent| Self::create_sync(agent, &url, &long_url, &short_code))
            .await
    }

    async fn fetch_by_code(&self, code: &str) -> Result<LinkRecord> {
        let url = self.link_url(code);
        self.blocking(move |agent| Self::fetch_sync(agent, &url))
            .await
    }

    async fn fetch_all(&self) -> Result<Vec<LinkRecord>> {
        let url = self.links_url();
        self.blocking(move |agent| Self::fetch_all_sync(agent, &url))
            .await
    }

    async fn delete_by_code(&self, code: &str) -> Result<()> {
        let url = self.link_url(code);
        self.blocking(move |agent| Self::delete_sync(agent, &url))
            .await
    }

    async fn health(&self) -> Result<HealthReport> {
        let url = format!("{}/healthz", self.base_url);
        self.blocking(move |agent| Self::health_sync(agent, &url))
            .await
    }
}
