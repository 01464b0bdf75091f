use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client as HttpClient, StatusCode};

use crate::api::error::DeliveryError;
use crate::api::models::{extract_reply, ChatRequest};

pub struct ApiClient {
    http: HttpClient,
    endpoints: Vec<String>,
}

impl ApiClient {
    /// Build a client over an ordered endpoint list. Every attempt is bounded by `timeout`.
    /// Endpoints are local or LAN servers, so system proxies are ignored.
    pub fn new(endpoints: Vec<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .map_err(DeliveryError::Setup)?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Deliver `content` to the first endpoint that answers with 200.
    /// Endpoints are tried in order, once each; a failure moves on to the next one.
    pub async fn send(&self, content: &str) -> Result<String, DeliveryError> {
        for endpoint in &self.endpoints {
            match self.attempt(endpoint, content).await {
                Ok(reply) => {
                    log::info!("reply received from {endpoint}");
                    return Ok(reply);
                }
                Err(e) => log::warn!("{endpoint} failed: {e}"),
            }
        }
        log::error!("no endpoint answered ({} tried)", self.endpoints.len());
        Err(DeliveryError::AllEndpointsExhausted)
    }

    async fn attempt(&self, endpoint: &str, content: &str) -> Result<String, DeliveryError> {
        log::debug!("POST {endpoint}");
        let resp = self
            .http
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .json(&ChatRequest { content })
            .send()
            .await?;
        if resp.status() != StatusCode::OK {
            return Err(DeliveryError::Server { status: resp.status().as_u16() });
        }
        let body = resp.text().await?;
        Ok(extract_reply(&body))
    }
}
