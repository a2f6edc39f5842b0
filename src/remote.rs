use anyhow::{Context, Result};

mod types;
pub use self::types::*;
mod documents;
mod pipeline;
mod versions;

const CLIENT_ID_HEADER: &str = "x-client-id";

/// Thin per-endpoint client for the sync pipeline's REST API. Holds no
/// domain state; every call is a fresh request.
pub struct ApiClient {
    base_url: String,
    client_id: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, client_id: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("syncdeck")
            .build()
            .context("build reqwest client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            client_id,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.post(self.url(path)))
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.put(self.url(path)))
    }

    fn decorate(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.client_id {
            Some(id) => req.header(CLIENT_ID_HEADER, id),
            None => req,
        }
    }

    /// Map non-2xx responses to errors. FastAPI-style bodies carry a
    /// `detail` field; when present it is surfaced unmodified.
    async fn ensure_ok(
        &self,
        resp: reqwest::Response,
        label: &str,
    ) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let detail = resp
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .map(|e| e.detail)
            .filter(|d| !d.is_empty());

        match detail {
            Some(detail) => anyhow::bail!(detail),
            None => anyhow::bail!("{}: HTTP {}", label, status),
        }
    }
}

fn folder_query(folder_id: Option<&str>) -> Vec<(&'static str, String)> {
    match folder_id {
        Some(id) => vec![("folder_id", id.to_string())],
        None => Vec::new(),
    }
}
