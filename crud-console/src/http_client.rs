//! Request dispatcher: one backend call per action.

use async_trait::async_trait;

use crate::config::Config;
use crate::outcome::{decode_payload, Expect, Failure, Outcome};
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A pending backend call. `path` is relative to the backend base url and
/// already carries any query suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Record>,
    pub expect: Expect,
}

impl Request {
    pub fn get(path: impl Into<String>, expect: Expect) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
            expect,
        }
    }

    pub fn post(path: impl Into<String>, body: Record) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
            expect: Expect::Record,
        }
    }

    pub fn put(path: impl Into<String>, body: Option<Record>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body,
            expect: Expect::Record,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
            expect: Expect::Empty,
        }
    }
}

/// Sends requests to the backend. Every failure is folded into the returned
/// [`Outcome`]; nothing is thrown past this boundary.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn send(&self, request: &Request) -> Outcome;
}

pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.backend.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Dispatcher for HttpClient {
    async fn send(&self, request: &Request) -> Outcome {
        let url = self.url(&request.path);
        log::info!("🌐 [HTTP] {} {}", request.method.as_str(), url);

        let mut builder = self.client.request(request.method.into(), &url);
        if let Some(body) = &request.body {
            log::debug!(
                "📤 [HTTP] body: {}",
                serde_json::to_string(body).unwrap_or_default()
            );
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("💥 [HTTP] request to {} failed: {}", url, e);
                return Outcome::Failure(Failure::unreachable());
            }
        };

        let status = response.status();
        log::debug!("📊 [HTTP] response status: {}", status);

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                log::error!("💥 [HTTP] failed to read response body: {}", e);
                return Outcome::Failure(Failure::malformed(Some(status.as_u16())));
            }
        };

        if !status.is_success() {
            let failure = Failure::from_error_body(status.as_u16(), &text);
            log::warn!(
                "❌ [HTTP] {} {} rejected with {}: {:?}",
                request.method.as_str(),
                request.path,
                status,
                failure.message
            );
            return Outcome::Failure(failure);
        }

        match decode_payload(request.expect, &text) {
            Ok(payload) => {
                log::debug!("✅ [HTTP] {} {} succeeded", request.method.as_str(), request.path);
                Outcome::Success(payload)
            }
            Err(e) => {
                log::error!("💥 [HTTP] {}", e);
                Outcome::Failure(Failure::malformed(Some(status.as_u16())))
            }
        }
    }
}
