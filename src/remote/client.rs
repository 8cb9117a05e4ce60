//! Blocking JSON client for the dashboard REST API.
//!
//! Every failure is normalized into [`DashboardError::Remote`]: non-2xx
//! responses keep their status code, transport failures and undecodable bodies
//! carry no status. Nothing is retried.

use crate::domain::{DashboardError, Result};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// HTTP client bound to one API base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    base: Url,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// With `timeout` set to `None` requests wait indefinitely.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `base_url` is not an absolute hierarchical URL or the
    /// HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| DashboardError::Config(format!("invalid api base url {base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(DashboardError::Config(format!(
                "invalid api base url {base_url}: not a hierarchical url"
            )));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Config(format!("failed to create HTTP client: {e}")))?;

        tracing::debug!(base_url = %base_url, timeout = ?timeout, "created api client");

        Ok(Self {
            base_url,
            base,
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}/{segment}/.../` with the trailing slash the API expects.
    ///
    /// Each segment is percent-encoded, so an id containing `/`, `?` or `#`
    /// stays a single path segment.
    #[must_use]
    pub fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url.into()
    }

    /// `GET url?query` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `Remote` on transport failure, non-2xx status or a bad body.
    pub fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&'static str, String)]) -> Result<T> {
        let mut request = self.request(Method::GET, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        decode(send(request)?)
    }

    /// Sends `body` as JSON with `method` and decodes the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns `Remote` on transport failure, non-2xx status or a bad body.
    pub fn send_json<B, T>(&self, method: Method, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(send(self.request(method, url).json(body))?)
    }

    /// `DELETE url`. The response body, if any, is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Remote` on transport failure or non-2xx status.
    pub fn delete(&self, url: &str) -> Result<()> {
        send(self.request(Method::DELETE, url)).map(drop)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(method = %method, url = %url, "sending request");
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }
}

fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().map_err(|e| {
        tracing::warn!(error = %e, "request failed");
        let status_text = if e.is_timeout() {
            "request timed out".to_string()
        } else {
            e.to_string()
        };
        DashboardError::Remote {
            status: None,
            status_text,
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), url = %response.url(), "request rejected");
        return Err(DashboardError::remote(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
        ));
    }

    Ok(response)
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json().map_err(|e| {
        tracing::warn!(error = %e, "undecodable response body");
        DashboardError::Remote {
            status: None,
            status_text: format!("invalid response body: {e}"),
        }
    })
}
