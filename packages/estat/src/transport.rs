//! HTTP transport for the e-Stat REST API.
//!
//! The [`Transport`] trait is the seam between the client and the network;
//! tests substitute a fake that returns recorded bodies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};
use url::Url;

use crate::error::TransportError;
use crate::query::Query;

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("estat-client/", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Status code and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange per call.
///
/// A non-2xx status is not an error; it is returned with the body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &Query) -> Result<RawResponse, TransportError>;

    /// POST `form` as a urlencoded body, with `query` in the URL.
    async fn post(
        &self,
        path: &str,
        query: &Query,
        form: &Query,
    ) -> Result<RawResponse, TransportError>;

    /// POST a JSON body, with `query` in the URL.
    async fn post_json_with_query(
        &self,
        path: &str,
        query: &Query,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] over a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    log_payloads: bool,
}

impl HttpTransport {
    /// `base_url` is the API root, e.g. `https://api.e-stat.go.jp/rest/3.0/app`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            log_payloads: false,
        })
    }

    /// Log encoded request payloads at debug level.
    #[must_use]
    pub fn with_payload_logging(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &Query) -> Result<Url, TransportError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|source| TransportError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;
        if !query.is_empty() {
            url.set_query(Some(&query.encode()));
        }
        Ok(url)
    }

    fn log_request(&self, method: &str, url: &Url, payload: Option<&str>) {
        let shown = redact_app_id(url);
        match payload {
            Some(payload) if self.log_payloads => {
                debug!(method, url = %shown, payload, "Sending request");
            }
            _ => debug!(method, url = %shown, "Sending request"),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<RawResponse, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status.is_success() {
            debug!(status = status.as_u16(), bytes = body.len(), "Received response");
        } else {
            warn!(status = %status, bytes = body.len(), "Service returned non-success status");
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &Query) -> Result<RawResponse, TransportError> {
        let url = self.url(path, query)?;
        self.log_request("GET", &url, None);
        self.send(self.http.get(url)).await
    }

    async fn post(
        &self,
        path: &str,
        query: &Query,
        form: &Query,
    ) -> Result<RawResponse, TransportError> {
        let url = self.url(path, query)?;
        let body = form.encode();
        self.log_request("POST", &url, Some(&body));
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        self.send(request).await
    }

    async fn post_json_with_query(
        &self,
        path: &str,
        query: &Query,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError> {
        let url = self.url(path, query)?;
        let body = body.to_string();
        self.log_request("POST", &url, Some(&body));
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.send(request).await
    }
}

/// Copy of `url` with the `appId` value masked, for logging.
fn redact_app_id(url: &Url) -> Url {
    let mut shown = url.clone();
    if url.query_pairs().any(|(key, _)| key == "appId") {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key == "appId" {
                    "***".to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        shown.query_pairs_mut().clear().extend_pairs(pairs);
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryWriter;

    #[test]
    fn test_create_transport() {
        let transport =
            HttpTransport::new("https://api.e-stat.go.jp/rest/3.0/app/", Duration::from_secs(5));
        assert!(transport.is_ok());
        assert_eq!(
            transport.unwrap().base_url(),
            "https://api.e-stat.go.jp/rest/3.0/app"
        );
    }

    #[test]
    fn test_url_joins_path_and_query() {
        let transport =
            HttpTransport::new("https://api.e-stat.go.jp/rest/3.0/app", Duration::from_secs(5))
                .unwrap();
        let mut writer = QueryWriter::new();
        writer.required("appId", "id").required("limit", 2);
        let url = transport.url("/getStatsList", &writer.finish()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.e-stat.go.jp/rest/3.0/app/getStatsList?appId=id&limit=2"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let transport = HttpTransport::new("not a url", Duration::from_secs(5)).unwrap();
        let err = transport.url("/getStatsList", &Query::new()).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    #[test]
    fn test_redact_app_id() {
        let url = Url::parse("https://example.com/getStatsList?appId=secret&lang=J").unwrap();
        let shown = redact_app_id(&url);
        assert!(!shown.as_str().contains("secret"));
        assert!(shown.as_str().contains("lang=J"));
    }

    #[test]
    fn test_raw_response_is_success() {
        let ok = RawResponse {
            status: 200,
            body: Vec::new(),
        };
        let not_found = RawResponse {
            status: 404,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }
}
