//! Client configuration, loaded from the environment or built in code.

use std::time::Duration;

use crate::client::EstatClient;
use crate::error::{EstatError, Result};
use crate::params::{CommonParams, Lang};
use crate::transport::HttpTransport;

/// Root of the e-Stat REST API, version 3.0, XML responses.
pub const DEFAULT_BASE_URL: &str = "https://api.e-stat.go.jp/rest/3.0/app";

/// HTTP timeout in seconds.
///
/// Large `getStatsData` pages can take several seconds to render server-side.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for an [`EstatClient`] over HTTP.
///
/// `Debug` is implemented by hand so the application id is not printed.
#[derive(Clone)]
pub struct EstatConfig {
    pub app_id: String,
    pub lang: Option<Lang>,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Log encoded request payloads.
    pub debug: bool,
}

impl std::fmt::Debug for EstatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstatConfig")
            .field("app_id", &"<redacted>")
            .field("lang", &self.lang)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("debug", &self.debug)
            .finish()
    }
}

impl EstatConfig {
    /// Load configuration from environment variables.
    ///
    /// `ESTAT_APP_ID` is required; `ESTAT_LANG`, `ESTAT_BASE_URL`,
    /// `ESTAT_TIMEOUT_SECS` and `ESTAT_DEBUG` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let app_id = var("ESTAT_APP_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| EstatError::Config("ESTAT_APP_ID not set".into()))?;

        let lang = var("ESTAT_LANG")
            .map(|v| v.parse::<Lang>().map_err(EstatError::Config))
            .transpose()?;

        let base_url = var("ESTAT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let timeout_secs = var("ESTAT_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let debug = var("ESTAT_DEBUG").is_some_and(|v| is_truthy(&v));

        Ok(Self {
            app_id,
            lang,
            base_url,
            timeout_secs,
            debug,
        })
    }

    /// Create a config builder for testing.
    pub fn builder(app_id: impl Into<String>) -> EstatConfigBuilder {
        EstatConfigBuilder {
            app_id: app_id.into(),
            lang: None,
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
        }
    }

    #[must_use]
    pub fn common_params(&self) -> CommonParams {
        CommonParams {
            app_id: self.app_id.clone(),
            lang: self.lang,
        }
    }

    /// Build an HTTP client from this configuration.
    pub fn build_client(&self) -> Result<EstatClient<HttpTransport>> {
        let transport =
            HttpTransport::new(&self.base_url, Duration::from_secs(self.timeout_secs))?
                .with_payload_logging(self.debug);
        Ok(EstatClient::new(self.common_params(), transport))
    }
}

/// Whether `ESTAT_DEBUG` asks for debug output.
pub fn debug_from_env() -> bool {
    std::env::var("ESTAT_DEBUG").is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes")
}

/// Builder for constructing `EstatConfig` in tests.
pub struct EstatConfigBuilder {
    app_id: String,
    lang: Option<Lang>,
    base_url: String,
    timeout_secs: u64,
    debug: bool,
}

impl EstatConfigBuilder {
    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn build(self) -> EstatConfig {
        EstatConfig {
            app_id: self.app_id,
            lang: self.lang,
            base_url: self.base_url,
            timeout_secs: self.timeout_secs,
            debug: self.debug,
        }
    }
}
