use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const USER_AGENT: &str = concat!("gitsearch/", env!("CARGO_PKG_VERSION"));
pub const GITHUB_JSON: &str = "application/vnd.github.v3+json";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of a request that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking GitHub REST client. Headers are attached per request, so nothing
/// from one call carries over into the next.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn with_base_url(base_url: &str) -> reqwest::Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// `timeout` bounds both connecting and the whole request.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url`. `Err` means no HTTP status was ever produced; any status,
    /// success or not, comes back as `Ok` with its body.
    pub fn execute(&self, url: &str, token: Option<&str>) -> reqwest::Result<ApiResponse> {
        debug!(%url, authenticated = token.is_some(), "GET");

        let mut request = self.http.get(url).header(ACCEPT, GITHUB_JSON);
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "response received");

        Ok(ApiResponse { status, body })
    }
}
