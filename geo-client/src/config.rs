//! Client configuration for NCBI E-utilities access

use std::time::Duration;

/// Default base URL for the NCBI E-utilities endpoints
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the GEO client
///
/// # Example
///
/// ```
/// use geo_client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_tool("my-pipeline")
///     .with_timeout(std::time::Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Option<String>,
    user_agent: Option<String>,
    tool: Option<String>,
    /// Request timeout applied to the underlying HTTP client
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            tool: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the E-utilities base URL (primarily for testing against mocks)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a custom User-Agent header value
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the NCBI `tool` identification parameter appended to each request
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base URL requests are issued against
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// The User-Agent header value to send
    pub fn effective_user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!("geo-client-rs/{}", env!("CARGO_PKG_VERSION"))
        })
    }

    /// Extra query parameters (currently just `tool` identification)
    pub(crate) fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(ref tool) = self.tool {
            params.push(("tool".to_string(), tool.clone()));
        }
        params
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
