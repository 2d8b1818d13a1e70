//! Client configuration and credential loading.

pub mod file;

pub use file::FileConfig;

use std::time::Duration;

use bon::Builder;

/// Default authorization service root; the token endpoint is `{auth_url}/oauth`.
pub const DEFAULT_AUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2";
/// Default API root for model and chat endpoints.
pub const DEFAULT_BASE_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1";
/// Whole-request timeout applied by the transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
/// Tokens this close to expiry are treated as expired.
pub const DEFAULT_EXPIRY_SKEW: Duration = Duration::from_secs(60);

/// Endpoints and transport settings for a [`crate::Client`].
///
/// # Example
/// ```
/// use std::time::Duration;
/// use sberchat::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:8080/api/v1")
///     .timeout(Duration::from_secs(30))
///     .build();
/// assert!(!config.insecure);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClientConfig {
    #[builder(into, default = DEFAULT_AUTH_URL.to_string())]
    pub auth_url: String,
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Disable TLS certificate verification.
    #[builder(default)]
    pub insecure: bool,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    #[builder(default = DEFAULT_EXPIRY_SKEW)]
    pub expiry_skew: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientConfig {
    /// Defaults with certificate verification turned off.
    pub fn insecure() -> Self {
        Self::builder().insecure(true).build()
    }

    /// Join `path` onto the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
