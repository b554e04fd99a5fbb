use crate::error::{config_error, InkslotError};
use inkslot_config::BackendConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Creates the client used to talk to the studio backend.
///
/// JSON is requested on every call and, when the config carries an API
/// token, it is sent as a bearer `Authorization` header.
pub fn create_backend_client(config: &BackendConfig) -> Result<Client, InkslotError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = config.api_token.as_deref() {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| config_error("backend.api_token contains invalid header characters"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    let timeout = if config.timeout_secs == 0 {
        DEFAULT_TIMEOUT_SECS
    } else {
        config.timeout_secs
    };
    Client::builder()
        .timeout(Duration::from_secs(timeout))
        .default_headers(headers)
        .build()
        .map_err(InkslotError::from)
}
