//! LINE Notify notifier.

use reqwest::blocking::Client;
use url::Url;

use crate::domain::{AppError, NotifyConfig};
use crate::ports::Notifier;

use super::http::build_client;

const SERVICE: &str = "LINE";

/// Posts messages through LINE Notify with a personal access token.
#[derive(Clone)]
pub struct LineNotifier {
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for LineNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineNotifier")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl LineNotifier {
    pub fn new(token: String, config: &NotifyConfig) -> Result<Self, AppError> {
        Ok(Self {
            token,
            api_url: config.line_api_url.clone(),
            client: build_client(SERVICE, config.timeout_secs)?,
        })
    }
}

impl Notifier for LineNotifier {
    fn name(&self) -> &str {
        "line"
    }

    fn send(&self, text: &str) -> Result<(), AppError> {
        let message = format!("message: {}", text);
        let response = self
            .client
            .post(self.api_url.clone())
            .bearer_auth(&self.token)
            .form(&[("message", message.as_str())])
            .send()
            .map_err(|e| AppError::http(SERVICE, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_default();
        Err(AppError::http(SERVICE, format!("notify returned {}: {}", status.as_u16(), body.trim())))
    }
}
