//! Slack incoming-webhook notifier.

use reqwest::blocking::Client;
use serde::Serialize;
use url::Url;

use crate::domain::{AppError, NotifyConfig};
use crate::ports::Notifier;

use super::http::build_client;

const SERVICE: &str = "Slack";

/// Posts messages to a Slack incoming webhook.
#[derive(Clone)]
pub struct SlackWebhookNotifier {
    webhook_url: Url,
    client: Client,
}

impl std::fmt::Debug for SlackWebhookNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The webhook URL is itself the credential.
        f.debug_struct("SlackWebhookNotifier").field("webhook_url", &"[REDACTED]").finish()
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

impl SlackWebhookNotifier {
    pub fn new(webhook_url: &str, config: &NotifyConfig) -> Result<Self, AppError> {
        let webhook_url = Url::parse(webhook_url.trim()).map_err(|e| {
            AppError::config_error(format!("SLACK_ID is not a valid webhook URL: {}", e))
        })?;
        Ok(Self { webhook_url, client: build_client(SERVICE, config.timeout_secs)? })
    }
}

impl Notifier for SlackWebhookNotifier {
    fn name(&self) -> &str {
        "slack"
    }

    fn send(&self, text: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&WebhookPayload { text })
            .send()
            .map_err(|e| AppError::http(SERVICE, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_default();
        Err(AppError::http(SERVICE, format!("webhook returned {}: {}", status.as_u16(), body.trim())))
    }
}
