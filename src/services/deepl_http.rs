//! DeepL translation client implementation using reqwest.

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, TranslationConfig};
use crate::ports::Translator;

use super::http::{
    RequestFailure, RetryPolicy, build_client, check_status, transport_failure, with_retries,
};

const SERVICE: &str = "DeepL";

/// Environment variable holding the DeepL API key.
pub const DEEPL_AUTH_KEY: &str = "DEEPL_AUTH_KEY";

/// HTTP client for the DeepL translate endpoint.
#[derive(Clone)]
pub struct HttpDeeplTranslator {
    auth_key: String,
    api_url: Url,
    retry: RetryPolicy,
    client: Client,
}

impl std::fmt::Debug for HttpDeeplTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDeeplTranslator")
            .field("api_url", &self.api_url)
            .field("retry", &self.retry)
            .field("auth_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpDeeplTranslator {
    pub fn new(auth_key: String, config: &TranslationConfig) -> Result<Self, AppError> {
        Ok(Self {
            auth_key,
            api_url: config.api_url.clone(),
            retry: RetryPolicy::new(config.max_retries, config.retry_delay_ms),
            client: build_client(SERVICE, config.timeout_secs)?,
        })
    }

    /// Create from `DEEPL_AUTH_KEY`; `None` when the key is unset or empty.
    pub fn from_env(config: &TranslationConfig) -> Result<Option<Self>, AppError> {
        match std::env::var(DEEPL_AUTH_KEY) {
            Ok(key) if !key.trim().is_empty() => Ok(Some(Self::new(key, config)?)),
            _ => Ok(None),
        }
    }

    fn send_request(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, RequestFailure> {
        let source_lang = source_lang.to_uppercase();
        let target_lang = target_lang.to_uppercase();
        let response = self
            .client
            .post(self.api_url.clone())
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.auth_key))
            .form(&[
                ("text", text),
                ("source_lang", source_lang.as_str()),
                ("target_lang", target_lang.as_str()),
            ])
            .send()
            .map_err(|e| transport_failure(SERVICE, e))?;

        let body: TranslateResponse = check_status(SERVICE, response)?.json().map_err(|e| {
            RequestFailure::Fatal(AppError::ParseError {
                what: "DeepL response".to_string(),
                details: e.to_string(),
            })
        })?;

        body.translations.into_iter().next().map(|t| t.text).ok_or_else(|| {
            RequestFailure::Fatal(AppError::http(SERVICE, "response contained no translations"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

impl Translator for HttpDeeplTranslator {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, AppError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        with_retries(SERVICE, &self.retry, || self.send_request(text, source_lang, target_lang))
    }
}
