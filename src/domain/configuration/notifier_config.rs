//! Notifier configuration domain models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::digest::{FRONT_MATTER_VARIABLES, paper_variable_names};
use crate::domain::template::Template;

/// A weighted search keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub word: String,
    pub score: f64,
}

/// Configuration loaded from `config.yaml`.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    /// arXiv search clause, e.g. `cat:cs.AI`.
    pub subject: String,
    /// Keywords in declaration order.
    pub keywords: Vec<Keyword>,
    /// Minimum score an article needs to be posted.
    pub score_threshold: f64,
    /// Maximum number of articles to post; `None` means unlimited.
    pub max_posts: Option<usize>,
    /// Translation target language.
    pub lang: String,
    /// Template for the header message.
    pub front_matter: String,
    /// Template for each article message.
    pub template: String,
    pub arxiv: ArxivApiConfig,
    pub translation: TranslationConfig,
    pub notify: NotifyConfig,
}

impl NotifierConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.subject.trim().is_empty() {
            return Err(AppError::InvalidConfig("subject must not be empty".to_string()));
        }
        if self.keywords.is_empty() {
            return Err(AppError::InvalidConfig("keywords must not be empty".to_string()));
        }
        for keyword in &self.keywords {
            if keyword.word.trim().is_empty() {
                return Err(AppError::InvalidConfig("keyword must not be empty".to_string()));
            }
            if !keyword.score.is_finite() {
                return Err(AppError::InvalidConfig(format!(
                    "score for keyword '{}' must be a finite number",
                    keyword.word
                )));
            }
        }
        if !self.score_threshold.is_finite() {
            return Err(AppError::InvalidConfig("score_threshold must be a finite number".into()));
        }
        if self.lang.trim().is_empty() {
            return Err(AppError::InvalidConfig("lang must not be empty".to_string()));
        }

        validate_template("front_matter", &self.front_matter, FRONT_MATTER_VARIABLES)?;
        validate_template("template", &self.template, &paper_variable_names())?;

        self.arxiv.validate()?;
        self.translation.validate()?;
        self.notify.validate()?;
        Ok(())
    }
}

fn validate_template(field: &str, source: &str, known: &[&str]) -> Result<(), AppError> {
    let template = Template::parse(source)
        .map_err(|e| AppError::InvalidConfig(format!("{}: {}", field, e)))?;
    for name in template.placeholders() {
        if !known.contains(&name) {
            return Err(AppError::InvalidConfig(format!(
                "{}: unknown placeholder '{}' (available: {})",
                field,
                name,
                known.join(", ")
            )));
        }
    }
    Ok(())
}

/// arXiv API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArxivApiConfig {
    /// arXiv query endpoint.
    #[serde(default = "default_arxiv_url")]
    pub api_url: Url,
    /// Maximum number of entries requested per run.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for ArxivApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_arxiv_url(),
            max_results: default_max_results(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ArxivApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_results == 0 {
            return Err(AppError::InvalidConfig(
                "arxiv.max_results must be greater than 0".to_string(),
            ));
        }
        validate_http("arxiv", self.timeout_secs, self.max_retries, self.retry_delay_ms)
    }
}

/// Translation API configuration.
///
/// The auth key is never stored here; it is read from `DEEPL_AUTH_KEY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// DeepL translate endpoint.
    #[serde(default = "default_deepl_url")]
    pub api_url: Url,
    /// Language the papers are written in.
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_url: default_deepl_url(),
            source_lang: default_source_lang(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl TranslationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.source_lang.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "translation.source_lang must not be empty".to_string(),
            ));
        }
        validate_http("translation", self.timeout_secs, self.max_retries, self.retry_delay_ms)
    }
}

/// Delivery configuration shared by the HTTP notifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    /// LINE Notify endpoint.
    #[serde(default = "default_line_url")]
    pub line_api_url: Url,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { line_api_url: default_line_url(), timeout_secs: default_timeout() }
    }
}

impl NotifyConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "notify.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_http(
    section: &str,
    timeout_secs: u64,
    max_retries: u32,
    retry_delay_ms: u64,
) -> Result<(), AppError> {
    if timeout_secs == 0 {
        return Err(AppError::InvalidConfig(format!(
            "{}.timeout_secs must be greater than 0",
            section
        )));
    }
    if max_retries == 0 {
        return Err(AppError::InvalidConfig(format!(
            "{}.max_retries must be greater than 0",
            section
        )));
    }
    if retry_delay_ms == 0 {
        return Err(AppError::InvalidConfig(format!(
            "{}.retry_delay_ms must be greater than 0",
            section
        )));
    }
    Ok(())
}

fn default_arxiv_url() -> Url {
    Url::parse("https://export.arxiv.org/api/query").expect("Default arXiv URL must be valid")
}

fn default_deepl_url() -> Url {
    Url::parse("https://api-free.deepl.com/v2/translate").expect("Default DeepL URL must be valid")
}

fn default_line_url() -> Url {
    Url::parse("https://notify-api.line.me/api/notify").expect("Default LINE URL must be valid")
}

fn default_max_results() -> u32 {
    1000
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}
