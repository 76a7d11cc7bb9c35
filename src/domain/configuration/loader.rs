//! Notifier configuration loading.

use std::path::Path;

use crate::domain::AppError;

use super::notifier_config::NotifierConfig;

/// Load and validate the notifier configuration at `path`.
pub fn load_config(path: &Path) -> Result<NotifierConfig, AppError> {
    if !path.exists() {
        return Err(AppError::ConfigMissing(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<NotifierConfig, AppError> {
    let dto: dto::NotifierConfigDto = serde_yaml::from_str(content)?;
    let config: NotifierConfig = dto.try_into()?;
    config.validate()?;
    Ok(config)
}

mod dto {
    use serde::Deserialize;
    use serde_yaml::{Mapping, Value};

    use crate::domain::AppError;
    use crate::domain::configuration::notifier_config::{
        ArxivApiConfig, Keyword, NotifierConfig, NotifyConfig, TranslationConfig,
    };
    use crate::domain::digest::{DEFAULT_FRONT_MATTER, DEFAULT_TEMPLATE};

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct NotifierConfigDto {
        pub subject: Option<String>,
        pub keywords: Option<Mapping>,
        pub score_threshold: Option<f64>,
        pub max_posts: Option<i64>,
        pub lang: Option<String>,
        pub front_matter: Option<String>,
        pub template: Option<String>,
        #[serde(default)]
        pub arxiv: ArxivApiConfig,
        #[serde(default)]
        pub translation: TranslationConfig,
        #[serde(default)]
        pub notify: NotifyConfig,
    }

    impl TryFrom<NotifierConfigDto> for NotifierConfig {
        type Error = AppError;

        fn try_from(dto: NotifierConfigDto) -> Result<Self, Self::Error> {
            let subject = dto
                .subject
                .ok_or_else(|| AppError::InvalidConfig("missing required key 'subject'".into()))?;
            let keywords = dto
                .keywords
                .ok_or_else(|| AppError::InvalidConfig("missing required key 'keywords'".into()))?;

            Ok(NotifierConfig {
                subject,
                keywords: keywords_from_mapping(keywords)?,
                score_threshold: dto.score_threshold.unwrap_or(0.0),
                // A negative limit means "no limit".
                max_posts: dto.max_posts.and_then(|n| usize::try_from(n).ok()),
                lang: dto.lang.unwrap_or_else(|| "ja".to_string()),
                front_matter: dto.front_matter.unwrap_or_else(|| DEFAULT_FRONT_MATTER.to_string()),
                template: dto.template.unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
                arxiv: dto.arxiv,
                translation: dto.translation,
                notify: dto.notify,
            })
        }
    }

    fn keywords_from_mapping(mapping: Mapping) -> Result<Vec<Keyword>, AppError> {
        mapping
            .into_iter()
            .map(|(key, value)| {
                let word = match key {
                    Value::String(word) => word,
                    Value::Number(n) => n.to_string(),
                    other => {
                        return Err(AppError::InvalidConfig(format!(
                            "keyword must be a string, got {:?}",
                            other
                        )));
                    }
                };
                let score = value.as_f64().ok_or_else(|| {
                    AppError::InvalidConfig(format!("score for keyword '{}' must be a number", word))
                })?;
                Ok(Keyword { word, score })
            })
            .collect()
    }
}
