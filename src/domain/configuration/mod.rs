pub mod loader;
pub mod notifier_config;

pub use loader::{load_config, parse_config_content};
pub use notifier_config::{ArxivApiConfig, Keyword, NotifierConfig, NotifyConfig, TranslationConfig};
