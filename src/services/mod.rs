pub mod adapters;
mod arxiv_atom;
mod arxiv_http;
mod console_notifier;
mod deepl_http;
mod http;
mod line_notify;
pub mod scaffold_assets;
mod slack_webhook;

pub use adapters::{EnvSecrets, GitCommandAdapter, ShellStepExecutor};
pub use arxiv_atom::parse_feed;
pub use arxiv_http::HttpArxivClient;
pub use console_notifier::ConsoleNotifier;
pub use deepl_http::{DEEPL_AUTH_KEY, HttpDeeplTranslator};
pub use line_notify::LineNotifier;
pub use slack_webhook::SlackWebhookNotifier;
