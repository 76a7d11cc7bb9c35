mod env_guard;
mod fake_git;
mod fake_paper_source;
mod fake_step_executor;
mod fake_translator;
mod recording_notifier;

pub use env_guard::EnvVarGuard;
pub use fake_git::FakeGit;
pub use fake_paper_source::FakePaperSource;
pub use fake_step_executor::{FakeStepExecutor, ScriptedStep};
pub use fake_translator::FakeTranslator;
pub use recording_notifier::RecordingNotifier;

use crate::domain::Article;

/// Minimal article with the given abstract.
pub fn article(id: &str, title: &str, summary: &str) -> Article {
    Article {
        id: format!("http://arxiv.org/abs/{}", id),
        title: title.to_string(),
        summary: summary.to_string(),
        arxiv_url: format!("http://arxiv.org/abs/{}", id),
        authors: vec!["Ada Lovelace".to_string()],
        ..Default::default()
    }
}
