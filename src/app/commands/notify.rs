//! The `notify` pipeline: fetch, score, translate, render, deliver.

use chrono::NaiveDate;

use crate::app::AppContext;
use crate::domain::digest::{clean_for_translation, render_digest, render_front_matter};
use crate::domain::{
    AppError, DateWindow, Digest, NotifierConfig, ScoredArticle, Template, rank,
};
use crate::ports::{PaperQuery, PaperSource, Translator};

/// Summary of a notify run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyOutcome {
    pub window: DateWindow,
    pub fetched: usize,
    pub selected: usize,
    /// Messages rendered, front matter included.
    pub messages: usize,
}

/// Run the pipeline for a run on `today`.
///
/// Every message goes to every destination. A destination that fails is
/// logged and the remaining deliveries continue; the run then fails with
/// [`AppError::NotificationFailed`] naming each failing destination.
pub fn execute<P: PaperSource, T: Translator>(
    ctx: &AppContext<P, T>,
    config: &NotifierConfig,
    today: NaiveDate,
) -> Result<NotifyOutcome, AppError> {
    let window = DateWindow::for_run_on(today);
    let query = PaperQuery { search: window.query(&config.subject), max_results: config.arxiv.max_results };
    tracing::info!(from = %window.from, to = %window.to, "searching arXiv");

    let articles = ctx.papers().search(&query)?;
    let fetched = articles.len();
    let ranked = rank(articles, &config.keywords, config.score_threshold, config.max_posts);
    tracing::info!(fetched, selected = ranked.len(), "ranked articles");

    let selected = ranked.len();
    let digests: Vec<Digest> =
        ranked.into_iter().map(|scored| translate(ctx.translator(), config, scored)).collect();

    let messages = render_messages(config, &window, &digests)?;
    deliver(ctx, &messages)?;

    Ok(NotifyOutcome { window, fetched, selected, messages: messages.len() })
}

fn translate<T: Translator>(translator: &T, config: &NotifierConfig, scored: ScoredArticle) -> Digest {
    let title_trans = translate_text(translator, config, &scored.article.title);
    let summary_trans = translate_text(translator, config, &scored.article.summary);
    Digest { scored, title_trans, summary_trans }
}

/// Translate `text`, falling back to the cleaned source text on failure.
fn translate_text<T: Translator>(translator: &T, config: &NotifierConfig, text: &str) -> String {
    let cleaned = clean_for_translation(text);
    match translator.translate(&cleaned, &config.translation.source_lang, &config.lang) {
        Ok(translated) => translated,
        Err(e) => {
            tracing::warn!(error = %e, "translation failed, posting original text");
            cleaned
        }
    }
}

fn render_messages(
    config: &NotifierConfig,
    window: &DateWindow,
    digests: &[Digest],
) -> Result<Vec<String>, AppError> {
    let mut messages = Vec::with_capacity(digests.len() + 1);

    let front = render_front_matter(&config.front_matter, digests.len(), &window.display_date())?;
    if !front.is_empty() {
        messages.push(front);
    }

    let template = Template::parse(&config.template)?;
    for digest in digests {
        messages.push(render_digest(&template, digest)?);
    }
    Ok(messages)
}

fn deliver<P: PaperSource, T: Translator>(
    ctx: &AppContext<P, T>,
    messages: &[String],
) -> Result<(), AppError> {
    if ctx.notifiers().is_empty() {
        tracing::warn!("no destination configured; set SLACK_ID, LINE_TOKEN or pass --console");
        return Ok(());
    }

    let mut failed: Vec<String> = Vec::new();
    for notifier in ctx.notifiers() {
        let mut sent = 0;
        for message in messages {
            match notifier.send(message) {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::error!(destination = notifier.name(), error = %e, "delivery failed");
                    if !failed.iter().any(|name| name == notifier.name()) {
                        failed.push(notifier.name().to_string());
                    }
                }
            }
        }
        tracing::info!(destination = notifier.name(), sent, "delivered messages");
    }

    if failed.is_empty() { Ok(()) } else { Err(AppError::NotificationFailed(failed)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_config_content;
    use crate::ports::{Notifier, PassthroughTranslator};
    use crate::testing::{FakePaperSource, FakeTranslator, RecordingNotifier, article};

    fn config(extra: &str) -> NotifierConfig {
        let content = format!(
            "subject: cat:cs.AI\nkeywords:\n  reinforcement learning: 1\n  offline: 2\n  survey: -1\n{}",
            extra
        );
        parse_config_content(&content).unwrap()
    }

    fn papers() -> FakePaperSource {
        FakePaperSource::new(vec![
            article("2403.00001", "Plain RL", "We study reinforcement learning."),
            article("2403.00002", "Offline RL", "Offline reinforcement learning with $x$."),
            article("2403.00003", "Unrelated", "Owls and their habits."),
            article("2403.00004", "An RL survey", "A survey of reinforcement learning."),
        ])
    }

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
    }

    fn context<T: Translator>(
        papers: FakePaperSource,
        translator: T,
        notifiers: Vec<RecordingNotifier>,
    ) -> AppContext<FakePaperSource, T> {
        let boxed = notifiers.into_iter().map(|n| Box::new(n) as Box<dyn Notifier>).collect();
        AppContext::new(papers, translator, boxed)
    }

    #[test]
    fn queries_the_window_for_the_run_date() {
        let papers = papers();
        let ctx = context(papers.clone(), PassthroughTranslator, vec![]);

        let outcome = execute(&ctx, &config(""), friday()).unwrap();

        let queries = papers.get_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0].search,
            "(cat:cs.AI) AND submittedDate:[20240306000000 TO 20240306235959]"
        );
        assert_eq!(queries[0].max_results, 1000);
        assert_eq!(outcome.fetched, 4);
    }

    #[test]
    fn posts_front_matter_then_ranked_articles() {
        let slack = RecordingNotifier::new("slack");
        let ctx = context(papers(), PassthroughTranslator, vec![slack.clone()]);

        let outcome = execute(&ctx, &config(""), friday()).unwrap();

        // The survey scores 0 and the owl paper has no hits.
        assert_eq!(outcome.selected, 2);
        assert_eq!(outcome.messages, 3);
        let messages = slack.get_messages();
        assert!(messages[0].contains("2024-03-06\tnum of articles = 2"));
        assert!(messages[1].contains("score: `3.0`"));
        assert!(messages[1].contains("hit keywords: `reinforcement learning, offline`"));
        assert!(messages[1].contains("Offline reinforcement learning with x."));
        assert!(messages[2].contains("score: `1.0`"));
    }

    #[test]
    fn translations_fill_the_template() {
        let translator = FakeTranslator::new();
        let slack = RecordingNotifier::new("slack");
        let ctx = context(papers(), translator.clone(), vec![slack.clone()]);

        execute(&ctx, &config("lang: de\n"), friday()).unwrap();

        assert!(slack.get_messages()[1].contains("title:    [de] Offline RL"));
        assert!(translator.get_requests().contains(&"Offline reinforcement learning with x.".to_string()));
    }

    #[test]
    fn translation_failure_falls_back_to_source_text() {
        let slack = RecordingNotifier::new("slack");
        let ctx = context(papers(), FakeTranslator::failing(), vec![slack.clone()]);

        execute(&ctx, &config(""), friday()).unwrap();

        assert!(slack.get_messages()[1].contains("title:    Offline RL"));
    }

    #[test]
    fn empty_front_matter_is_skipped() {
        let slack = RecordingNotifier::new("slack");
        let ctx = context(papers(), PassthroughTranslator, vec![slack.clone()]);

        let outcome = execute(&ctx, &config("front_matter: \"\"\n"), friday()).unwrap();

        assert_eq!(outcome.messages, 2);
        assert!(slack.get_messages()[0].starts_with("score:"));
    }

    #[test]
    fn whitespace_front_matter_is_still_posted() {
        let slack = RecordingNotifier::new("slack");
        let ctx = context(papers(), PassthroughTranslator, vec![slack.clone()]);

        let outcome = execute(&ctx, &config("front_matter: \"\\n\"\n"), friday()).unwrap();

        assert_eq!(outcome.messages, 3);
        assert_eq!(slack.get_messages()[0], "\n");
    }

    #[test]
    fn max_posts_limits_messages() {
        let slack = RecordingNotifier::new("slack");
        let ctx = context(papers(), PassthroughTranslator, vec![slack.clone()]);

        let outcome = execute(&ctx, &config("max_posts: 1\n"), friday()).unwrap();

        assert_eq!(outcome.selected, 1);
        assert_eq!(slack.get_messages().len(), 2);
    }

    #[test]
    fn no_matches_still_posts_front_matter() {
        let slack = RecordingNotifier::new("slack");
        let papers = FakePaperSource::new(vec![article("1", "Owls", "Nothing relevant.")]);
        let ctx = context(papers, PassthroughTranslator, vec![slack.clone()]);

        execute(&ctx, &config(""), friday()).unwrap();

        let messages = slack.get_messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("num of articles = 0"));
    }

    #[test]
    fn failing_destination_does_not_stop_others() {
        let slack = RecordingNotifier::failing("slack");
        let line = RecordingNotifier::new("line");
        let ctx = context(papers(), PassthroughTranslator, vec![slack, line.clone()]);

        let err = execute(&ctx, &config(""), friday()).unwrap_err();

        assert!(matches!(&err, AppError::NotificationFailed(names) if names == &vec!["slack".to_string()]));
        assert_eq!(line.get_messages().len(), 3);
    }

    #[test]
    fn no_destinations_is_not_an_error() {
        let ctx = context(papers(), PassthroughTranslator, vec![]);
        assert!(execute(&ctx, &config(""), friday()).is_ok());
    }

    #[test]
    fn fetch_failure_propagates() {
        let slack = RecordingNotifier::new("slack");
        let ctx = context(FakePaperSource::failing(), PassthroughTranslator, vec![slack.clone()]);

        assert!(matches!(execute(&ctx, &config(""), friday()), Err(AppError::Http { .. })));
        assert!(slack.get_messages().is_empty());
    }
}
