//! Keyword scoring and ranking of abstracts.

use crate::domain::article::Article;
use crate::domain::configuration::Keyword;

/// An article together with its keyword score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArticle {
    pub article: Article,
    pub score: f64,
    /// Keywords found in the abstract, in configuration order.
    pub hit_keywords: Vec<String>,
}

/// Score `text` against `keywords`.
///
/// Matching is a case-insensitive substring test in which hyphens count as
/// spaces, so "self-supervised" in the text matches a "self supervised"
/// keyword and vice versa.
pub fn score_text(text: &str, keywords: &[Keyword]) -> (f64, Vec<String>) {
    let haystack = normalize(text);
    let mut total = 0.0;
    let mut hits = Vec::new();

    for keyword in keywords {
        if haystack.contains(&normalize(&keyword.word)) {
            total += keyword.score;
            hits.push(keyword.word.clone());
        }
    }

    (total, hits)
}

/// Score every article's abstract, drop those below `threshold` or with a zero
/// score, and order the rest by descending score.
///
/// Ties keep their input order. `max_posts` caps the result length.
pub fn rank(
    articles: Vec<Article>,
    keywords: &[Keyword],
    threshold: f64,
    max_posts: Option<usize>,
) -> Vec<ScoredArticle> {
    let mut scored: Vec<ScoredArticle> = articles
        .into_iter()
        .filter_map(|article| {
            let (score, hit_keywords) = score_text(&article.summary, keywords);
            (score != 0.0 && score >= threshold).then_some(ScoredArticle {
                article,
                score,
                hit_keywords,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    if let Some(limit) = max_posts {
        scored.truncate(limit);
    }
    scored
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace('-', " ")
}
