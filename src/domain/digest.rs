//! Rendering of the messages posted for a run.

use crate::domain::article::{Article, join_list};
use crate::domain::scoring::ScoredArticle;
use crate::domain::template::{Template, TemplateError, Variables};

/// Header sent before the per-article messages.
pub const DEFAULT_FRONT_MATTER: &str = "********************************************************************************\n\
\t \t ${date}\tnum of articles = ${num}\n\
********************************************************************************\n";

/// Body of each per-article message.
pub const DEFAULT_TEMPLATE: &str = "score: `${score}`\n\
hit keywords: `${words}`\n\
url: ${arxiv_url}\n\
title:    ${title_trans}\n\
abstract:\n\
\t ${summary_trans}\n\
********************************************************************************\n";

/// Placeholders available to the front matter template.
pub const FRONT_MATTER_VARIABLES: &[&str] = &["num", "date"];

const DIGEST_VARIABLES: &[&str] = &["words", "score", "title_trans", "summary_trans"];

/// A ranked article with its translated title and abstract.
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    pub scored: ScoredArticle,
    pub title_trans: String,
    pub summary_trans: String,
}

/// Placeholders available to the per-article template.
pub fn paper_variable_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> =
        Article::default().template_fields().into_iter().map(|(name, _)| name).collect();
    names.extend_from_slice(DIGEST_VARIABLES);
    names
}

/// Strip TeX math delimiters and line breaks before sending text to the translator.
pub fn clean_for_translation(text: &str) -> String {
    text.replace('$', "").replace('\n', " ")
}

/// Render a score the way the original digests showed it: always with a
/// fractional part (`3.0`, `2.5`), and in exponent form (`1e+16`) outside
/// `1e-4..1e16`.
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        return "nan".to_string();
    }
    if score.is_infinite() {
        return if score > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = score.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let rendered = format!("{:e}", score);
        return match rendered.split_once('e') {
            Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
                Some(digits) => format!("{}e-{:0>2}", mantissa, digits),
                None => format!("{}e+{:0>2}", mantissa, exponent),
            },
            None => rendered,
        };
    }
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}

pub fn render_front_matter(template: &str, num: usize, date: &str) -> Result<String, TemplateError> {
    let mut vars = Variables::new();
    vars.insert("num".to_string(), num.to_string());
    vars.insert("date".to_string(), date.to_string());
    Template::parse(template)?.substitute(&vars)
}

pub fn render_digest(template: &Template, digest: &Digest) -> Result<String, TemplateError> {
    let mut vars: Variables = digest
        .scored
        .article
        .template_fields()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    vars.insert("words".to_string(), join_list(&digest.scored.hit_keywords));
    vars.insert("score".to_string(), format_score(digest.scored.score));
    vars.insert("title_trans".to_string(), digest.title_trans.clone());
    vars.insert("summary_trans".to_string(), digest.summary_trans.clone());
    template.substitute(&vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest() -> Digest {
        Digest {
            scored: ScoredArticle {
                article: Article {
                    id: "http://arxiv.org/abs/2403.00001v1".into(),
                    title: "Owls".into(),
                    arxiv_url: "http://arxiv.org/abs/2403.00001v1".into(),
                    ..Default::default()
                },
                score: 3.0,
                hit_keywords: vec!["owl".into(), "night vision".into()],
            },
            title_trans: "フクロウ".into(),
            summary_trans: "夜の鳥".into(),
        }
    }

    #[test]
    fn default_template_renders_all_fields() {
        let template = Template::parse(DEFAULT_TEMPLATE).unwrap();
        let text = render_digest(&template, &digest()).unwrap();
        assert!(text.starts_with("score: `3.0`\nhit keywords: `owl, night vision`\n"));
        assert!(text.contains("url: http://arxiv.org/abs/2403.00001v1\n"));
        assert!(text.contains("title:    フクロウ\n"));
        assert!(text.contains("abstract:\n\t 夜の鳥\n"));
        assert!(text.ends_with(&format!("{}\n", "*".repeat(80))));
    }

    #[test]
    fn default_front_matter_renders_date_and_count() {
        let text = render_front_matter(DEFAULT_FRONT_MATTER, 4, "2024-03-10").unwrap();
        let star = "*".repeat(80);
        assert_eq!(text, format!("{star}\n\t \t 2024-03-10\tnum of articles = 4\n{star}\n"));
    }

    #[test]
    fn empty_front_matter_renders_empty() {
        assert_eq!(render_front_matter("", 0, "2024-03-10").unwrap(), "");
    }

    #[test]
    fn scores_keep_a_fractional_part() {
        assert_eq!(format_score(3.0), "3.0");
        assert_eq!(format_score(2.5), "2.5");
        assert_eq!(format_score(-1.0), "-1.0");
        assert_eq!(format_score(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn extreme_scores_use_exponent_form() {
        assert_eq!(format_score(1e16), "1e+16");
        assert_eq!(format_score(-1.5e16), "-1.5e+16");
        assert_eq!(format_score(1.25e300), "1.25e+300");
        assert_eq!(format_score(0.00001), "1e-05");
        assert_eq!(format_score(0.0001), "0.0001");
        assert_eq!(format_score(9999999999999998.0), "9999999999999998.0");
        assert_eq!(format_score(0.0), "0.0");
    }

    #[test]
    fn translation_input_drops_math_and_newlines() {
        assert_eq!(clean_for_translation("a $x^2$\nterm"), "a x^2 term");
    }

    #[test]
    fn paper_variables_cover_article_and_digest_fields() {
        let names = paper_variable_names();
        for expected in ["title", "authors", "arxiv_url", "words", "score", "summary_trans"] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }
}
