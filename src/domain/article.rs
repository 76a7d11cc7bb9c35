//! arXiv paper metadata.

use serde::Serialize;

/// A paper as returned by the arXiv API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Article {
    /// Entry id, e.g. `http://arxiv.org/abs/2101.00001v1`.
    pub id: String,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    /// RFC3339 timestamp of the first version.
    pub published: String,
    /// RFC3339 timestamp of the latest version.
    pub updated: String,
    /// Abstract page link.
    pub arxiv_url: String,
    pub pdf_url: Option<String>,
    pub primary_category: Option<String>,
    pub categories: Vec<String>,
    pub comment: Option<String>,
    pub journal_ref: Option<String>,
    pub doi: Option<String>,
}

impl Article {
    /// Template-facing view of every field, flattened to single-line strings.
    ///
    /// Lists are joined with `", "` and newlines become spaces; absent optional
    /// fields render as empty strings so templates can reference them freely.
    pub fn template_fields(&self) -> Vec<(&'static str, String)> {
        let opt = |value: &Option<String>| value.as_deref().map(one_line).unwrap_or_default();
        vec![
            ("id", one_line(&self.id)),
            ("title", one_line(&self.title)),
            ("summary", one_line(&self.summary)),
            ("authors", join_list(&self.authors)),
            ("published", one_line(&self.published)),
            ("updated", one_line(&self.updated)),
            ("arxiv_url", one_line(&self.arxiv_url)),
            ("pdf_url", opt(&self.pdf_url)),
            ("primary_category", opt(&self.primary_category)),
            ("categories", join_list(&self.categories)),
            ("comment", opt(&self.comment)),
            ("journal_ref", opt(&self.journal_ref)),
            ("doi", opt(&self.doi)),
        ]
    }
}

pub(crate) fn one_line(text: &str) -> String {
    text.replace('\n', " ")
}

pub(crate) fn join_list(items: &[String]) -> String {
    items.iter().map(|item| one_line(item)).collect::<Vec<_>>().join(", ")
}
