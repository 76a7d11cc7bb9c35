//! Paper search port definition.

use crate::domain::{AppError, Article};

/// A search against the paper index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperQuery {
    /// Full search clause, including the submission-date restriction.
    pub search: String,
    pub max_results: u32,
}

/// Port for fetching papers.
pub trait PaperSource {
    /// Return papers matching `query`, newest submissions first.
    fn search(&self, query: &PaperQuery) -> Result<Vec<Article>, AppError>;
}
