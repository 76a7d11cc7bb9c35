use std::sync::{Arc, Mutex};

use crate::domain::{AppError, Article};
use crate::ports::{PaperQuery, PaperSource};

#[derive(Clone, Default)]
pub struct FakePaperSource {
    pub articles: Vec<Article>,
    pub queries: Arc<Mutex<Vec<PaperQuery>>>,
    pub fail: bool,
}

impl FakePaperSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles, ..Default::default() }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn get_queries(&self) -> Vec<PaperQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl PaperSource for FakePaperSource {
    fn search(&self, query: &PaperQuery) -> Result<Vec<Article>, AppError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(AppError::http("arXiv", "connection refused"));
        }
        Ok(self.articles.clone())
    }
}
