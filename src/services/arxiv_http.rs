//! arXiv API client implementation using reqwest.

use reqwest::blocking::Client;
use url::Url;

use crate::domain::{AppError, ArxivApiConfig, Article};
use crate::ports::{PaperQuery, PaperSource};

use super::arxiv_atom::parse_feed;
use super::http::{
    RequestFailure, RetryPolicy, build_client, check_status, transport_failure, with_retries,
};

const SERVICE: &str = "arXiv";

/// HTTP client for the arXiv query API.
#[derive(Debug, Clone)]
pub struct HttpArxivClient {
    api_url: Url,
    retry: RetryPolicy,
    client: Client,
}

impl HttpArxivClient {
    pub fn new(config: &ArxivApiConfig) -> Result<Self, AppError> {
        Ok(Self {
            api_url: config.api_url.clone(),
            retry: RetryPolicy::new(config.max_retries, config.retry_delay_ms),
            client: build_client(SERVICE, config.timeout_secs)?,
        })
    }

    fn send_request(&self, query: &PaperQuery) -> Result<Vec<Article>, RequestFailure> {
        let max_results = query.max_results.to_string();
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[
                ("search_query", query.search.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .map_err(|e| transport_failure(SERVICE, e))?;

        let body = check_status(SERVICE, response)?
            .text()
            .map_err(|e| transport_failure(SERVICE, e))?;

        parse_feed(&body).map_err(RequestFailure::Fatal)
    }
}

impl PaperSource for HttpArxivClient {
    fn search(&self, query: &PaperQuery) -> Result<Vec<Article>, AppError> {
        tracing::debug!(search = %query.search, max_results = query.max_results, "querying arXiv");
        let articles = with_retries(SERVICE, &self.retry, || self.send_request(query))?;
        tracing::info!(count = articles.len(), "fetched arXiv entries");
        Ok(articles)
    }
}
