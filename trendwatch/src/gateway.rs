//! Network gateway to the keyword-search backend.
//!
//! One `reqwest` client, one deadline, one error surface. Every request
//! carries a JSON content type and is raced against [`ApiClient::deadline`]
//! via `tokio::time::timeout`; losing the race drops the in-flight request
//! and yields [`GatewayError::Timeout`], which callers treat the same as any
//! transport failure. Exactly one underlying request is issued per call and
//! no retries happen here; a retry, if any, is the user pressing the key
//! again.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::domain::GatewayError;
use crate::payload::{entries_from, ComparisonPayload, KeywordEntry, StatusPayload};

/// Request body for keyword submission.
#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    keyword: &'a str,
}

/// HTTP client for the backend's search API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    deadline: Duration,
}

impl ApiClient {
    /// Build a client for `base_url` with a per-request deadline.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, deadline: Duration) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), deadline })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a keyword. The caller guarantees `keyword` is trimmed and
    /// non-empty; the response body is unused.
    ///
    /// # Errors
    /// Returns a [`GatewayError`] on timeout, transport failure, or
    /// non-success status.
    pub async fn submit_keyword(&self, keyword: &str) -> Result<(), GatewayError> {
        let req = self.http.post(self.url("/api/search")).json(&SubmitRequest { keyword });
        self.send(req.send()).await?;
        Ok(())
    }

    /// Fetch the server-ranked popular list.
    ///
    /// # Errors
    /// Returns a [`GatewayError`] on timeout, transport failure, or
    /// non-success status. A malformed body degrades to the empty list.
    pub async fn fetch_popular(&self) -> Result<Vec<KeywordEntry>, GatewayError> {
        let body = self.get_json("/api/search/popular").await?;
        Ok(entries_from(&body))
    }

    /// Fetch the server-side recent list.
    ///
    /// # Errors
    /// Same failure surface as [`Self::fetch_popular`].
    pub async fn fetch_recent(&self) -> Result<Vec<KeywordEntry>, GatewayError> {
        let body = self.get_json("/api/search/recent").await?;
        Ok(entries_from(&body))
    }

    /// Ask the backend to generate sample data. Response body unused.
    ///
    /// # Errors
    /// Returns a [`GatewayError`] on timeout, transport failure, or
    /// non-success status.
    pub async fn generate_sample_data(&self) -> Result<(), GatewayError> {
        self.send(self.http.post(self.url("/api/test/generate-data")).send()).await?;
        Ok(())
    }

    /// Ask the backend to clear its cache. Response body unused.
    ///
    /// # Errors
    /// Returns a [`GatewayError`] on timeout, transport failure, or
    /// non-success status.
    pub async fn clear_cache(&self) -> Result<(), GatewayError> {
        self.send(self.http.post(self.url("/api/test/clear-cache")).send()).await?;
        Ok(())
    }

    /// Fetch the backing-store status dump.
    ///
    /// # Errors
    /// Returns a [`GatewayError`] on timeout, transport failure, or
    /// non-success status. Malformed fields degrade to defaults.
    pub async fn fetch_status(&self) -> Result<StatusPayload, GatewayError> {
        let body = self.get_json("/api/search/debug/redis-status").await?;
        Ok(StatusPayload::from_value(&body))
    }

    /// Fetch the Redis-vs-DB latency comparison.
    ///
    /// # Errors
    /// Returns a [`GatewayError`] on timeout, transport failure, or
    /// non-success status. Malformed fields degrade to placeholders.
    pub async fn fetch_comparison(&self) -> Result<ComparisonPayload, GatewayError> {
        let body = self.get_json("/api/search/compare/redis-vs-db").await?;
        Ok(ComparisonPayload::from_value(&body))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json(&self, path: &str) -> Result<Value, GatewayError> {
        let res = self.send(self.http.get(self.url(path)).send()).await?;
        // An unreadable or non-JSON body is a malformed response, not a
        // failure; the caller's decoder defaults it away.
        Ok(res.json().await.unwrap_or(Value::Null))
    }

    /// Race one request against the deadline and map non-success statuses.
    async fn send(
        &self,
        fut: impl std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    ) -> Result<reqwest::Response, GatewayError> {
        let res = tokio::time::timeout(self.deadline, fut)
            .await
            .map_err(|_| GatewayError::Timeout(self.deadline))??;
        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else {
            Err(GatewayError::Status(status.as_u16()))
        }
    }
}
