//! Blocking HTTP client for the two upstream feeds.
//!
//! One request per call, fixed timeout, no retries: a failed fetch aborts the
//! invocation. Bodies are handed to the same parsers the file loaders use.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::info;

use fw_core::{AnsweringBodyMap, QuestionBlock};

use crate::bodies::parse_answering_bodies;
use crate::endpoints::FETCH_TIMEOUT_SECS;
use crate::feeds::parse_question_feed;
use crate::{IoError, IoResult};

pub struct FeedClient {
    client: Client,
    noq_base: String,
    bodies_uri: String,
}

impl FeedClient {
    /// `noq_base` gets the tabled date (`YYYY-MM-DD`) appended verbatim.
    pub fn with_endpoints(noq_base: impl Into<String>, bodies_uri: impl Into<String>) -> IoResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| IoError::Fetch { uri: "<client>".into(), msg: e.to_string() })?;
        Ok(Self { client, noq_base: noq_base.into(), bodies_uri: bodies_uri.into() })
    }

    pub fn notice_of_questions(&self, tabled: NaiveDate) -> IoResult<Vec<QuestionBlock>> {
        let uri = format!("{}{}", self.noq_base, tabled.format("%Y-%m-%d"));
        let body = self.get_json_text(&uri)?;
        let blocks = parse_question_feed(&body)?;
        info!(blocks = blocks.len(), "fetched notice of questions");
        Ok(blocks)
    }

    pub fn answering_bodies(&self) -> IoResult<AnsweringBodyMap> {
        let uri = self.bodies_uri.clone();
        let body = self.get_json_text(&uri)?;
        let map = parse_answering_bodies(&body)?;
        info!(bodies = map.len(), "fetched answering bodies");
        Ok(map)
    }

    fn get_json_text(&self, uri: &str) -> IoResult<String> {
        info!(uri = %uri, "fetching feed");
        let fetch_err = |msg: String| IoError::Fetch { uri: uri.to_owned(), msg };

        let resp = self
            .client
            .get(uri)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .map_err(|e| fetch_err(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(fetch_err(format!("server returned {}: {body}", status.as_u16())));
        }
        resp.text().map_err(|e| fetch_err(e.to_string()))
    }
}
