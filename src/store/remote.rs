use jiff::Timestamp;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{SyncError, SyncResult};
use crate::models::Post;

const MASTER_KEY_HEADER: &str = "X-Master-Key";

/// A single shared JSON document holding the whole timeline.
///
/// `replace` overwrites the entire document: there is no version token,
/// so concurrent writers race and the last one wins.
pub trait RemoteDocument {
    fn fetch(&self) -> SyncResult<Vec<Post>>;
    fn replace(&self, posts: &[Post]) -> SyncResult<()>;
}

#[derive(Deserialize)]
struct LatestResponse {
    #[serde(default)]
    record: Option<Record>,
}

#[derive(Deserialize)]
struct Record {
    #[serde(default)]
    tweets: Vec<Post>,
}

#[derive(Serialize)]
struct DocumentBody<'a> {
    tweets: &'a [Post],
    last_updated: String,
}

/// HTTP client for a JSONBin-style document store.
pub struct JsonBinClient {
    http: Client,
    base_url: String,
    bin_id: String,
    master_key: String,
}

impl JsonBinClient {
    pub fn new(
        base_url: impl Into<String>,
        bin_id: impl Into<String>,
        master_key: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bin_id: bin_id.into(),
            master_key: master_key.into(),
        }
    }

    /// Build a client when the config carries credentials; `None` otherwise.
    pub fn from_config(config: &RemoteConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        Some(Self::new(
            config.base_url.clone(),
            config.bin_id.clone(),
            config.master_key.clone(),
        ))
    }

    fn document_url(&self) -> String {
        format!("{}/b/{}", self.base_url, self.bin_id)
    }

    fn latest_url(&self) -> String {
        format!("{}/latest", self.document_url())
    }
}

impl RemoteDocument for JsonBinClient {
    fn fetch(&self) -> SyncResult<Vec<Post>> {
        let resp = self
            .http
            .get(self.latest_url())
            .header(MASTER_KEY_HEADER, &self.master_key)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::RemoteUnavailable(format!(
                "GET {} returned HTTP {}",
                self.latest_url(),
                status.as_u16()
            )));
        }

        let body = resp.text()?;
        let latest: LatestResponse = serde_json::from_str(&body)
            .map_err(|e| SyncError::RemoteUnavailable(format!("malformed document: {e}")))?;
        let posts = latest.record.map(|r| r.tweets).unwrap_or_default();
        debug!(count = posts.len(), "fetched remote posts");
        Ok(posts)
    }

    fn replace(&self, posts: &[Post]) -> SyncResult<()> {
        let body = DocumentBody {
            tweets: posts,
            last_updated: Timestamp::now().to_string(),
        };
        let resp = self
            .http
            .put(self.document_url())
            .header(MASTER_KEY_HEADER, &self.master_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::RemoteUnavailable(format!(
                "PUT {} returned HTTP {}",
                self.document_url(),
                status.as_u16()
            )));
        }
        debug!(count = posts.len(), "replaced remote document");
        Ok(())
    }
}
