//! IPFS HTTP API client implementing [`BlobStorePort`].
//!
//! Uploads go through the node/pinning API (`POST /api/v0/add`), reads go
//! through a public gateway (`GET /ipfs/{cid}`), which is how the blob is
//! normally resolved by anyone holding the CID.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use ic_core::clip::ClipBlob;
use ic_core::config::IpfsConfig;
use ic_core::ids::ContentId;
use ic_core::ports::{BlobStoreError, BlobStorePort};

#[derive(Debug, Clone)]
pub struct IpfsClientConfig {
    pub api_url: String,
    pub gateway_url: String,
    /// HTTP basic auth (project id, project secret).
    pub credentials: Option<(String, String)>,
    pub timeout: Duration,
}

impl From<&IpfsConfig> for IpfsClientConfig {
    fn from(config: &IpfsConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            gateway_url: config.gateway_url.clone(),
            credentials: config
                .credentials()
                .map(|(id, secret)| (id.to_string(), secret.to_string())),
            timeout: config.timeout(),
        }
    }
}

/// One line of the `add` response. The API streams NDJSON, one object per
/// added entry; a single file yields a single line.
#[derive(Debug, Deserialize)]
struct AddEntry {
    #[serde(rename = "Hash")]
    hash: String,
}

pub struct IpfsHttpBlobStore {
    http: reqwest::Client,
    api_url: String,
    gateway_url: String,
    credentials: Option<(String, String)>,
}

impl IpfsHttpBlobStore {
    pub fn new(config: IpfsClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build IPFS HTTP client")?;

        Ok(Self {
            http,
            api_url: trim_base(&config.api_url),
            gateway_url: trim_base(&config.gateway_url),
            credentials: config.credentials,
        })
    }

    fn add_url(&self) -> String {
        format!("{}/api/v0/add", self.api_url)
    }

    fn gateway_path(&self, cid: &ContentId) -> String {
        format!("{}/ipfs/{}", self.gateway_url, cid)
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Pick the CID out of an NDJSON `add` response (last entry wins).
fn parse_add_response(body: &str) -> Result<ContentId, BlobStoreError> {
    let line = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .ok_or_else(|| BlobStoreError::StoreUnavailable("empty add response".to_string()))?;

    let entry: AddEntry = serde_json::from_str(line)
        .map_err(|e| BlobStoreError::StoreUnavailable(format!("invalid add response: {e}")))?;

    Ok(ContentId::from_string(entry.hash))
}

#[async_trait]
impl BlobStorePort for IpfsHttpBlobStore {
    #[tracing::instrument(name = "infra.ipfs.upload", skip_all, fields(url = %blob.url))]
    async fn upload(&self, blob: &ClipBlob) -> Result<ContentId, BlobStoreError> {
        let body = blob
            .to_json()
            .map_err(|e| BlobStoreError::StoreUnavailable(format!("failed to serialize blob: {e}")))?;

        let part = Part::text(body)
            .file_name("clip.json")
            .mime_str("application/json")
            .map_err(|e| BlobStoreError::StoreUnavailable(e.to_string()))?;
        let form = Form::new().part("file", part);

        let mut request = self.http.post(self.add_url()).multipart(form);
        if let Some((id, secret)) = &self.credentials {
            request = request.basic_auth(id, Some(secret));
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "IPFS add request failed");
            BlobStoreError::StoreUnavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "IPFS add returned non-success status");
            return Err(BlobStoreError::StoreUnavailable(format!(
                "unexpected status: {status}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| BlobStoreError::StoreUnavailable(e.to_string()))?;
        let cid = parse_add_response(&text)?;

        info!(cid = %cid, "Pinned clip blob");
        Ok(cid)
    }

    #[tracing::instrument(name = "infra.ipfs.fetch", skip(self), fields(cid = %cid))]
    async fn fetch(&self, cid: &ContentId) -> Result<ClipBlob, BlobStoreError> {
        let response = self
            .http
            .get(self.gateway_path(cid))
            .send()
            .await
            .map_err(|e| BlobStoreError::NotFound(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlobStoreError::NotFound(format!("unexpected status: {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BlobStoreError::NotFound(e.to_string()))?;
        debug!(len = bytes.len(), "Fetched clip blob");

        ClipBlob::from_json(&bytes).map_err(|e| BlobStoreError::MalformedBlob(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_response_takes_last_entry() {
        let body = "{\"Name\":\"a\",\"Hash\":\"QmFirst\"}\n{\"Name\":\"b\",\"Hash\":\"QmLast\"}\n";
        assert_eq!(parse_add_response(body).unwrap(), ContentId::from("QmLast"));
    }

    #[test]
    fn add_response_without_hash_is_store_error() {
        assert!(matches!(
            parse_add_response("{\"Name\":\"a\"}"),
            Err(BlobStoreError::StoreUnavailable(_))
        ));
        assert!(matches!(
            parse_add_response("\n"),
            Err(BlobStoreError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn base_urls_drop_trailing_slash() {
        let store = IpfsHttpBlobStore::new(IpfsClientConfig {
            api_url: "http://127.0.0.1:5001/".into(),
            gateway_url: "https://ipfs.io/".into(),
            credentials: None,
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(store.add_url(), "http://127.0.0.1:5001/api/v0/add");
        assert_eq!(
            store.gateway_path(&ContentId::from("QmX")),
            "https://ipfs.io/ipfs/QmX"
        );
    }
}
