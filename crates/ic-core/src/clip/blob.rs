//! The clip record and its JSON blob form.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::code::ClipCode;
use crate::ids::WalletAddress;

/// A clip: the mapping a code stands for. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub code: ClipCode,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
    pub owner: Option<WalletAddress>,
}

impl Clip {
    /// Creation timestamp as written into the blob and the code seed,
    /// e.g. `2022-06-01T12:00:00.000Z`.
    pub fn created_at_iso(&self) -> String {
        iso_timestamp(&self.created_at)
    }

    pub fn to_blob(&self) -> ClipBlob {
        ClipBlob {
            url: self.source_url.clone(),
            code: Some(self.code.to_string()),
            created_at: Some(self.created_at_iso()),
            owner: self.owner.as_ref().map(|o| o.to_string()),
        }
    }
}

/// ISO-8601 UTC with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// JSON document pinned in the blob store.
///
/// Only `url` is required when reading: blobs written before codes were salted
/// carry no `createdAt`, anonymous clips carry no `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipBlob {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl ClipBlob {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
