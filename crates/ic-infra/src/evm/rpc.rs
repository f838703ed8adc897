//! JSON-RPC 2.0 client over HTTP.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RpcError {
    #[error("rpc transport error: {0}")]
    Transport(String),

    /// Error object returned by the endpoint.
    #[error("rpc error {code}: {message}")]
    Server {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// `timeout: None` waits as long as the endpoint does (wallet prompts).
    pub fn new(url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .with_context(|| format!("Failed to build JSON-RPC client for {url}"))?;

        Ok(Self {
            http,
            url: url.trim().to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        trace!(method, id, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        // Some endpoints carry the error object on a 4xx/5xx, so the body is
        // parsed before the status is judged.
        let status = response.status();
        let envelope: RpcEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(RpcError::InvalidResponse(e.to_string())),
            Err(_) => return Err(RpcError::Transport(format!("unexpected status: {status}"))),
        };

        if let Some(error) = envelope.error {
            return Err(RpcError::Server {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        serde_json::from_value(envelope.result.unwrap_or(Value::Null))
            .map_err(|e| RpcError::InvalidResponse(format!("{method}: {e}")))
    }
}

/// Parse a hex quantity such as `0x1b4`.
pub fn parse_quantity(text: &str) -> Result<u64, RpcError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("invalid quantity {text:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_quantities() {
        assert_eq!(parse_quantity("0x1b4").unwrap(), 436);
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert!(parse_quantity("0xnope").is_err());
    }

    #[tokio::test]
    async fn server_error_object_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#)
            .create_async()
            .await;

        let client = JsonRpcClient::new(&server.url(), Some(Duration::from_secs(5))).unwrap();
        let result: Result<String, _> = client.call("eth_nope", json!([])).await;

        mock.assert_async().await;
        assert_eq!(
            result,
            Err(RpcError::Server {
                code: -32601,
                message: "method not found".into(),
                data: None,
            })
        );
    }

    #[tokio::test]
    async fn null_result_deserializes_to_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":null}"#)
            .create_async()
            .await;

        let client = JsonRpcClient::new(&server.url(), None).unwrap();
        let result: Option<String> = client
            .call("eth_getTransactionReceipt", json!(["0x01"]))
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn non_json_error_status_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = JsonRpcClient::new(&server.url(), None).unwrap();
        let result: Result<String, _> = client.call("eth_blockNumber", json!([])).await;

        assert!(matches!(result, Err(RpcError::Transport(_))));
    }
}
