//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic or policies / 禁止任何业务逻辑或策略**
//! ❌ **No validation logic / 禁止验证逻辑**
//!
//! Missing keys fall back to the built-in defaults below; present keys are
//! taken as facts, even when they look wrong.

use std::time::Duration;

pub const DEFAULT_IPFS_API_URL: &str = "https://ipfs.infura.io:5001";
pub const DEFAULT_IPFS_GATEWAY_URL: &str = "https://ipfs.io";
pub const DEFAULT_RPC_URL: &str = "https://polygon-rpc.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONFIRMATIONS: u64 = 1;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub ipfs: IpfsConfig,
    pub registry: RegistryConfig,
    pub wallet: WalletConfig,
    pub clip: ClipConfig,
}

/// Blob store endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpfsConfig {
    /// IPFS HTTP API base (the `/api/v0/add` host).
    pub api_url: String,
    /// Gateway base used for `GET /ipfs/{cid}`.
    pub gateway_url: String,
    /// Basic-auth user for pinning services such as Infura (empty = no auth).
    pub project_id: String,
    pub project_secret: String,
    pub timeout_secs: u64,
}

/// Registry contract endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// JSON-RPC node used for reads and receipts.
    pub rpc_url: String,
    /// Wallet JSON-RPC endpoint that signs `eth_sendTransaction` (empty = `rpc_url`).
    pub signer_url: String,
    pub contract_address: String,
    pub confirmations: u64,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Connected wallet address (empty = anonymous).
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipConfig {
    pub code_length: usize,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> Self {
        let string = |section: &str, key: &str, default: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or(default)
                .to_string()
        };
        let integer = |section: &str, key: &str, default: u64| -> u64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(default)
        };

        Self {
            ipfs: IpfsConfig {
                api_url: string("ipfs", "api_url", DEFAULT_IPFS_API_URL),
                gateway_url: string("ipfs", "gateway_url", DEFAULT_IPFS_GATEWAY_URL),
                project_id: string("ipfs", "project_id", ""),
                project_secret: string("ipfs", "project_secret", ""),
                timeout_secs: integer("ipfs", "timeout_secs", DEFAULT_TIMEOUT_SECS),
            },
            registry: RegistryConfig {
                rpc_url: string("registry", "rpc_url", DEFAULT_RPC_URL),
                signer_url: string("registry", "signer_url", ""),
                contract_address: string("registry", "contract_address", ""),
                confirmations: integer("registry", "confirmations", DEFAULT_CONFIRMATIONS),
                poll_interval_ms: integer("registry", "poll_interval_ms", DEFAULT_POLL_INTERVAL_MS),
            },
            wallet: WalletConfig {
                address: string("wallet", "address", ""),
            },
            clip: ClipConfig {
                code_length: integer("clip", "code_length", crate::clip::CODE_LENGTH as u64) as usize,
            },
        }
    }

    /// Built-in defaults, used when no config file exists.
    pub fn with_defaults() -> Self {
        Self::from_toml(&toml::Value::Table(Default::default()))
    }
}

impl IpfsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Basic-auth credentials, when a project id is configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.project_id.is_empty() {
            None
        } else {
            Some((self.project_id.as_str(), self.project_secret.as_str()))
        }
    }
}

impl RegistryConfig {
    pub fn signer_url(&self) -> &str {
        if self.signer_url.is_empty() {
            &self.rpc_url
        } else {
            &self.signer_url
        }
    }

    /// Never zero, so polling loops always yield between requests.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_uses_defaults_when_missing() {
        let toml_value: Value = toml::from_str("[ipfs]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value);

        assert_eq!(config.ipfs.api_url, DEFAULT_IPFS_API_URL);
        assert_eq!(config.registry.confirmations, 1);
        assert_eq!(config.clip.code_length, 5);
        assert_eq!(config.wallet.address, "");
    }

    #[test]
    fn test_from_toml_parses_present_values() {
        let toml_str = r#"
            [ipfs]
            api_url = "http://127.0.0.1:5001"
            project_id = "pid"
            project_secret = "secret"

            [registry]
            rpc_url = "http://127.0.0.1:8545"
            contract_address = "0x00000000000000000000000000000000000000aa"
            confirmations = 3

            [wallet]
            address = "0xabc"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value);

        assert_eq!(config.ipfs.api_url, "http://127.0.0.1:5001");
        assert_eq!(config.ipfs.credentials(), Some(("pid", "secret")));
        assert_eq!(config.registry.confirmations, 3);
        assert_eq!(config.registry.signer_url(), "http://127.0.0.1:8545");
        assert_eq!(config.wallet.address, "0xabc");
    }

    #[test]
    fn test_signer_url_overrides_rpc_url_when_set() {
        let toml_value: Value = toml::from_str(
            r#"
            [registry]
            rpc_url = "http://node"
            signer_url = "http://127.0.0.1:1248"
        "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&toml_value);

        assert_eq!(config.registry.signer_url(), "http://127.0.0.1:1248");
    }

    #[test]
    fn test_with_defaults_has_no_credentials() {
        let config = AppConfig::with_defaults();
        assert_eq!(config.ipfs.credentials(), None);
        assert_eq!(config.registry.poll_interval(), Duration::from_millis(2000));
    }

    #[test]
    fn test_negative_integers_fall_back_to_defaults() {
        let toml_value: Value = toml::from_str(
            r#"
            [registry]
            confirmations = -1
            poll_interval_ms = -5
        "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&toml_value);

        assert_eq!(config.registry.confirmations, DEFAULT_CONFIRMATIONS);
        assert_eq!(config.registry.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_zero_poll_interval_is_floored() {
        let toml_value: Value = toml::from_str("[registry]\npoll_interval_ms = 0\n").unwrap();

        let config = AppConfig::from_toml(&toml_value);

        assert_eq!(config.registry.poll_interval(), Duration::from_millis(1));
    }
}
