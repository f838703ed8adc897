//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and maps it into the `AppConfig` DTO. Pure data
//! loading: missing keys fall back to built-in defaults, nothing is validated
//! here. Adapters reject what they cannot use when they are constructed.
//!
//! 仅纯数据加载。

use anyhow::Context;
use ic_core::config::AppConfig;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "interclip";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value = toml::from_str(&content).context("Failed to parse config as TOML")?;
    Ok(AppConfig::from_toml(&toml_value))
}

/// `<config_dir>/interclip/config.toml`, e.g. `~/.config/interclip/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// An explicit path must exist; the default path may be absent, in which
/// case the built-in defaults apply.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading default config file");
            load_config(&path)
        }
        _ => {
            tracing::debug!("No config file, using built-in defaults");
            Ok(AppConfig::with_defaults())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ic_core::config::{DEFAULT_IPFS_GATEWAY_URL, DEFAULT_RPC_URL};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    /// Test that valid TOML is parsed correctly
    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_temp(
            r#"
            [ipfs]
            api_url = "http://localhost:5001"
            project_id = "id"
            project_secret = "secret"

            [registry]
            rpc_url = "http://localhost:8545"
            contract_address = "0x00000000000000000000000000000000000000aa"
            confirmations = 3

            [wallet]
            address = "0xabc"

            [clip]
            code_length = 6
        "#,
        );

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.ipfs.api_url, "http://localhost:5001");
        assert_eq!(config.ipfs.credentials(), Some(("id", "secret")));
        assert_eq!(config.registry.rpc_url, "http://localhost:8545");
        assert_eq!(config.registry.signer_url(), "http://localhost:8545");
        assert_eq!(config.registry.confirmations, 3);
        assert_eq!(config.wallet.address, "0xabc");
        assert_eq!(config.clip.code_length, 6);
    }

    /// Test that missing values fall back to defaults
    /// 测试缺失的值使用默认值
    #[test]
    fn test_load_config_uses_defaults_when_missing() {
        let temp_file = write_temp("[registry]\n");

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.ipfs.gateway_url, DEFAULT_IPFS_GATEWAY_URL);
        assert_eq!(config.registry.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.registry.contract_address, "");
        assert_eq!(config.wallet.address, "");
        assert_eq!(config.clip.code_length, 5);
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let temp_file = write_temp("[ipfs\napi_url = ");

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = resolve_config(Some(&missing)).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_default_config_path_is_under_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("interclip/config.toml"));
        }
    }
}
