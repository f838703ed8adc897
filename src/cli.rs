//! Command-line surface.

use clap::Parser;
use std::path::PathBuf;

use ic_core::config::AppConfig;

/// Shorten a URL into a clip code, or resolve a clip code back to its URL.
///
/// Without INPUT, one submission is read per line from stdin.
#[derive(Debug, Parser)]
#[command(name = "interclip", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/interclip/config.toml)
    #[arg(long, value_name = "PATH", env = "INTERCLIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Wallet address recorded as clip owner
    #[arg(long, value_name = "ADDR", env = "INTERCLIP_WALLET")]
    pub wallet: Option<String>,

    /// Ledger node JSON-RPC endpoint
    #[arg(long, value_name = "URL", env = "INTERCLIP_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Signer JSON-RPC endpoint for the registry write
    #[arg(long, value_name = "URL", env = "INTERCLIP_SIGNER_URL")]
    pub signer_url: Option<String>,

    /// Copy the created code or resolved URL to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// URL to shorten or clip code to look up
    pub input: Option<String>,
}

impl Cli {
    /// Flags win over file values.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(wallet) = &self.wallet {
            config.wallet.address = wallet.trim().to_string();
        }
        if let Some(rpc_url) = &self.rpc_url {
            config.registry.rpc_url = rpc_url.clone();
        }
        if let Some(signer_url) = &self.signer_url {
            config.registry.signer_url = signer_url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "interclip",
            "--wallet",
            " 0xabc ",
            "--rpc-url",
            "http://localhost:8545",
            "--copy",
            "https://lenster.xyz",
        ])
        .unwrap();
        let mut config = AppConfig::with_defaults();

        cli.apply_overrides(&mut config);

        assert_eq!(config.wallet.address, "0xabc");
        assert_eq!(config.registry.rpc_url, "http://localhost:8545");
        assert_eq!(config.registry.signer_url(), "http://localhost:8545");
        assert!(cli.copy);
        assert_eq!(cli.input.as_deref(), Some("https://lenster.xyz"));
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::try_parse_from(["interclip", "--rpc-url", "http://node", "--signer-url", "http://wallet"]).unwrap();
        let mut config = AppConfig::with_defaults();

        cli.apply_overrides(&mut config);

        assert_eq!(config.wallet.address, "");
        assert_eq!(config.registry.signer_url(), "http://wallet");
        assert!(cli.input.is_none());
    }
}
