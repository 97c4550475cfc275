//! Configuration loader and application settings.

use ethers::types::Address;
use std::{net::SocketAddr, num::NonZeroUsize, str::FromStr};
use url::Url;

use crate::errors::{AppError, Result};
use crate::orderbook::DEFAULT_SEGMENTS;

/// Uniswap V2 factory on Ethereum mainnet.
pub const DEFAULT_FACTORY_ADDRESS: &str = "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
/// Responses are point-in-time snapshots; clients may reuse them for 15 minutes.
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 60 * 15;
/// Upper bound for a per-request segment override.
pub const MAX_SEGMENTS: usize = 200;

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// RPC endpoint for the Ethereum-compatible node.
    pub rpc_url: Url,
    /// Uniswap V2 factory used to resolve pair addresses.
    pub factory_address: Address,
    pub listen_addr: SocketAddr,
    /// Segments per side when the request does not ask for a count.
    pub default_segments: NonZeroUsize,
    pub cache_max_age_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup("RPC_URL")
            .ok_or_else(|| AppError::Config("Set RPC_URL to your Ethereum node HTTP endpoint".into()))?;
        let rpc_url = Url::parse(&rpc_url)?;

        let factory_raw =
            lookup("FACTORY_ADDRESS").unwrap_or_else(|| DEFAULT_FACTORY_ADDRESS.into());
        let factory_address = Address::from_str(&factory_raw)
            .map_err(|e| AppError::Config(format!("FACTORY_ADDRESS {factory_raw:?}: {e}")))?;

        let listen_raw = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr = listen_raw
            .parse()
            .map_err(|e| AppError::Config(format!("LISTEN_ADDR {listen_raw:?}: {e}")))?;

        let default_segments = match lookup("ORDERBOOK_SEGMENTS") {
            Some(raw) => parse_segments(&raw)
                .map_err(|e| AppError::Config(format!("ORDERBOOK_SEGMENTS: {e}")))?,
            None => DEFAULT_SEGMENTS,
        };

        let cache_max_age_secs = match lookup("CACHE_MAX_AGE_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("CACHE_MAX_AGE_SECS {raw:?}: {e}")))?,
            None => DEFAULT_CACHE_MAX_AGE_SECS,
        };

        Ok(Self {
            rpc_url,
            factory_address,
            listen_addr,
            default_segments,
            cache_max_age_secs,
        })
    }
}

/// Parse a segment count in `1..=MAX_SEGMENTS`.
pub fn parse_segments(raw: &str) -> Result<NonZeroUsize> {
    let n: usize = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidSegments(format!("{raw:?} is not a positive integer")))?;
    match NonZeroUsize::new(n) {
        Some(n) if n.get() <= MAX_SEGMENTS => Ok(n),
        _ => Err(AppError::InvalidSegments(format!(
            "{n} is outside 1..={MAX_SEGMENTS}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_rpc_is_set() {
        let cfg = load(&[("RPC_URL", "http://localhost:8545")]).unwrap();
        assert_eq!(cfg.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(
            cfg.factory_address,
            DEFAULT_FACTORY_ADDRESS.parse::<Address>().unwrap()
        );
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.default_segments.get(), 20);
        assert_eq!(cfg.cache_max_age_secs, 900);
    }

    #[test]
    fn overrides_are_respected() {
        let cfg = load(&[
            ("RPC_URL", "https://eth.example.org/rpc"),
            ("LISTEN_ADDR", "127.0.0.1:3000"),
            ("ORDERBOOK_SEGMENTS", "50"),
            ("CACHE_MAX_AGE_SECS", "60"),
        ])
        .unwrap();
        assert_eq!(cfg.listen_addr.port(), 3000);
        assert_eq!(cfg.default_segments.get(), 50);
        assert_eq!(cfg.cache_max_age_secs, 60);
    }

    #[test]
    fn missing_rpc_url_is_a_config_error() {
        assert!(matches!(load(&[]), Err(AppError::Config(_))));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            load(&[("RPC_URL", "not a url")]),
            Err(AppError::UrlParse(_))
        ));
        assert!(matches!(
            load(&[("RPC_URL", "http://localhost:8545"), ("ORDERBOOK_SEGMENTS", "0")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            load(&[("RPC_URL", "http://localhost:8545"), ("FACTORY_ADDRESS", "0x12")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn segment_bounds() {
        assert_eq!(parse_segments("1").unwrap().get(), 1);
        assert_eq!(parse_segments(" 200 ").unwrap().get(), MAX_SEGMENTS);
        assert!(matches!(parse_segments("0"), Err(AppError::InvalidSegments(_))));
        assert!(matches!(parse_segments("201"), Err(AppError::InvalidSegments(_))));
        assert!(matches!(parse_segments("-3"), Err(AppError::InvalidSegments(_))));
        assert!(matches!(parse_segments("ten"), Err(AppError::InvalidSegments(_))));
    }
}
