use anyhow::Result;
use std::sync::Arc;
use v2_orderbook::{config::AppConfig, dex::UniswapV2Reserves, server, utils};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let config = AppConfig::from_env()?;
    tracing::info!(
        factory = ?config.factory_address,
        segments = config.default_segments.get(),
        cache_max_age_secs = config.cache_max_age_secs,
        "[INIT] v2-orderbook starting"
    );

    let reserves = UniswapV2Reserves::new(config.rpc_url.as_str(), config.factory_address)?;
    server::serve(&config, Arc::new(reserves)).await?;
    Ok(())
}
