use async_trait::async_trait;
use ethers::{
    contract::abigen,
    providers::{Http, Provider},
    types::Address,
};
use std::sync::Arc;
use tracing::debug;

use crate::dex::ReserveSource;
use crate::dex::state::{Reserves, scale_raw_amount};
use crate::errors::{AppError, Result};

abigen!(
    UniswapV2Factory,
    r"[
        function getPair(address tokenA, address tokenB) view returns (address pair)
    ]",
);

abigen!(
    UniswapV2Pair,
    r"[
        function getReserves() view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast)
        function token0() view returns (address)
    ]",
);

abigen!(
    Erc20,
    r"[
        function decimals() view returns (uint8)
    ]",
);

/// Reads pair reserves straight from a Uniswap V2 factory over JSON-RPC.
#[derive(Clone)]
pub struct UniswapV2Reserves {
    provider: Arc<Provider<Http>>,
    factory: UniswapV2Factory<Provider<Http>>,
}

impl UniswapV2Reserves {
    pub fn new(rpc_url: &str, factory_addr: Address) -> Result<Self> {
        let provider = Arc::new(
            Provider::<Http>::try_from(rpc_url)
                .map_err(|e| AppError::Config(format!("invalid RPC_URL: {e}")))?,
        );
        let factory = UniswapV2Factory::new(factory_addr, provider.clone());
        Ok(Self { provider, factory })
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        let erc20 = Erc20::new(token, self.provider.clone());
        Ok(erc20.decimals().call().await?)
    }
}

#[async_trait]
impl ReserveSource for UniswapV2Reserves {
    async fn fetch_reserves(&self, token_a: Address, token_b: Address) -> Result<Reserves> {
        let pair_addr = self.factory.get_pair(token_a, token_b).call().await?;
        if pair_addr.is_zero() {
            return Err(AppError::PairNotFound { token_a, token_b });
        }

        let pair = UniswapV2Pair::new(pair_addr, self.provider.clone());
        let reserves_call = pair.get_reserves();
        let token0_call = pair.token_0();
        let ((reserve0, reserve1, _block_ts), token0, decimals_a, decimals_b) = futures::try_join!(
            async { Ok::<_, AppError>(reserves_call.call().await?) },
            async { Ok::<_, AppError>(token0_call.call().await?) },
            self.token_decimals(token_a),
            self.token_decimals(token_b),
        )?;

        let a_is_token0 = token0 == token_a;
        let (decimals0, decimals1) = if a_is_token0 {
            (decimals_a, decimals_b)
        } else {
            (decimals_b, decimals_a)
        };

        let reserves = Reserves::from_pool_order(
            scale_raw_amount(reserve0.into(), decimals0)?,
            scale_raw_amount(reserve1.into(), decimals1)?,
            a_is_token0,
        );
        debug!(
            pair = ?pair_addr,
            reserve_a = %reserves.reserve_a,
            reserve_b = %reserves.reserve_b,
            "[DEX] reserves fetched"
        );
        Ok(reserves)
    }
}
