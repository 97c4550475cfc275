//! HTTP surface: `GET /v2/orderbook?pair=tokenA_tokenB`.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{num::NonZeroUsize, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    config::{AppConfig, parse_segments},
    dex::ReserveSource,
    errors::{AppError, Result},
    orderbook::{OrderBook, compute_order_book},
    pair::PairId,
    utils,
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub reserves: Arc<dyn ReserveSource>,
    pub default_segments: NonZeroUsize,
    pub cache_max_age_secs: u64,
}

impl AppState {
    pub fn new(reserves: Arc<dyn ReserveSource>, config: &AppConfig) -> Self {
        Self {
            reserves,
            default_segments: config.default_segments,
            cache_max_age_secs: config.cache_max_age_secs,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderBookQuery {
    pub pair: Option<String>,
    pub segments: Option<String>,
}

/// Body of a successful order book response.
#[derive(Debug, Serialize)]
pub struct OrderBookResponse {
    /// Epoch milliseconds at which the reserves were read.
    pub timestamp: u64,
    #[serde(flatten)]
    pub book: OrderBook,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v2/orderbook", get(get_orderbook))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.listen_addr` and serve until the process exits.
pub async fn serve(config: &AppConfig, reserves: Arc<dyn ReserveSource>) -> Result<()> {
    let app = router(AppState::new(reserves, config));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "[HTTP] listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_orderbook(
    State(state): State<AppState>,
    Query(query): Query<OrderBookQuery>,
) -> std::result::Result<Response, AppError> {
    match build_orderbook(&state, query).await {
        Ok(body) => {
            let cache = format!("public, max-age={}", state.cache_max_age_secs);
            Ok(([(header::CACHE_CONTROL, cache)], Json(body)).into_response())
        }
        Err(e) if e.is_client_error() => {
            warn!(error = %e, "[HTTP] rejected order book request");
            Err(e)
        }
        Err(e) => {
            error!(error = %e, "[HTTP] order book request failed");
            Err(e)
        }
    }
}

async fn build_orderbook(state: &AppState, query: OrderBookQuery) -> Result<OrderBookResponse> {
    let pair = PairId::parse(query.pair.as_deref().unwrap_or_default())?;
    let segments = match query.segments.as_deref() {
        Some(raw) => parse_segments(raw)?,
        None => state.default_segments,
    };

    let reserves = state
        .reserves
        .fetch_reserves(pair.token_a, pair.token_b)
        .await?;
    let timestamp = utils::now_millis();

    let book = compute_order_book(&reserves.reserve_a, &reserves.reserve_b, segments);
    info!(
        token_a = ?pair.token_a,
        token_b = ?pair.token_b,
        levels = book.bids.len(),
        "[HTTP] order book served"
    );
    Ok(OrderBookResponse { timestamp, book })
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
