use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ethers::types::Address;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid pair identifier: must be of format tokenAddress_tokenAddress")]
    InvalidPair,

    #[error("Invalid token address: {0}")]
    InvalidAddress(String),

    #[error("Invalid segment count: {0}")]
    InvalidSegments(String),

    #[error("No pair found for tokens {token_a:?} and {token_b:?}")]
    PairNotFound { token_a: Address, token_b: Address },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Contract error: {0}")]
    Contract(
        #[from]
        ethers::contract::ContractError<ethers::providers::Provider<ethers::providers::Http>>,
    ),

    #[error("Other: {0}")]
    Other(String),
}

impl AppError {
    /// Client mistakes map to 400, everything the server could not do maps to 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPair | AppError::InvalidAddress(_) | AppError::InvalidSegments(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(AppError::InvalidPair.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidAddress("0xabc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidSegments("0".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_errors_are_server_errors() {
        let err = AppError::PairNotFound {
            token_a: Address::zero(),
            token_b: Address::repeat_byte(0x11),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_client_error());
        assert_eq!(
            AppError::Other("node unreachable".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
