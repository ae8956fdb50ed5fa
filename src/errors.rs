use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use ethers::providers::ProviderError;
use serde::Serialize;
use thiserror::Error;

use crate::models::api_response::ApiResponse;

#[derive(Error, Debug)]
pub enum CustomError {
    #[error("Insufficient funds")]
    InsufficientFundsError,

    #[error("Invalid address: {0}")]
    InvalidAddressError(String),

    #[error("Invalid amount: {0}")]
    InvalidAmountError(String),

    #[error("Invalid precision: {0} decimals")]
    InvalidPrecisionError(u32),

    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("Provider error: {0}")]
    StringifiedProviderError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChainError(u64),
}

// Custom Error type
#[derive(Debug, Serialize)]
pub struct ApiError {
    code: u16,
    message: String,
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::InsufficientFundsError => StatusCode::BAD_REQUEST,
            CustomError::InvalidAddressError(_) => StatusCode::BAD_REQUEST,
            CustomError::InvalidAmountError(_) => StatusCode::BAD_REQUEST,
            CustomError::InvalidPrecisionError(_) => StatusCode::BAD_REQUEST,
            CustomError::UnsupportedChainError(_) => StatusCode::BAD_REQUEST,
            CustomError::ProviderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::StringifiedProviderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::ContractError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::NetworkError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let api_error = ApiError {
            code: status.as_u16(),
            message: self.to_string(),
        };

        let response = ApiResponse {
            status: "FAILURE".to_string(),
            code: api_error.code,
            result: None::<()>,
            error: Some(api_error),
        };

        HttpResponse::build(status).json(response)
    }
}
