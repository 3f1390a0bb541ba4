//! Application-wide error types.
//!
//! Only startup and serving paths return [`AppError`]. Provider failures at
//! request time are folded into display strings by the invoker and never
//! surface here.

use thiserror::Error;

use crate::llm::ProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}
