use thiserror::Error;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] JsonError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Completion failed: {0}")]
    Completion(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
