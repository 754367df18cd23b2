// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] envconfig::Error),
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("failed to encode shipment document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
}
