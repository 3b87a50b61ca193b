use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid country code: {0:?} (expected three ASCII letters)")]
    InvalidCountryCode(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
