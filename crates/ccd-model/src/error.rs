use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown domain name: {name}")]
    UnknownDomain { name: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
