use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("ledger store unreachable: {0}")]
    Connectivity(String),

    #[error("ledger error: {0}")]
    Data(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("migration action failed: {0}")]
    Action(String),

    #[error("ledger inconsistency: {0}")]
    Inconsistency(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
