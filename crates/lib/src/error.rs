use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load raw table")]
    LoadError(#[from] crate::parser::LoadError),
    #[error("Aggregation error")]
    AggregateError(#[from] crate::relative_cost::AggregateError),
    #[error("Cache error")]
    CacheError(#[from] crate::cache::CacheError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
