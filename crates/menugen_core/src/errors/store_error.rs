use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not a valid folder path: {0}")]
    InvalidFolder(String),
    #[error("no asset at path: {0}")]
    MissingAsset(String),
    #[error("asset serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
