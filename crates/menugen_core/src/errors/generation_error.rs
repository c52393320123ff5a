use thiserror::Error;

use super::StoreError;

/// Fatal faults of a generation run. Configuration inconsistencies (such as
/// requesting an unsupported parameter kind) are deliberately not in here;
/// those surface as absent handles, not errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("avatar has no FX controller in its base animation layers")]
    MissingFxController,
    #[error("avatar has no expression parameter table")]
    MissingParameterTable,
    #[error("asset store error: {0}")]
    Store(#[from] StoreError),
    #[error("hook '{hook}' failed: {message}")]
    Hook { hook: String, message: String },
    #[error("failed to serialize remoting descriptor: {0}")]
    Remoting(#[from] serde_json::Error),
}
