// src/error.rs
// Reasons a console line yields no usable update

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("line does not carry the update marker")]
    MissingMarker,
    #[error("no payload object follows the marker")]
    MissingPayload,
    #[error("payload braces never balance")]
    UnbalancedPayload,
    #[error("payload is not valid JSON after normalization: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("payload carries no action field")]
    MissingAction,
}
