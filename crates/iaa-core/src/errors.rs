//! Decode errors for schedule metadata and remote-data payloads.
//!
//! Neither error escapes the freshness coordinator: both are logged and the
//! affected schedule or payload is treated as absent.

use thiserror::Error;

/// Failure to resolve remote-data info from schedule metadata.
#[derive(Debug, Error)]
pub enum RemoteInfoError {
    /// Schedule has no metadata document
    #[error("schedule has no metadata")]
    MissingMetadata,
    /// Metadata is present but is not a JSON object
    #[error("schedule metadata is not an object")]
    MetadataNotObject,
    /// Metadata object has no remote-info entry
    #[error("metadata has no remote info entry")]
    MissingRemoteInfo,
    /// Remote-info entry could not be decoded
    #[error("failed to decode remote info: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteInfoError {
    /// Stable identifier for log correlation.
    pub fn code(&self) -> &'static str {
        match self {
            RemoteInfoError::MissingMetadata => "remote_info_missing_metadata",
            RemoteInfoError::MetadataNotObject => "remote_info_metadata_not_object",
            RemoteInfoError::MissingRemoteInfo => "remote_info_missing",
            RemoteInfoError::Decode(_) => "remote_info_decode",
        }
    }

    /// Whether this error means the info is absent rather than corrupt.
    pub fn is_absent(&self) -> bool {
        !matches!(self, RemoteInfoError::Decode(_))
    }
}

/// Failure to parse an in-app remote-data payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Payload data document did not match the expected shape
    #[error("failed to decode payload data: {0}")]
    Decode(#[from] serde_json::Error),
    /// Remote-data info could not be re-encoded into schedule metadata
    #[error("failed to encode remote info metadata: {0}")]
    MetadataEncode(String),
}

impl PayloadError {
    /// Stable identifier for log correlation.
    pub fn code(&self) -> &'static str {
        match self {
            PayloadError::Decode(_) => "payload_decode",
            PayloadError::MetadataEncode(_) => "payload_metadata_encode",
        }
    }
}
