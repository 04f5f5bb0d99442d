//! Mapping from domain errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::blockchain::BlockchainError;
use crate::storage::StorageError;

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    Blockchain(BlockchainError),
    Storage(StorageError),
    BadRequest(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Blockchain(e) => match e {
                BlockchainError::ClientNotFound { .. } => StatusCode::NOT_FOUND,
                BlockchainError::UnsupportedChain(_) | BlockchainError::InvalidArgument(_) => {
                    StatusCode::BAD_REQUEST
                }
                BlockchainError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                BlockchainError::Rpc(_) | BlockchainError::Decode(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Storage(StorageError::VersionConflict { .. }) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Blockchain(e) => match e {
                BlockchainError::ClientNotFound { .. } => "client_not_found",
                BlockchainError::UnsupportedChain(_) => "unsupported_chain",
                BlockchainError::InvalidArgument(_) => "invalid_argument",
                BlockchainError::Rpc(_) => "upstream_error",
                BlockchainError::Timeout(_) => "upstream_timeout",
                BlockchainError::Decode(_) => "upstream_decode_error",
            },
            Self::Storage(StorageError::VersionConflict { .. }) => "version_conflict",
            Self::BadRequest(_) => "bad_request",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Blockchain(e) => e.to_string(),
            Self::Storage(e) => e.to_string(),
            Self::BadRequest(message) => message.clone(),
        }
    }
}

impl From<BlockchainError> for ApiError {
    fn from(e: BlockchainError) -> Self {
        Self::Blockchain(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.kind(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::BlockchainType;
    use crate::storage::{CompositeKey, StorageType};

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(BlockchainError::ClientNotFound {
            chain: BlockchainType::Polygon,
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = ApiError::from(StorageError::VersionConflict {
            key: CompositeKey::new(StorageType::Global, "k"),
            version: 1,
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(conflict.kind(), "version_conflict");

        assert_eq!(
            ApiError::from(BlockchainError::Timeout(5)).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }
}
