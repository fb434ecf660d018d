//! Error types for the Asset Ledger core.

use thiserror::Error;

/// Core errors that can occur while building, encoding or decoding values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed hex or wrong byte length handed to a primitive type.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// A loosely-typed input record is missing a required field or has
    /// a field of the wrong shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Canonical bytes could not be decoded.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// A transaction type tag that no variant claims.
    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(u64),

    /// A 65-byte signature that does not carry valid ECDSA components.
    #[error("invalid signature")]
    InvalidSignature,
}

impl CoreError {
    pub(crate) fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

}

impl From<rlp::DecoderError> for CoreError {
    fn from(e: rlp::DecoderError) -> Self {
        CoreError::Decoding(e.to_string())
    }
}

impl From<hex::FromHexError> for CoreError {
    fn from(e: hex::FromHexError) -> Self {
        CoreError::Conversion(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
