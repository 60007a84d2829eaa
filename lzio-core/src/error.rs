//! Error types for codec I/O operations.
//!
//! Every fallible operation in this crate returns [`Result`]. Variants keep
//! structured context for diagnostics, and [`LzioError::kind`] collapses
//! them into the three classes callers dispatch on: passthrough I/O,
//! corrupted input, and invalid configuration.

use std::io;

use thiserror::Error;

use crate::props::PropertyId;

/// Broad classification of a [`LzioError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Failure reported by the underlying stream, passed through unchanged.
    Io,
    /// The input could not be validly decoded.
    DataCorruption,
    /// A caller-supplied size, property, or property byte sequence is
    /// outside the accepted domain.
    InvalidArgument,
}

/// The main error type for codec I/O operations.
#[derive(Debug, Error)]
pub enum LzioError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CRC checksum mismatch.
    #[error("CRC mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        /// Expected CRC value from the container.
        expected: u32,
        /// Computed CRC value from the data.
        computed: u32,
    },

    /// Corrupted data in the input stream.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// The input stream ended before the format said it would.
    #[error("Truncated stream: expected {expected} more bytes")]
    TruncatedStream {
        /// Number of bytes still expected when the stream ended.
        expected: u64,
    },

    /// A property tag this coder does not accept.
    #[error("Unsupported coder property: {id}")]
    UnsupportedProperty {
        /// The rejected property tag.
        id: PropertyId,
    },

    /// A supported property tag carrying an out-of-range value.
    #[error("Invalid value for coder property {id}: {message}")]
    InvalidProperty {
        /// The property tag the value was supplied for.
        id: PropertyId,
        /// Description of the rejected value.
        message: String,
    },

    /// A caller-supplied argument outside the accepted domain.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },
}

/// Result type alias for codec I/O operations.
pub type Result<T> = std::result::Result<T, LzioError>;

impl LzioError {
    /// Classify this error into the failure kind callers dispatch on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::CrcMismatch { .. } | Self::CorruptedData { .. } | Self::TruncatedStream { .. } => {
                ErrorKind::DataCorruption
            }
            Self::UnsupportedProperty { .. }
            | Self::InvalidProperty { .. }
            | Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(expected: u64) -> Self {
        Self::TruncatedStream { expected }
    }

    /// Create an unsupported property error.
    pub fn unsupported_property(id: PropertyId) -> Self {
        Self::UnsupportedProperty { id }
    }

    /// Create an invalid property error.
    pub fn invalid_property(id: PropertyId, message: impl Into<String>) -> Self {
        Self::InvalidProperty {
            id,
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LzioError::crc_mismatch(0x12345678, 0xDEADBEEF);
        assert!(err.to_string().contains("CRC mismatch"));
        assert!(err.to_string().contains("0x12345678"));

        let err = LzioError::corrupted(42, "range coder underflow");
        assert!(err.to_string().contains("offset 42"));

        let err = LzioError::unsupported_property(PropertyId::NumThreads);
        assert!(err.to_string().contains("num-threads"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            LzioError::crc_mismatch(1, 2).kind(),
            ErrorKind::DataCorruption
        );
        assert_eq!(LzioError::corrupted(0, "x").kind(), ErrorKind::DataCorruption);
        assert_eq!(LzioError::truncated(9).kind(), ErrorKind::DataCorruption);
        assert_eq!(
            LzioError::unsupported_property(PropertyId::Order).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            LzioError::invalid_property(PropertyId::DictionarySize, "too small").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            LzioError::invalid_argument("bad size hint").kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LzioError = io_err.into();
        assert!(matches!(err, LzioError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
