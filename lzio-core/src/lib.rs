//! # lzio-core
//!
//! Streaming I/O substrate for LZMA-family codecs.
//!
//! This crate does not compress anything. It provides the plumbing every
//! coder implementation depends on:
//!
//! - [`buffer`]: block-oriented buffered input and output with
//!   processed-byte accounting
//! - [`crc`]: table-driven CRC-32 integrity checking
//! - [`coder`]: the coder contract and its optional capability traits
//! - [`props`]: typed coder properties and validated settings
//! - [`copy`]: the stored (pass-through) coder
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Algorithm crates                                        │
//! │     LZMA-family encoders/decoders (match finders,       │
//! │     range coders), external to this crate               │
//! ├─────────────────────────────────────────────────────────┤
//! │ Contract                                                │
//! │     Coder + capability traits, typed properties,        │
//! │     progress reporting                                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Substrate (this crate)                                  │
//! │     BlockReader/BlockWriter, Crc32, error taxonomy      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is synchronous and single-threaded. Instances are
//! per-operation state and never shared; the one piece of process-wide
//! state, the CRC lookup table, is a compile-time constant and safe to
//! read from any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use lzio_core::buffer::BlockReader;
//! use lzio_core::crc::Crc32;
//! use std::io::Cursor;
//!
//! let mut reader = BlockReader::with_capacity(4, Cursor::new(b"stream".to_vec()));
//! let mut crc = Crc32::new();
//! while let Some(byte) = reader.read_byte()? {
//!     crc.update_byte(byte);
//! }
//! assert_eq!(reader.processed_bytes(), 6);
//! assert_eq!(crc.value(), Crc32::compute(b"stream"));
//! # Ok::<(), lzio_core::LzioError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod buffer;
pub mod coder;
pub mod copy;
pub mod crc;
pub mod error;
pub mod props;

// Re-exports for convenience
pub use buffer::{BlockReader, BlockWriter};
pub use coder::{
    CodeProgress, Coder, SetCoderProperties, SetDecoderProperties, WriteCoderProperties,
};
pub use copy::CopyCoder;
pub use crc::Crc32;
pub use error::{ErrorKind, LzioError, Result};
pub use props::{CoderProperty, CoderSettings, MatchFinder, PropertyId};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::buffer::{BlockReader, BlockWriter};
    pub use crate::coder::{
        CodeProgress, Coder, SetCoderProperties, SetDecoderProperties, WriteCoderProperties,
    };
    pub use crate::copy::CopyCoder;
    pub use crate::crc::Crc32;
    pub use crate::error::{ErrorKind, LzioError, Result};
    pub use crate::props::{CoderProperty, CoderSettings, MatchFinder, PropertyId};
}
