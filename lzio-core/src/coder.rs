//! The coder contract.
//!
//! A coder is anything that consumes one byte stream and produces another:
//! a compressor, a decompressor, or a filter. [`Coder`] is the one shape
//! they all share, so implementations are interchangeable behind
//! `dyn Coder`. The capability traits are opt-in; a coder implements the
//! ones that make sense for it and callers discover support through the
//! type system rather than runtime probing.
//!
//! Configuration happens before coding: once [`Coder::code`] has started
//! consuming input, applying properties is unsupported and implementations
//! are free to ignore or reject it.

use std::io::{Read, Write};

use crate::error::Result;
use crate::props::CoderProperty;

/// Receiver for periodic throughput notifications during [`Coder::code`].
///
/// Either count may be `None` while the coder cannot yet attribute bytes
/// to that side of the operation.
pub trait CodeProgress {
    /// Called zero or more times as bytes move through the coder.
    fn report(&mut self, bytes_in: Option<u64>, bytes_out: Option<u64>);
}

impl<F> CodeProgress for F
where
    F: FnMut(Option<u64>, Option<u64>),
{
    fn report(&mut self, bytes_in: Option<u64>, bytes_out: Option<u64>) {
        self(bytes_in, bytes_out)
    }
}

/// A coding operation: consume `input`, produce `output`.
pub trait Coder {
    /// Run the coding operation to completion.
    ///
    /// `in_size` and `out_size` are advisory totals used for progress
    /// estimation and never for correctness; `None` means unknown. A hint
    /// that is nonsensical for the concrete algorithm is rejected as an
    /// invalid-argument error before any byte moves.
    ///
    /// Input that cannot be validly decoded fails with a data-corruption
    /// error; partial output is never reported as success. I/O failures
    /// from either stream propagate unchanged.
    fn code(
        &mut self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        in_size: Option<u64>,
        out_size: Option<u64>,
        progress: Option<&mut dyn CodeProgress>,
    ) -> Result<()>;
}

/// Configuration by typed properties.
pub trait SetCoderProperties {
    /// Apply `props` atomically: an unsupported tag or out-of-range value
    /// fails as an invalid-argument error and leaves the prior
    /// configuration unchanged.
    fn set_coder_properties(&mut self, props: &[CoderProperty]) -> Result<()>;
}

/// Serialization of the current configuration for a later decoder.
pub trait WriteCoderProperties {
    /// Write the property bytes a matching decoder will parse back via
    /// [`SetDecoderProperties`]. The layout is algorithm-specific; the
    /// producer and consumer of one coder implementation agree on it.
    fn write_coder_properties(&self, output: &mut dyn Write) -> Result<()>;
}

/// Reconstruction of configuration from serialized property bytes.
pub trait SetDecoderProperties {
    /// Parse property bytes as produced by [`WriteCoderProperties`].
    /// Malformed bytes fail as an invalid-argument error; defaults are
    /// never guessed.
    fn set_decoder_properties(&mut self, props: &[u8]) -> Result<()>;
}
