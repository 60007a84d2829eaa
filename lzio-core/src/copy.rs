//! Stored (pass-through) coding.
//!
//! The stored coder moves bytes from input to output unchanged. It is the
//! simplest complete [`Coder`] and the reference for how implementations
//! are expected to drive [`BlockReader`], [`BlockWriter`], and progress
//! reporting together.

use std::io::{Read, Write};

use crate::buffer::{BlockReader, BlockWriter};
use crate::coder::{CodeProgress, Coder};
use crate::error::{LzioError, Result};

/// Default transfer block size (64 KiB).
const DEFAULT_BLOCK_SIZE: usize = 1 << 16;

/// A coder that copies input to output unchanged.
///
/// When `in_size` is given, at most that many bytes are consumed from the
/// input; the stored coder otherwise runs until the input is exhausted.
/// It accepts no properties.
#[derive(Debug, Clone)]
pub struct CopyCoder {
    block_size: usize,
}

impl CopyCoder {
    /// Create a copy coder with the default transfer block size.
    pub fn new() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Create a copy coder with a custom transfer block size.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    pub fn with_block_size(block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be greater than 0");
        Self { block_size }
    }
}

impl Default for CopyCoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Coder for CopyCoder {
    fn code(
        &mut self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        in_size: Option<u64>,
        out_size: Option<u64>,
        mut progress: Option<&mut dyn CodeProgress>,
    ) -> Result<()> {
        if let (Some(in_size), Some(out_size)) = (in_size, out_size) {
            if in_size != out_size {
                return Err(LzioError::invalid_argument(format!(
                    "stored coder cannot turn {in_size} input bytes into {out_size} output bytes"
                )));
            }
        }

        let mut reader = BlockReader::with_capacity(self.block_size, input);
        let mut writer = BlockWriter::with_capacity(self.block_size, output);
        let mut copied: u64 = 0;

        loop {
            if in_size.is_some_and(|limit| copied == limit) {
                break;
            }
            if !reader.refill()? {
                break;
            }
            let mut block = reader.take_buffered();
            if let Some(limit) = in_size {
                // Remaining quota is nonzero here and bounds the block.
                let take = usize::try_from(limit - copied)
                    .map(|remaining| remaining.min(block.len()))
                    .unwrap_or(block.len());
                block = &block[..take];
            }
            writer.write_all(block)?;
            copied += block.len() as u64;
            if let Some(progress) = progress.as_mut() {
                progress.report(Some(copied), Some(writer.processed_bytes()));
            }
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_copy_across_refills() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).map(|b| b as u8).collect();
        let mut coder = CopyCoder::with_block_size(64);
        let mut output = Vec::new();

        coder
            .code(&mut data.as_slice(), &mut output, None, None, None)
            .unwrap();
        assert_eq!(output, data);
    }

    #[test]
    fn test_copy_honors_in_size_limit() {
        let data = b"0123456789";
        let mut coder = CopyCoder::with_block_size(4);
        let mut output = Vec::new();

        coder
            .code(&mut &data[..], &mut output, Some(7), None, None)
            .unwrap();
        assert_eq!(output, b"0123456");
    }

    #[test]
    fn test_copy_reports_progress() {
        let data = vec![0x55u8; 10];
        let mut coder = CopyCoder::with_block_size(4);
        let mut output = Vec::new();
        let mut events: Vec<(Option<u64>, Option<u64>)> = Vec::new();
        let mut record = |bytes_in: Option<u64>, bytes_out: Option<u64>| {
            events.push((bytes_in, bytes_out));
        };

        coder
            .code(
                &mut data.as_slice(),
                &mut output,
                Some(10),
                Some(10),
                Some(&mut record),
            )
            .unwrap();

        assert_eq!(output, data);
        assert_eq!(events.len(), 3);
        assert_eq!(events.last(), Some(&(Some(10), Some(10))));
        // Input counts are monotonically non-decreasing.
        for pair in events.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
    }

    #[test]
    fn test_copy_rejects_contradictory_hints() {
        let mut coder = CopyCoder::new();
        let mut output = Vec::new();

        let err = coder
            .code(&mut &b"abc"[..], &mut output, Some(3), Some(4), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(output.is_empty(), "no bytes may move after a rejected hint");
    }

    #[test]
    fn test_copy_empty_input() {
        let mut coder = CopyCoder::new();
        let mut output = Vec::new();
        coder
            .code(&mut &b""[..], &mut output, None, None, None)
            .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_through_dyn_coder() {
        let mut coder: Box<dyn Coder> = Box::new(CopyCoder::with_block_size(8));
        let mut output = Vec::new();
        coder
            .code(&mut &b"boxed coder"[..], &mut output, None, None, None)
            .unwrap();
        assert_eq!(output, b"boxed coder");
    }
}
