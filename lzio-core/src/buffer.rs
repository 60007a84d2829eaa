//! Block-oriented buffered byte I/O.
//!
//! Coders pull input through a [`BlockReader`] and push output through a
//! [`BlockWriter`]. Both own a fixed buffer allocated once at construction
//! and count every byte that crosses them, which is what progress reporting
//! and container bookkeeping build on.
//!
//! The wrapped stream is held detachably: [`BlockReader::release`] and
//! [`BlockWriter::release`] hand the stream back without closing it, so the
//! stream's lifecycle always stays with the caller.
//!
//! # Example
//!
//! ```
//! use lzio_core::buffer::BlockReader;
//! use std::io::Cursor;
//!
//! let mut reader = BlockReader::with_capacity(4, Cursor::new(vec![1u8, 2, 3, 4, 5]));
//! let mut bytes = Vec::new();
//! while let Some(byte) = reader.read_byte()? {
//!     bytes.push(byte);
//! }
//! assert_eq!(bytes, [1, 2, 3, 4, 5]);
//! assert_eq!(reader.processed_bytes(), 5);
//! assert!(reader.is_exhausted());
//! # Ok::<(), lzio_core::LzioError>(())
//! ```

use std::io::{self, Read, Write};

use crate::error::Result;

/// A fixed-capacity buffered reader over any [`Read`] source.
///
/// Bytes are pulled from the source one buffer load at a time. A load that
/// delivers zero bytes marks the source exhausted, and every later call
/// reports end of data without touching the source again. A short load is
/// not exhaustion: the source is simply asked again on the next refill.
///
/// End of data is reported as `Ok(None)` from [`read_byte`] and queried
/// explicitly via [`is_exhausted`]; no byte value is ever reserved as a
/// sentinel.
///
/// [`read_byte`]: BlockReader::read_byte
/// [`is_exhausted`]: BlockReader::is_exhausted
#[derive(Debug)]
pub struct BlockReader<R: Read> {
    /// Detachable source stream.
    src: Option<R>,
    /// Fixed block buffer.
    buf: Box<[u8]>,
    /// Count of valid bytes in `buf`.
    limit: usize,
    /// Next unread offset in `buf`.
    pos: usize,
    /// Bytes handed to the caller from previous buffer loads.
    processed: u64,
    /// Set once the source has delivered an empty load.
    exhausted: bool,
}

impl<R: Read> BlockReader<R> {
    /// Create a reader with the given buffer capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize, src: R) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        Self {
            src: Some(src),
            buf: vec![0; capacity].into_boxed_slice(),
            limit: 0,
            pos: 0,
            processed: 0,
            exhausted: false,
        }
    }

    /// Rebind this reader to a new source, resetting all counters.
    ///
    /// A source still attached from a previous binding is dropped; use
    /// [`release`](BlockReader::release) first to get it back.
    pub fn attach(&mut self, src: R) {
        self.src = Some(src);
        self.limit = 0;
        self.pos = 0;
        self.processed = 0;
        self.exhausted = false;
    }

    /// Detach and return the source without closing it.
    ///
    /// Until [`attach`](BlockReader::attach) is called again, refills
    /// report end of data.
    pub fn release(&mut self) -> Option<R> {
        self.src.take()
    }

    /// Buffer capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Whether the source has delivered its final byte.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Total bytes handed to the caller over this binding's lifetime.
    pub fn processed_bytes(&self) -> u64 {
        self.processed + self.pos as u64
    }

    /// Pull the next block from the source.
    ///
    /// Returns `Ok(true)` if new bytes are buffered and `Ok(false)` on
    /// exhaustion. This is the only point where the source is read. Unread
    /// bytes of the current load are discarded, so callers drain the
    /// buffer before refilling ([`read_byte`](BlockReader::read_byte) does
    /// this automatically).
    pub fn refill(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        self.processed += self.pos as u64;
        self.pos = 0;
        self.limit = 0;

        let Some(src) = self.src.as_mut() else {
            self.exhausted = true;
            return Ok(false);
        };
        let delivered = loop {
            match src.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        self.limit = delivered;
        self.exhausted = delivered == 0;
        Ok(!self.exhausted)
    }

    /// Read one byte, refilling as needed.
    ///
    /// Returns `Ok(None)` once the source is exhausted; end of data is
    /// never encoded as a byte value.
    #[inline]
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        if self.pos == self.limit && !self.refill()? {
            return Ok(None);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    /// Consume and return the unread remainder of the current load.
    ///
    /// Returns an empty slice once the buffer is drained; call
    /// [`refill`](BlockReader::refill) to pull the next load. The returned
    /// bytes count as handed to the caller.
    pub fn take_buffered(&mut self) -> &[u8] {
        let block = &self.buf[self.pos..self.limit];
        self.pos = self.limit;
        block
    }
}

/// A fixed-capacity buffered writer over any [`Write`] sink.
///
/// Bytes accumulate in the buffer and are pushed to the sink one full
/// block at a time; [`flush`](BlockWriter::flush) pushes a partial block
/// and flushes the sink. Dropping the writer flushes on a best-effort
/// basis; call `flush` explicitly to observe write failures.
#[derive(Debug)]
pub struct BlockWriter<W: Write> {
    /// Detachable sink stream.
    dst: Option<W>,
    /// Fixed block buffer.
    buf: Box<[u8]>,
    /// Next unwritten offset in `buf`.
    pos: usize,
    /// Bytes pushed to the sink from previous buffer loads.
    processed: u64,
}

impl<W: Write> BlockWriter<W> {
    /// Create a writer with the given buffer capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize, dst: W) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        Self {
            dst: Some(dst),
            buf: vec![0; capacity].into_boxed_slice(),
            pos: 0,
            processed: 0,
        }
    }

    /// Rebind this writer to a new sink, resetting all counters.
    ///
    /// Bytes still buffered for the previous sink are discarded; call
    /// [`flush`](BlockWriter::flush) first to push them out.
    pub fn attach(&mut self, dst: W) {
        self.dst = Some(dst);
        self.pos = 0;
        self.processed = 0;
    }

    /// Detach and return the sink without flushing or closing it.
    ///
    /// Buffered bytes stay buffered; a detached writer fails with an I/O
    /// error once it next needs the sink.
    pub fn release(&mut self) -> Option<W> {
        self.dst.take()
    }

    /// Buffer capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Total bytes accepted over this binding's lifetime, including bytes
    /// still buffered.
    pub fn processed_bytes(&self) -> u64 {
        self.processed + self.pos as u64
    }

    /// Write one byte, pushing the block to the sink when full.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        if self.pos == self.buf.len() {
            // A previous push failed; retry before accepting more.
            self.flush_block()?;
        }
        self.buf[self.pos] = byte;
        self.pos += 1;
        if self.pos == self.buf.len() {
            self.flush_block()?;
        }
        Ok(())
    }

    /// Write a whole slice through the block buffer.
    pub fn write_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let room = self.buf.len() - self.pos;
            let count = room.min(data.len());
            self.buf[self.pos..self.pos + count].copy_from_slice(&data[..count]);
            self.pos += count;
            data = &data[count..];
            if self.pos == self.buf.len() {
                self.flush_block()?;
            }
        }
        Ok(())
    }

    /// Push buffered bytes to the sink and flush it.
    pub fn flush(&mut self) -> Result<()> {
        self.flush_block()?;
        if let Some(dst) = self.dst.as_mut() {
            dst.flush()?;
        }
        Ok(())
    }

    /// Push the buffered block to the sink.
    fn flush_block(&mut self) -> Result<()> {
        if self.pos == 0 {
            return Ok(());
        }
        let Some(dst) = self.dst.as_mut() else {
            return Err(io::Error::from(io::ErrorKind::NotConnected).into());
        };
        dst.write_all(&self.buf[..self.pos])?;
        self.processed += self.pos as u64;
        self.pos = 0;
        Ok(())
    }
}

impl<W: Write> Drop for BlockWriter<W> {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}
