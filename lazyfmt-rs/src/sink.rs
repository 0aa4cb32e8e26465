//! Write destinations.
//!
//! Any [`std::fmt::Write`] is a sink.  This module adds a bounded,
//! stack-resident sink for allocation-free realization, and the counting sink
//! the padding code uses to measure a value before writing it.

use std::fmt;

// ── FixedBuf ──────────────────────────────────────────────────────────────────

/// A sink with a fixed capacity of `N` bytes, stored inline.
///
/// A write that does not fit is rejected whole with [`fmt::Error`]; the bytes
/// already accepted stay intact.
#[derive(Clone, Copy)]
pub struct FixedBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> FixedBuf<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// The text written so far.
    pub fn as_str(&self) -> &str {
        // Only whole `&str`s are ever copied in, so the prefix is valid UTF-8.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// Length in bytes.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub const fn remaining(&self) -> usize {
        N - self.len
    }

    /// Discard the contents, keeping the storage.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl<const N: usize> Default for FixedBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for FixedBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl<const N: usize> fmt::Display for FixedBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for FixedBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBuf")
            .field("text", &self.as_str())
            .field("capacity", &N)
            .finish()
    }
}

impl<const N: usize> PartialEq<str> for FixedBuf<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for FixedBuf<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// ── Measure ───────────────────────────────────────────────────────────────────

/// Counts the characters written to it and discards them.
#[derive(Debug, Default)]
pub(crate) struct Measure {
    chars: usize,
}

impl Measure {
    /// Number of characters `body` writes.
    pub(crate) fn chars_of(body: &dyn Fn(&mut dyn fmt::Write) -> fmt::Result) -> Result<usize, fmt::Error> {
        let mut m = Self::default();
        body(&mut m)?;
        Ok(m.chars)
    }
}

impl fmt::Write for Measure {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.chars += s.chars().count();
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
