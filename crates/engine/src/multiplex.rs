//! Fan-out of one byte stream into several exact-digest accumulators.
//!
//! One forward pass over a file updates every algorithm at once; the
//! file is never re-read for the exact side.

use std::io;

use digest::Digest;

/// Anything that accepts a stream of byte chunks.
pub trait ByteSink {
    /// Consume one chunk. A sink that cannot take the whole chunk must
    /// fail; partial consumption is never reported as success.
    fn consume(&mut self, chunk: &[u8]) -> io::Result<()>;
}

/// One digest algorithm accumulating streamed bytes.
pub trait Accumulator {
    /// Feed a chunk, returning how many bytes were accepted.
    fn consume(&mut self, chunk: &[u8]) -> usize;
    /// Finalize into the raw digest bytes.
    fn finish(self: Box<Self>) -> Vec<u8>;
}

struct CryptoAccumulator<D: Digest>(D);

impl<D: Digest> Accumulator for CryptoAccumulator<D> {
    fn consume(&mut self, chunk: &[u8]) -> usize {
        self.0.update(chunk);
        chunk.len()
    }

    fn finish(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

/// The exact-digest algorithms a fingerprint carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl DigestKind {
    /// The standard fingerprint set, in record order.
    pub const STANDARD: [DigestKind; 4] = [
        DigestKind::Md5,
        DigestKind::Sha1,
        DigestKind::Sha256,
        DigestKind::Sha512,
    ];

    fn accumulator(self) -> Box<dyn Accumulator> {
        match self {
            DigestKind::Md5 => Box::new(CryptoAccumulator(md5::Md5::new())),
            DigestKind::Sha1 => Box::new(CryptoAccumulator(sha1::Sha1::new())),
            DigestKind::Sha256 => Box::new(CryptoAccumulator(sha2::Sha256::new())),
            DigestKind::Sha512 => Box::new(CryptoAccumulator(sha2::Sha512::new())),
        }
    }

    /// Length of the rendered lowercase-hex digest.
    pub fn hex_len(self) -> usize {
        match self {
            DigestKind::Md5 => 32,
            DigestKind::Sha1 => 40,
            DigestKind::Sha256 => 64,
            DigestKind::Sha512 => 128,
        }
    }
}

/// An ordered set of accumulators behind one write sink.
pub struct DigestSet {
    entries: Vec<(DigestKind, Box<dyn Accumulator>)>,
}

impl DigestSet {
    pub fn new(kinds: &[DigestKind]) -> Self {
        DigestSet {
            entries: kinds.iter().map(|&k| (k, k.accumulator())).collect(),
        }
    }

    /// MD5 + SHA-1 + SHA-256 + SHA-512.
    pub fn standard() -> Self {
        Self::new(&DigestKind::STANDARD)
    }

    /// Finalize every accumulator and render lowercase hex, preserving
    /// construction order.
    pub fn finish(self) -> Vec<(DigestKind, String)> {
        self.entries
            .into_iter()
            .map(|(kind, acc)| (kind, hex::encode(acc.finish())))
            .collect()
    }
}

impl ByteSink for DigestSet {
    /// All-or-nothing: a short write by any accumulator invalidates the
    /// whole set, and the caller must discard every digest.
    fn consume(&mut self, chunk: &[u8]) -> io::Result<()> {
        for (_, acc) in &mut self.entries {
            let n = acc.consume(chunk);
            if n < chunk.len() {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "incomplete digest write",
                ));
            }
        }
        Ok(())
    }
}

/// Drive `src` through `sink` in one forward pass.
pub(crate) fn stream_into<R: io::Read>(src: &mut R, sink: &mut impl ByteSink) -> io::Result<()> {
    let mut buf = [0u8; 8192];
    loop {
        let n = src.read(&mut buf)?;
        if n == 0 {
            return Ok(());
        }
        sink.consume(&buf[..n])?;
    }
}

#[cfg(test)]
#[path = "multiplex_tests.rs"]
mod tests;
