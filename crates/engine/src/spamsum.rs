//! Context-triggered piecewise hashing (classic spamsum).
//!
//! Produces the `block_size:left:right` similarity token carried in the
//! `SSDeep` field. A rolling checksum over a 7-byte window decides chunk
//! boundaries; an FNV-style hash of each chunk is emitted as one base64
//! character. The block size is chosen from the declared input length
//! and halved (with a full re-read) while the signature stays too short,
//! which is why the file-backed entry point needs a seekable source.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

/// Maximum characters in the left-hand digest; the right-hand digest,
/// computed at twice the block size, is capped at half of it.
const SPAMSUM_LENGTH: usize = 64;
const HALF_LENGTH: usize = SPAMSUM_LENGTH / 2;

pub const MIN_BLOCK_SIZE: u32 = 3;

const ROLLING_WINDOW: usize = 7;
const HASH_PRIME: u32 = 0x0100_0193;
const HASH_INIT: u32 = 0x2802_1967;

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// A computed spamsum signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpamSum {
    block_size: u32,
    left: String,
    right: String,
}

impl SpamSum {
    pub fn block_size(&self) -> u32 {
        self.block_size
    }
}

impl fmt::Display for SpamSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.block_size, self.left, self.right)
    }
}

struct RollState {
    window: [u8; ROLLING_WINDOW],
    h1: u32,
    h2: u32,
    h3: u32,
    n: usize,
}

impl RollState {
    fn new() -> Self {
        RollState {
            window: [0; ROLLING_WINDOW],
            h1: 0,
            h2: 0,
            h3: 0,
            n: 0,
        }
    }

    /// Push one byte and return the current rolling checksum. h2 must be
    /// updated from the previous h1, before h1 absorbs the new byte.
    fn push(&mut self, c: u8) -> u32 {
        let c32 = c as u32;
        self.h2 = self
            .h2
            .wrapping_sub(self.h1)
            .wrapping_add(ROLLING_WINDOW as u32 * c32);
        self.h1 = self
            .h1
            .wrapping_add(c32)
            .wrapping_sub(self.window[self.n % ROLLING_WINDOW] as u32);
        self.window[self.n % ROLLING_WINDOW] = c;
        self.n += 1;
        self.h3 = (self.h3 << 5) ^ c32;
        self.h1.wrapping_add(self.h2).wrapping_add(self.h3)
    }
}

fn sum_hash(h: u32, c: u8) -> u32 {
    h.wrapping_mul(HASH_PRIME) ^ c as u32
}

/// One attempt at a fixed block size.
struct Pass {
    block_size: u64,
    roll: RollState,
    rolling: u32,
    left_hash: u32,
    right_hash: u32,
    left: [u8; SPAMSUM_LENGTH],
    right: [u8; HALF_LENGTH],
    /// Cursor into `left`; stops advancing one short of capacity so the
    /// last slot absorbs the remainder of the stream.
    j: usize,
    k: usize,
}

impl Pass {
    fn new(block_size: u32) -> Self {
        Pass {
            block_size: block_size as u64,
            roll: RollState::new(),
            rolling: 0,
            left_hash: HASH_INIT,
            right_hash: HASH_INIT,
            left: [0; SPAMSUM_LENGTH],
            right: [0; HALF_LENGTH],
            j: 0,
            k: 0,
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        let bs = self.block_size;
        for &c in chunk {
            self.rolling = self.roll.push(c);
            self.left_hash = sum_hash(self.left_hash, c);
            self.right_hash = sum_hash(self.right_hash, c);

            let roll = self.rolling as u64;
            if roll % bs == bs - 1 {
                self.left[self.j] = BASE64[(self.left_hash % 64) as usize];
                if self.j < SPAMSUM_LENGTH - 1 {
                    self.j += 1;
                    self.left_hash = HASH_INIT;
                }
            }
            if roll % (bs * 2) == bs * 2 - 1 {
                self.right[self.k] = BASE64[(self.right_hash % 64) as usize];
                if self.k < HALF_LENGTH - 1 {
                    self.k += 1;
                    self.right_hash = HASH_INIT;
                }
            }
        }
    }

    /// Close the pass. Returns the two digests and the left cursor the
    /// retry decision is made from (the trailing character emitted for a
    /// non-empty stream does not count toward it).
    fn finish(self) -> (String, String, usize) {
        let mut left = self.left;
        let mut right = self.right;
        let mut left_len = self.j;
        let mut right_len = self.k;

        if self.rolling != 0 {
            left[self.j] = BASE64[(self.left_hash % 64) as usize];
            right[self.k] = BASE64[(self.right_hash % 64) as usize];
            left_len += 1;
            right_len += 1;
        }

        let as_string = |bytes: &[u8]| {
            String::from_utf8(bytes.to_vec()).expect("base64 alphabet is ASCII")
        };
        (
            as_string(&left[..left_len]),
            as_string(&right[..right_len]),
            self.j,
        )
    }
}

/// Smallest block size whose 64-character signature can cover `len`.
fn initial_block_size(len: u64) -> u32 {
    let mut bs = MIN_BLOCK_SIZE;
    while (bs as u64).saturating_mul(SPAMSUM_LENGTH as u64) < len {
        match bs.checked_mul(2) {
            Some(next) => bs = next,
            None => break,
        }
    }
    bs
}

/// Hash an in-memory byte sequence.
pub fn hash_bytes(data: &[u8]) -> SpamSum {
    let mut block_size = initial_block_size(data.len() as u64);
    loop {
        let mut pass = Pass::new(block_size);
        pass.update(data);
        let (left, right, cursor) = pass.finish();

        if block_size > MIN_BLOCK_SIZE && cursor < HALF_LENGTH {
            block_size /= 2;
            continue;
        }
        return SpamSum {
            block_size,
            left,
            right,
        };
    }
}

/// Hash a seekable source of `declared_len` bytes, e.g. a file that has
/// already been consumed by the exact-digest pass. Each attempt rewinds
/// to the start, so the caller's read position is not preserved.
pub fn hash_reader<R: Read + Seek>(src: &mut R, declared_len: u64) -> io::Result<SpamSum> {
    let mut block_size = initial_block_size(declared_len);
    let mut buf = [0u8; 8192];
    loop {
        src.seek(SeekFrom::Start(0))?;

        let mut pass = Pass::new(block_size);
        loop {
            let n = src.read(&mut buf)?;
            if n == 0 {
                break;
            }
            pass.update(&buf[..n]);
        }
        let (left, right, cursor) = pass.finish();

        if block_size > MIN_BLOCK_SIZE && cursor < HALF_LENGTH {
            block_size /= 2;
            continue;
        }
        return Ok(SpamSum {
            block_size,
            left,
            right,
        });
    }
}

#[cfg(test)]
#[path = "spamsum_tests.rs"]
mod tests;
