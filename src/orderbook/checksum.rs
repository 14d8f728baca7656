//! Venue book checksum.
//!
//! The checksum is a CRC32 (IEEE) over a `:`-joined string interleaving the
//! top levels of both sides, best first:
//!
//! ```text
//! <bid0 price>:<bid0 size>:<ask0 price>:<ask0 size>:<bid1 price>:<bid1 size>:...
//! ```
//!
//! Only the first `min(bids, asks)` ranks are included. A rank that exists on
//! one side only is left out entirely, and an empty side gives a checksum of 0.
//!
//! Each decimal is written in its minimal form (no trailing zeros, no
//! exponent), and a value whose scale is zero gets a literal `.0` suffix:
//! `44663` is written `44663.0` but `0.40` is written `0.4`. This has to match
//! the venue byte for byte.

use std::fmt::{self, Write};

use crc32fast::Hasher;
use rust_decimal::Decimal;

use crate::types::{Checksum, PriceLevel};

/// A decimal formatted the way the venue writes it into the checksum string
///
/// `Decimal` has no positive exponent, so a wire value like `2E+1` arrives
/// with scale 0 and is written `20.0`. Venues do not send such values.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalDecimal<'a>(pub &'a Decimal);

impl fmt::Display for CanonicalDecimal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())?;
        if self.0.scale() == 0 {
            f.write_str(".0")?;
        }
        Ok(())
    }
}

/// Feeds formatted text straight into the CRC without building a string
struct CrcWriter(Hasher);

impl Write for CrcWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.update(s.as_bytes());
        Ok(())
    }
}

fn write_level<W: Write>(out: &mut W, level: &PriceLevel) -> fmt::Result {
    write!(
        out,
        "{}:{}",
        CanonicalDecimal(&level.price),
        CanonicalDecimal(&level.size)
    )
}

fn write_input<W: Write>(out: &mut W, bids: &[PriceLevel], asks: &[PriceLevel]) -> fmt::Result {
    for (rank, (bid, ask)) in bids.iter().zip(asks).enumerate() {
        if rank > 0 {
            out.write_char(':')?;
        }
        write_level(out, bid)?;
        out.write_char(':')?;
        write_level(out, ask)?;
    }
    Ok(())
}

/// Compute the checksum of a book given both sides, best level first.
#[must_use]
pub fn compute(bids: &[PriceLevel], asks: &[PriceLevel]) -> Checksum {
    if bids.is_empty() || asks.is_empty() {
        return 0;
    }
    let mut crc = CrcWriter(Hasher::new());
    // CrcWriter never fails
    let _ = write_input(&mut crc, bids, asks);
    Checksum::from(crc.0.finalize())
}

/// The exact string [`compute`] hashes. Useful when chasing a mismatch.
#[must_use]
pub fn input_string(bids: &[PriceLevel], asks: &[PriceLevel]) -> String {
    let depth = bids.len().min(asks.len());
    // 4 fields of ~9 chars plus 4 separators per rank
    let mut out = String::with_capacity(depth * 40);
    let _ = write_input(&mut out, bids, asks);
    out
}
