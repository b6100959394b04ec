//! zlib envelope around a raw deflate stream
//!
//! Layout: `0x78`, a level byte, the raw deflate stream, then the Adler-32
//! of the uncompressed input in big-endian order.

use std::io::{self, Write};

use flate2::write::DeflateEncoder;

use crate::core::CompressionLevel;

/// First header byte: deflate method with a 32K window
pub const ZLIB_CMF: u8 = 0x78;

const ADLER_MODULUS: u32 = 65521;

/// Adler-32 checksum, `a2 << 16 | a1`
pub fn adler32(data: &[u8]) -> u32 {
    let (mut a1, mut a2) = (1u32, 0u32);
    for &byte in data {
        a1 = (a1 + byte as u32) % ADLER_MODULUS;
        a2 = (a2 + a1) % ADLER_MODULUS;
    }
    (a2 << 16) | a1
}

/// Compress `data` and wrap it in a zlib header and Adler-32 trailer
pub fn zlib_envelope(data: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(vec![ZLIB_CMF, level.header_byte()], level.compression());
    encoder.write_all(data)?;
    let mut envelope = encoder.finish()?;
    envelope.extend_from_slice(&adler32(data).to_be_bytes());
    Ok(envelope)
}
