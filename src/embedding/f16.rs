//! Float16 embedding codec.
//!
//! Corpus embeddings ship as a compact binary blob:
//!
//! ```text
//! [count: u32 LE][dim: u32 LE][count * dim half-precision floats, LE]
//! ```
//!
//! Row `i` (0-based) holds the embedding for entry id `i + 1`. Decoding
//! widens each half-precision value to `f32`; NaN, infinities, and
//! subnormals in the payload are preserved, never rejected.

use crate::error::CodecError;
use half::f16;

/// Byte length of the `[count][dim]` header.
const HEADER_LEN: usize = 8;

/// Reads the vector count without touching the payload.
pub fn peek_count(bytes: &[u8]) -> Result<usize, CodecError> {
    let (count, _) = read_header(bytes)?;
    Ok(count)
}

/// Reads the vector dimension without touching the payload.
pub fn peek_dim(bytes: &[u8]) -> Result<usize, CodecError> {
    let (_, dim) = read_header(bytes)?;
    Ok(dim)
}

/// Decodes a blob into `count` vectors of `dim` single-precision floats.
///
/// # Errors
///
/// - [`CodecError::TruncatedHeader`] if the blob is shorter than 8 bytes.
/// - [`CodecError::TruncatedPayload`] if the blob is shorter than the
///   header promises (`8 + count * dim * 2` bytes).
///
/// Trailing bytes beyond the payload are ignored.
pub fn decode_embeddings(bytes: &[u8]) -> Result<Vec<Vec<f32>>, CodecError> {
    let (count, dim) = read_header(bytes)?;

    let expected = HEADER_LEN + count * dim * 2;
    if bytes.len() < expected {
        return Err(CodecError::TruncatedPayload {
            expected,
            actual: bytes.len(),
        });
    }

    let payload = &bytes[HEADER_LEN..expected];
    let mut vectors = Vec::with_capacity(count);
    for row in payload.chunks_exact(dim * 2) {
        let vector = row
            .chunks_exact(2)
            .map(|pair| f16::from_le_bytes([pair[0], pair[1]]).to_f32())
            .collect();
        vectors.push(vector);
    }

    Ok(vectors)
}

/// Encodes vectors into the blob layout, narrowing each value to
/// half precision.
///
/// All vectors must share one dimension; rows are written in input order.
/// The inverse of [`decode_embeddings`] for values exactly representable in
/// both formats.
pub fn encode_embeddings(vectors: &[Vec<f32>]) -> Vec<u8> {
    let count = vectors.len();
    let dim = vectors.first().map_or(0, Vec::len);
    debug_assert!(vectors.iter().all(|v| v.len() == dim));

    let mut bytes = Vec::with_capacity(HEADER_LEN + count * dim * 2);
    bytes.extend_from_slice(&(count as u32).to_le_bytes());
    bytes.extend_from_slice(&(dim as u32).to_le_bytes());
    for vector in vectors {
        for &value in vector {
            bytes.extend_from_slice(&f16::from_f32(value).to_le_bytes());
        }
    }
    bytes
}

fn read_header(bytes: &[u8]) -> Result<(usize, usize), CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::TruncatedHeader { len: bytes.len() });
    }
    let count = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let dim = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    Ok((count, dim))
}
