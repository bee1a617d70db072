//! Binary encoding of one reference embedding.
//!
//! ```text
//! [4B magic "AEMB"] [4B version=1]
//! [4B tagLen] [tagLen bytes UTF-8 tag]
//! [4B dim] [dim x 4B float32 vector]
//! ```
//!
//! All multi-byte values are little-endian.

use std::io::{Cursor, Read};

use accentid_embed::Embedding;

use crate::StoreError;

const MAGIC: [u8; 4] = *b"AEMB";
const VERSION: u32 = 1;

/// Upper bounds that keep a corrupt header from triggering huge allocations.
const MAX_TAG_LEN: usize = 4096;
const MAX_DIM: usize = 1 << 20;

/// Serializes an embedding. Rejects vectors that could never be scored.
pub fn encode(embedding: &Embedding) -> Result<Vec<u8>, StoreError> {
    check(embedding).map_err(StoreError::InvalidEmbedding)?;
    let tag = embedding.tag().as_bytes();
    if tag.len() > MAX_TAG_LEN {
        return Err(StoreError::InvalidEmbedding(format!(
            "tag is {} bytes, limit {MAX_TAG_LEN}",
            tag.len()
        )));
    }

    let mut buf = Vec::with_capacity(16 + tag.len() + 4 * embedding.dimension());
    buf.extend_from_slice(&MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&(tag.len() as u32).to_le_bytes());
    buf.extend_from_slice(tag);
    buf.extend_from_slice(&(embedding.dimension() as u32).to_le_bytes());
    for v in embedding.as_slice() {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    Ok(buf)
}

/// Parses what [`encode`] produces.
pub fn decode(data: &[u8]) -> Result<Embedding, StoreError> {
    let mut r = Cursor::new(data);

    let magic: [u8; 4] = read_array(&mut r)?;
    if magic != MAGIC {
        return Err(StoreError::InvalidFormat(format!("invalid magic {magic:?}")));
    }

    let version = read_u32(&mut r)?;
    if version != VERSION {
        return Err(StoreError::InvalidFormat(format!(
            "unsupported version {version} (want {VERSION})"
        )));
    }

    let tag_len = read_u32(&mut r)? as usize;
    if tag_len > MAX_TAG_LEN {
        return Err(StoreError::InvalidFormat(format!("tag length {tag_len} too large")));
    }
    let mut tag = vec![0u8; tag_len];
    r.read_exact(&mut tag).map_err(truncated)?;
    let tag = String::from_utf8(tag)
        .map_err(|_| StoreError::InvalidFormat("tag is not valid UTF-8".into()))?;

    let dim = read_u32(&mut r)? as usize;
    if dim == 0 || dim > MAX_DIM {
        return Err(StoreError::InvalidFormat(format!("invalid dimension {dim}")));
    }
    let vector = (0..dim)
        .map(|_| read_array(&mut r).map(f32::from_le_bytes))
        .collect::<Result<Vec<f32>, _>>()?;

    let trailing = data.len() as u64 - r.position();
    if trailing != 0 {
        return Err(StoreError::InvalidFormat(format!("{trailing} trailing bytes")));
    }

    let embedding = Embedding::new(tag, vector);
    check(&embedding).map_err(StoreError::InvalidFormat)?;
    Ok(embedding)
}

fn check(embedding: &Embedding) -> Result<(), String> {
    if embedding.dimension() == 0 {
        return Err("empty vector".into());
    }
    if !embedding.is_finite() {
        return Err("non-finite value in vector".into());
    }
    if embedding.norm() == 0.0 {
        return Err("zero-norm vector".into());
    }
    Ok(())
}

fn truncated(_: std::io::Error) -> StoreError {
    StoreError::InvalidFormat("unexpected end of data".into())
}

fn read_array<const N: usize>(r: &mut Cursor<&[u8]>) -> Result<[u8; N], StoreError> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf).map_err(truncated)?;
    Ok(buf)
}

fn read_u32(r: &mut Cursor<&[u8]>) -> Result<u32, StoreError> {
    read_array(r).map(u32::from_le_bytes)
}
