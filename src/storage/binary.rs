//! Framed bincode encoding of a full lexicon snapshot.
//!
//! Layout (little-endian):
//!
//! ```text
//! magic "LXGR" | version: u32 | payload length: u64 | payload | crc32: u32
//! ```
//!
//! The payload is a bincode-encoded [`LexiconSnapshot`]; the CRC covers
//! every byte before it.

use std::io::{Read, Write};

use crate::error::{LexiconError, Result};
use crate::lexicon::LexiconSnapshot;
use crate::storage::structured::{StructReader, StructWriter};

/// File signature.
pub const MAGIC: [u8; 4] = *b"LXGR";

/// Current frame version.
pub const FORMAT_VERSION: u32 = 1;

/// Encode a snapshot into `writer`, returning the writer once flushed.
pub fn encode<W: Write>(writer: W, snapshot: &LexiconSnapshot) -> Result<W> {
    let payload = bincode::serialize(snapshot)
        .map_err(|e| LexiconError::serialization(format!("bincode encode failed: {e}")))?;

    let mut writer = StructWriter::new(writer);
    writer.write_raw(&MAGIC)?;
    writer.write_u32(FORMAT_VERSION)?;
    writer.write_bytes(&payload)?;
    writer.finish()
}

/// Decode a snapshot, validating signature, version, length and checksum.
pub fn decode<R: Read>(reader: R) -> Result<LexiconSnapshot> {
    let mut reader = StructReader::new(reader);

    let magic = reader.read_raw(MAGIC.len() as u64)?;
    if magic != MAGIC {
        return Err(LexiconError::malformed("not a lexicon binary file"));
    }

    let version = reader.read_u32()?;
    if version != FORMAT_VERSION {
        return Err(LexiconError::malformed(format!(
            "unsupported format version {version}, expected {FORMAT_VERSION}"
        )));
    }

    let payload = reader.read_bytes()?;
    if !reader.verify_checksum()? {
        return Err(LexiconError::malformed("checksum mismatch"));
    }
    if !reader.is_eof()? {
        return Err(LexiconError::malformed("trailing data after checksum"));
    }

    bincode::deserialize(&payload)
        .map_err(|e| LexiconError::malformed(format!("invalid payload: {e}")))
}
