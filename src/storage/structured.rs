//! Checksummed little-endian primitives for framed binary files.
//!
//! Every byte written through a [`StructWriter`] feeds a running CRC32 that
//! [`StructWriter::finish`] appends to the output; [`StructReader`] mirrors
//! the computation so the trailer can be checked after the last field.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher;

use crate::error::{LexiconError, Result};

/// A structured writer for binary data.
pub struct StructWriter<W: Write> {
    writer: W,
    hasher: Hasher,
    position: u64,
}

impl<W: Write> StructWriter<W> {
    pub fn new(writer: W) -> Self {
        StructWriter {
            writer,
            hasher: Hasher::new(),
            position: 0,
        }
    }

    /// Write a u8 value.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_u8(value)?;
        self.update(&[value]);
        Ok(())
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.update(&value.to_le_bytes());
        Ok(())
    }

    /// Write a u64 value (little-endian).
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.writer.write_u64::<LittleEndian>(value)?;
        self.update(&value.to_le_bytes());
        Ok(())
    }

    /// Write raw bytes without length prefix.
    pub fn write_raw(&mut self, value: &[u8]) -> Result<()> {
        self.writer.write_all(value)?;
        self.update(value);
        Ok(())
    }

    /// Write bytes with a u64 length prefix.
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.write_u64(value.len() as u64)?;
        self.write_raw(value)
    }

    /// Bytes written so far, excluding the checksum trailer.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// CRC32 of everything written so far.
    pub fn checksum(&self) -> u32 {
        self.hasher.clone().finalize()
    }

    /// Append the checksum trailer, flush, and hand back the inner writer.
    pub fn finish(mut self) -> Result<W> {
        let checksum = self.checksum();
        self.writer.write_u32::<LittleEndian>(checksum)?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.position += data.len() as u64;
    }
}

/// A structured reader for binary data.
///
/// Running out of input is reported as [`LexiconError::MalformedPersistedState`]
/// since it always means a truncated file.
pub struct StructReader<R: Read> {
    reader: R,
    hasher: Hasher,
    position: u64,
}

impl<R: Read> StructReader<R> {
    pub fn new(reader: R) -> Self {
        StructReader {
            reader,
            hasher: Hasher::new(),
            position: 0,
        }
    }

    /// Read a u8 value.
    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.reader.read_u8().map_err(truncated)?;
        self.update(&[value]);
        Ok(value)
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        let value = self.reader.read_u32::<LittleEndian>().map_err(truncated)?;
        self.update(&value.to_le_bytes());
        Ok(value)
    }

    /// Read a u64 value (little-endian).
    pub fn read_u64(&mut self) -> Result<u64> {
        let value = self.reader.read_u64::<LittleEndian>().map_err(truncated)?;
        self.update(&value.to_le_bytes());
        Ok(value)
    }

    /// Read exactly `length` raw bytes.
    pub fn read_raw(&mut self, length: u64) -> Result<Vec<u8>> {
        // Grow with the data actually present instead of trusting a length
        // read from a possibly corrupt header.
        let mut bytes = Vec::new();
        (&mut self.reader).take(length).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) != length {
            return Err(LexiconError::malformed(format!(
                "expected {length} bytes at offset {}, found {}",
                self.position,
                bytes.len()
            )));
        }
        self.update(&bytes);
        Ok(bytes)
    }

    /// Read bytes with a u64 length prefix.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let length = self.read_u64()?;
        self.read_raw(length)
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// CRC32 of everything read so far.
    pub fn checksum(&self) -> u32 {
        self.hasher.clone().finalize()
    }

    /// Read the checksum trailer and compare it with the running checksum.
    pub fn verify_checksum(&mut self) -> Result<bool> {
        let expected = self.checksum();
        let stored = self.reader.read_u32::<LittleEndian>().map_err(truncated)?;
        Ok(stored == expected)
    }

    /// Whether the underlying input is exhausted.
    pub fn is_eof(&mut self) -> Result<bool> {
        let mut probe = [0u8; 1];
        loop {
            match self.reader.read(&mut probe) {
                Ok(0) => return Ok(true),
                Ok(_) => return Ok(false),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.position += data.len() as u64;
    }
}

fn truncated(error: io::Error) -> LexiconError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        LexiconError::malformed("unexpected end of data")
    } else {
        error.into()
    }
}
