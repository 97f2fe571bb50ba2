//! Persistence of lexicons as XML text or framed binary snapshots.
//!
//! Both codecs work on a [`LexiconSnapshot`]; turning a snapshot into a
//! queryable lexicon is the lexicon's job.

pub mod binary;
pub mod structured;
pub mod xml;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{LexiconError, Result};
use crate::lexicon::{LexiconConfig, LexiconSnapshot, PersistFormat};

pub use structured::{StructReader, StructWriter};

/// Read a snapshot from `path`.
pub fn read_snapshot(
    path: &Path,
    format: PersistFormat,
    config: &LexiconConfig,
) -> Result<LexiconSnapshot> {
    match format {
        PersistFormat::Xml => {
            let bytes = std::fs::read(path)?;
            let text = String::from_utf8(bytes).map_err(|e| {
                LexiconError::malformed(format!("{} is not valid UTF-8: {e}", path.display()))
            })?;
            xml::decode(&text, config)
        }
        PersistFormat::Binary => binary::decode(BufReader::new(File::open(path)?)),
    }
}

/// Write a snapshot to `path`, replacing any existing file.
pub fn write_snapshot(path: &Path, format: PersistFormat, snapshot: &LexiconSnapshot) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    let writer = match format {
        PersistFormat::Xml => xml::encode(writer, snapshot)?,
        PersistFormat::Binary => binary::encode(writer, snapshot)?,
    };
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}
