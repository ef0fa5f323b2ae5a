//! Persistence of a record's reference list to its canonical location.
//!
//! Each record with a bibcode and a volume gets one flat file at
//! `<topdir>/<bibstem>/<volume>/<bibcode>.<ext>`, where the bibstem is cut
//! from the bibcode itself and the extension is looked up per ingest source.
//! Writes are plain truncating writes with no atomicity or locking; the
//! single-writer usage model accepts a last-write-wins race.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::{Result, TaggedRecord, TranslationError};

/// Process-wide reference-writer settings, loaded once by the embedding
/// service and immutable thereafter.
#[derive(Debug, Clone, Deserialize)]
pub struct RefWriterConfig {
    /// Root directory of the reference tree.
    pub topdir: PathBuf,
    /// Maps ingest source tags to the file extension their references use.
    pub extensions: HashMap<String, String>,
}

/// Writes reference lists under a [`RefWriterConfig`]'s output tree.
#[derive(Debug, Clone)]
pub struct ReferenceWriter {
    config: RefWriterConfig,
}

impl ReferenceWriter {
    #[must_use]
    pub fn new(config: RefWriterConfig) -> Self {
        Self { config }
    }

    /// Write `record`'s reference list, returning the path written.
    ///
    /// A record without a bibcode or a volume has no canonical location yet;
    /// that is nothing-to-write (`Ok(None)`), not an error. An unrecognized
    /// `source` tag is an error, as is any filesystem failure.
    pub fn writeref(&self, record: &TaggedRecord, source: &str) -> Result<Option<PathBuf>> {
        let (Some(bibcode), Some(volume)) = (
            record.bibcode.as_deref().filter(|b| !b.is_empty()),
            record.volume.as_deref().filter(|v| !v.is_empty()),
        ) else {
            debug!("record has no bibcode or volume, nothing to write");
            return Ok(None);
        };

        let file_ext = self
            .config
            .extensions
            .get(source)
            .ok_or_else(|| TranslationError::UnknownSource(source.to_string()))?;

        // characters 5-9 of a bibcode are its journal abbreviation segment,
        // dot-padded on the right for short abbreviations
        let bibstem = bibcode.get(4..9).unwrap_or("").trim_end_matches('.');
        let volume = format!("{volume:0>4}");

        let outdir = self.config.topdir.join(bibstem).join(volume);
        fs::create_dir_all(&outdir)?;
        let outfile = outdir.join(format!("{bibcode}.{file_ext}"));

        let mut fw = fs::File::create(&outfile)?;
        writeln!(fw, "<ADSBIBCODE>{bibcode}</ADSBIBCODE>")?;
        for reference in record.refhandler_list.iter().flatten() {
            writeln!(fw, "{reference}")?;
        }

        Ok(Some(outfile))
    }
}
