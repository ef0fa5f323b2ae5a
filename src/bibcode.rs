//! Bibcode generation seam.
//!
//! Deriving a canonical bibcode requires journal authority data this crate does
//! not own, so the generator is an injected dependency rather than a global
//! initialized at load time. A [`Translator`](crate::Translator) without a
//! generator is a valid, documented state: translation completes and the
//! record's `bibcode` field simply stays absent.

use crate::Result;
use crate::ingest::IngestRecord;

/// Derives a canonical bibliographic code from ingest metadata.
///
/// Implementations may consult external services or lookup tables and may fail
/// for any reason; the translator logs failures and carries on without a
/// bibcode, so implementors need not guarantee success.
pub trait BibcodeGenerator {
    /// Build a bibcode for `data`, optionally guided by a venue `bibstem` hint.
    fn make_bibcode(&self, data: &IngestRecord, bibstem: Option<&str>) -> Result<String>;
}
