//! Normalize parsed bibliographic metadata into serializer-ready tagged records.
//!
//! `bibtag` sits between an upstream document parser and a downstream tagged-format
//! serializer. It takes the parser's structured metadata (title, contributors, dates,
//! identifiers, publication details, references), applies per-venue special-case
//! rewrites, flattens everything into a [`TaggedRecord`], and persists the record's
//! reference list to a predictable filesystem location keyed by bibcode.
//!
//! # Key Features
//!
//! - **Field normalization**: conditional title/language selection, `"Surname, Given
//!   Middle"` name formatting, affiliation assembly with ORCID/email markers, date
//!   disambiguation across print/electronic/other dates.
//! - **Publication string assembly**: journal, volume, issue, publisher special
//!   cases, and pagination combined with consistent separator rules.
//! - **Venue special handling**: per-bibstem rewrites applied to the input metadata
//!   before generic extraction (currently the MPEC minor-planet circulars).
//! - **Reference persistence**: one flat file per record under
//!   `<topdir>/<bibstem>/<volume>/<bibcode>.<ext>`.
//!
//! # Basic Usage
//!
//! ```rust
//! use bibtag::{Translator, IngestRecord};
//! use bibtag::ingest::TitleBlock;
//!
//! let data = IngestRecord {
//!     title: Some(TitleBlock {
//!         text_english: Some("Dust in the Wind".into()),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let mut translator = Translator::new();
//! let record = translator.translate(Some(data), None).unwrap();
//! assert_eq!(record.title.as_deref(), Some("Dust in the Wind"));
//! ```
//!
//! # Error Handling
//!
//! The library uses a custom [`Result`] type wrapping [`TranslationError`].
//! Structural failures (no input data, unknown reference source) surface as errors;
//! per-field extraction failures degrade to absent fields and never abort sibling
//! extractors. A failing bibcode generator is logged and leaves [`TaggedRecord::bibcode`]
//! unset — partial records are still usable downstream.
//!
//! # Thread Safety
//!
//! Everything here is synchronous and self-contained. A [`Translator`] owns its
//! input between calls; concurrent reference writes for the same bibcode and
//! volume race with last-write-wins, which the single-writer usage model accepts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod bibcode;
pub mod detag;
pub mod ingest;
pub mod refwriter;
pub mod translate;

// Reexports
pub use bibcode::BibcodeGenerator;
pub use detag::detag;
pub use ingest::IngestRecord;
pub use refwriter::{RefWriterConfig, ReferenceWriter};
pub use translate::Translator;

/// A specialized Result type for translation and reference-writing operations.
pub type Result<T> = std::result::Result<T, TranslationError>;

/// Represents errors that can occur during translation or reference writing.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no metadata supplied to translate")]
    NoData,

    #[error("unknown reference source: {0}")]
    UnknownSource(String),

    #[error("Error: {0}")]
    Other(String),
}

/// Record-level properties carried alongside the bibliographic fields.
///
/// Serialized with the downstream serializer's key spellings (`DOI`, `OPEN`).
/// `OPEN` is `1` when the work is open access and absent otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordProperties {
    #[serde(rename = "DOI", default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "OPEN", default, skip_serializing_if = "Option::is_none")]
    pub open: Option<u8>,
}

/// The normalized, serializer-ready record produced by [`Translator::translate`].
///
/// Fields are populated monotonically during a single `translate` call, and absent
/// fields stay absent when serialized — downstream logic branches on presence, so
/// an empty string and a missing key are not interchangeable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggedRecord {
    /// Title of the work, with any subtitle appended after `": "`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Language code, set only when a native-language title stood in for a
    /// missing English one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Formatted contributor names, parallel in length and order to `affiliations`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Formatted affiliation strings; empty entries are permitted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<String>,
    /// Abstract text with markup stripped.
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    /// Comma-joined keyword string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// `YYYY-MM-DD` or `YYYY-MM` publication date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RecordProperties>,
    /// Opaque reference entries passed through for the reference handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refhandler_list: Option<Vec<String>>,
    /// Free-text publication string (journal, volume, issue, pagination).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,
    /// Volume number, carried for the reference writer's path construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    /// Canonical bibliographic code, absent when generation failed or no
    /// generator was configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bibcode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_error_display() {
        let error = TranslationError::UnknownSource("oup".to_string());
        assert_eq!(error.to_string(), "unknown reference source: oup");
        assert_eq!(
            TranslationError::NoData.to_string(),
            "no metadata supplied to translate"
        );
    }

    #[test]
    fn test_absent_fields_stay_absent_when_serialized() {
        let record = TaggedRecord {
            title: Some("A Title".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("title"));
        assert!(!obj.contains_key("abstract"));
        assert!(!obj.contains_key("publication"));
        assert!(!obj.contains_key("bibcode"));
    }

    #[test]
    fn test_properties_key_spelling() {
        let props = RecordProperties {
            doi: Some("10.1000/test".to_string()),
            open: Some(1),
        };
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["DOI"], "10.1000/test");
        assert_eq!(json["OPEN"], 1);
    }
}
