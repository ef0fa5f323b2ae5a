//! Translation of parsed ingest metadata into a serializer-ready [`TaggedRecord`].
//!
//! A [`Translator`] owns a private copy of the input record (venue special-case
//! rewrites mutate it in place), runs the field extractors in a fixed order, and
//! finally asks an optional [`BibcodeGenerator`] for the record's bibcode. Each
//! `translate` call produces a fresh output record.
//!
//! # Example
//!
//! ```rust
//! use bibtag::{Translator, IngestRecord};
//! use bibtag::ingest::{Keyword, TitleBlock};
//!
//! let data = IngestRecord {
//!     title: Some(TitleBlock {
//!         text_english: Some("A Survey".into()),
//!         ..Default::default()
//!     }),
//!     subtitle: Some("Part II".into()),
//!     keywords: vec![Keyword { key_string: Some("surveys".into()) }],
//!     ..Default::default()
//! };
//!
//! let record = Translator::new().translate(Some(data), None).unwrap();
//! assert_eq!(record.title.as_deref(), Some("A Survey: Part II"));
//! assert_eq!(record.keywords.as_deref(), Some("surveys"));
//! ```

mod fields;
mod publication;
mod special;

use tracing::{debug, warn};

use crate::bibcode::BibcodeGenerator;
use crate::ingest::IngestRecord;
use crate::{Result, TaggedRecord, TranslationError};

/// Translates an ingest metadata record into a flat tagged-format record.
#[derive(Default)]
pub struct Translator {
    data: Option<IngestRecord>,
    bibgen: Option<Box<dyn BibcodeGenerator>>,
}

impl Translator {
    /// Creates a translator with no input data and no bibcode generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a translator holding `data`, to be translated by a later
    /// [`translate`](Self::translate) call.
    #[must_use]
    pub fn with_data(data: IngestRecord) -> Self {
        Self {
            data: Some(data),
            bibgen: None,
        }
    }

    /// Attaches a bibcode generator. Without one, translated records carry no
    /// bibcode and the reference writer treats them as nothing-to-write.
    #[must_use]
    pub fn with_bibcode_generator(mut self, bibgen: Box<dyn BibcodeGenerator>) -> Self {
        self.bibgen = Some(bibgen);
        self
    }

    /// Translate `data` (or the record supplied at construction) into a
    /// [`TaggedRecord`].
    ///
    /// A `bibstem` hint selects venue special-case rewrites and is forwarded to
    /// the bibcode generator. Field extraction failures degrade to absent
    /// fields; only the complete absence of input data is an error.
    pub fn translate(
        &mut self,
        data: Option<IngestRecord>,
        bibstem: Option<&str>,
    ) -> Result<TaggedRecord> {
        if let Some(data) = data {
            self.data = Some(data);
        }
        let data = self.data.as_mut().ok_or(TranslationError::NoData)?;

        let mut output = TaggedRecord::default();

        if let Some(stem) = bibstem {
            special::apply(stem, data, &mut output);
        }

        fields::title(data, &mut output);
        fields::abstract_text(data, &mut output);
        fields::keywords(data, &mut output);
        fields::authors_affiliations(data, &mut output);
        fields::date(data, &mut output);
        fields::references(data, &mut output);
        fields::properties(data, &mut output);
        // must run after any special handling that pre-set the publication field
        publication::assemble(data, &mut output);

        // the reference writer keys its output path on the volume
        output.volume = data
            .publication
            .as_ref()
            .and_then(|p| p.volume_num.clone());

        match &self.bibgen {
            Some(bibgen) => match bibgen.make_bibcode(data, bibstem) {
                Ok(bibcode) => output.bibcode = Some(bibcode),
                Err(err) => warn!("could not make a bibcode: {err}"),
            },
            None => debug!("no bibcode generator configured"),
        }

        Ok(output)
    }
}
