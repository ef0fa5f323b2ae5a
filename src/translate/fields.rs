//! Per-field extractors, each reading one slice of the ingest record and
//! writing one or more output fields.
//!
//! Extractors are deliberately independent: a failure to derive one field
//! (returned as `None` from the fragile helpers here) never affects its
//! siblings. Missing input simply leaves the output field absent.

use itertools::Itertools;

use crate::detag::detag;
use crate::ingest::{Contributor, ContributorName, IngestRecord};
use crate::{RecordProperties, TaggedRecord};

/// Inline tags worth preserving when an abstract is stripped for a plain-text
/// target: math markup survives verbatim, everything else is unwrapped.
const ABSTRACT_TAGS_KEEP: &[&str] = &["inline-formula", "math", "mml:math", "sub", "sup", "tex-math"];

/// English title preferred; a native title is a fallback that also records its
/// language. Any subtitle is appended to whichever title was chosen.
pub(super) fn title(data: &IngestRecord, out: &mut TaggedRecord) {
    let Some(block) = &data.title else { return };

    let mut chosen = None;
    if let Some(english) = &block.text_english {
        chosen = Some(english.clone());
    } else if let Some(native) = &block.text_native {
        chosen = Some(native.clone());
        out.language = block.lang_native.clone();
    }

    let Some(mut title) = chosen else { return };
    if let Some(subtitle) = &data.subtitle {
        title.push_str(": ");
        title.push_str(subtitle);
    }
    out.title = Some(title);
}

pub(super) fn abstract_text(data: &IngestRecord, out: &mut TaggedRecord) {
    if let Some(text) = data
        .abstract_block
        .as_ref()
        .and_then(|a| a.text_english.as_deref())
    {
        out.abstract_text = Some(detag(text, ABSTRACT_TAGS_KEEP));
    }
}

pub(super) fn keywords(data: &IngestRecord, out: &mut TaggedRecord) {
    let joined = data
        .keywords
        .iter()
        .filter_map(|k| k.key_string.as_deref())
        .join(", ");
    if !joined.is_empty() {
        out.keywords = Some(joined);
    }
}

/// Populates the parallel `authors`/`affiliations` lists. Contributors without
/// a `name` substructure are skipped entirely rather than padded with empties,
/// which keeps the two lists index-aligned.
pub(super) fn authors_affiliations(data: &IngestRecord, out: &mut TaggedRecord) {
    let mut authors = Vec::new();
    let mut affiliations = Vec::new();
    for contrib in &data.authors {
        let Some(name) = &contrib.name else { continue };
        authors.push(format_name(name).unwrap_or_default());
        affiliations.push(format_affiliation(contrib));
    }
    out.authors = authors;
    out.affiliations = affiliations;
}

/// `"Surname"`, `"Surname, Given"`, or `"Surname, Given Middle"`.
/// No surname means no name; falling back to `pubraw` or a collaboration
/// name is the caller's business.
fn format_name(name: &ContributorName) -> Option<String> {
    let surname = name.surname.as_deref()?;
    let mut out = surname.to_string();
    if let Some(given) = name.given_name.as_deref() {
        out.push_str(", ");
        out.push_str(given);
        if let Some(middle) = name.middle_name.as_deref() {
            out.push(' ');
            out.push_str(middle);
        }
    }
    Some(out)
}

/// All affiliation strings joined with `"; "`, then an ORCID marker, then an
/// email marker. A contributor with no usable affiliation data yields an empty
/// string rather than an error.
fn format_affiliation(contrib: &Contributor) -> String {
    let mut parts: Vec<String> = contrib
        .affiliation
        .iter()
        .filter_map(|a| a.aff_pub_raw.clone())
        .collect();

    let mut email = None;
    if let Some(attrib) = &contrib.attrib {
        if let Some(orcid) = &attrib.orcid {
            parts.push(format!("<ID system=\"ORCID\">{orcid}</ID>"));
        }
        email = attrib.email.as_deref();
    }

    if parts.is_empty() {
        return String::new();
    }
    let mut out = parts.join("; ");
    if let Some(email) = email {
        out.push_str(&format!(" <EMAIL>{email}</EMAIL>"));
    }
    out
}

/// Chooses a publication date by priority (print, electronic, "Available"
/// other-date), discarding year-only candidates as too imprecise, then
/// truncates a `00` day component down to `YYYY-MM`.
pub(super) fn date(data: &IngestRecord, out: &mut TaggedRecord) {
    let Some(pubdate) = &data.pub_date else { return };

    let precise = |d: &&String| d.len() > 4;
    let printdate = pubdate.print_date.as_ref().filter(precise);
    let elecdate = pubdate.electr_date.as_ref().filter(precise);
    let otherdate = pubdate
        .other_date
        .iter()
        .filter(|od| od.other_date_type.as_deref() == Some("Available"))
        .filter_map(|od| od.other_date_value.as_ref())
        .filter(precise)
        .last();

    if let Some(date) = printdate.or(elecdate).or(otherdate) {
        out.pubdate = Some(normalize_day(date));
    }
}

/// Day `00` truncates to `YYYY-MM` (a zero month becomes `01` in the truncated
/// form). Anything unparsable passes through untouched.
fn normalize_day(date: &str) -> String {
    if let [y, m, d] = date.split('-').collect::<Vec<_>>()[..] {
        if let (Ok(month), Ok(day)) = (m.parse::<u32>(), d.parse::<u32>()) {
            if day == 0 {
                let m = if month == 0 { "01" } else { m };
                return format!("{y}-{m}");
            }
        }
    }
    date.to_string()
}

pub(super) fn references(data: &IngestRecord, out: &mut TaggedRecord) {
    if !data.references.is_empty() {
        out.refhandler_list = Some(data.references.clone());
    }
}

/// DOI from the first persistent identifier exposing one, plus `OPEN = 1` for
/// open-access works. The whole field is omitted when neither applies.
pub(super) fn properties(data: &IngestRecord, out: &mut TaggedRecord) {
    let doi = data.persistent_ids.iter().find_map(|p| p.doi.clone());
    let open = data.open_access.as_ref().is_some_and(|oa| oa.open);

    if doi.is_some() || open {
        out.properties = Some(RecordProperties {
            doi,
            open: open.then_some(1),
        });
    }
}
