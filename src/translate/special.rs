//! Per-venue rewrite rules applied to the input record before generic
//! extraction, for sources whose conventions don't fit the general model.
//!
//! Rewrites mutate the translator's private copy of the ingest record, so the
//! downstream extractors see the rewritten structure unconditionally. A venue
//! may also pre-set output fields (the publication string) that the generic
//! assembler then leaves alone.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::TaggedRecord;
use crate::ingest::{IngestRecord, Pagination};

/// Splits a circular issue token like `A12` into its series letters and page number.
static SERIES_PAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\D+)(\d+)$").unwrap());

/// Stock byline the Minor Planet Center stamps on every circular.
const MPC_STAFF_BYLINE: &str = "Minor Planet Center Staff";

pub(super) fn apply(bibstem: &str, data: &mut IngestRecord, out: &mut TaggedRecord) {
    match bibstem {
        "MPEC" => rewrite_mpec(data, out),
        _ => {}
    }
}

/// Minor Planet Electronic Circulars arrive as one title string of the form
/// `"MPEC 2023-A12: Designation"`. The circular number carries the series
/// letter (used as the volume) and the page; the remainder becomes the real
/// title. Circulars have no abstract, and the publication string is fixed
/// rather than assembled.
fn rewrite_mpec(data: &mut IngestRecord, out: &mut TaggedRecord) {
    let english = data
        .title
        .as_ref()
        .and_then(|t| t.text_english.as_deref())
        .map(String::from);
    if let Some(text) = english {
        if let Some((number_part, title_part)) = text.split_once(':') {
            let circular_number = number_part.replace("MPEC ", "").trim().to_string();

            if let Some(issue) = circular_number.split('-').nth(1) {
                if let Some(caps) = SERIES_PAGE.captures(issue) {
                    let series = caps[1].to_string();
                    let page = caps[2].trim_start_matches('0');
                    let page = if page.is_empty() { "0" } else { page };
                    if let Some(publication) = data.publication.as_mut() {
                        publication.volume_num = Some(series);
                    }
                    match data.pagination.as_mut() {
                        Some(pagination) => pagination.first_page = Some(page.to_string()),
                        None => {
                            data.pagination = Some(Pagination {
                                first_page: Some(page.to_string()),
                                ..Default::default()
                            })
                        }
                    }
                } else {
                    debug!("unrecognized MPEC issue token: {issue}");
                }
            }

            if let Some(title) = data.title.as_mut() {
                title.text_english = Some(title_part.trim().to_string());
            }
            out.publication = Some(format!(
                "Minor Planet Electronic Circ., No. {circular_number}"
            ));
        }
    }

    data.abstract_block = None;

    // drop the stock byline (and unnamed bylines), then fold in the data
    // collectors listed as other contributors
    let mut authors: Vec<_> = data
        .authors
        .drain(..)
        .filter(|a| {
            a.name
                .as_ref()
                .and_then(|n| n.pubraw.as_deref())
                .is_some_and(|pubraw| pubraw != MPC_STAFF_BYLINE)
        })
        .collect();
    authors.extend(data.other_contributor.drain(..).filter_map(|oc| oc.contrib));
    data.authors = authors;
}
