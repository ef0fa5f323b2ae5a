//! Assembly of the free-text publication string.
//!
//! The string is built as an ordered list of clauses joined with `", "`, so the
//! first present clause needs no leading separator and every later one gets it
//! for free. Clause order is fixed: journal name, volume (or the Oxford
//! University Press "Advance Access" special case), issue, pagination, page
//! count.

use crate::TaggedRecord;
use crate::ingest::IngestRecord;

pub(super) fn assemble(data: &IngestRecord, out: &mut TaggedRecord) {
    // venue special handling may have set the publication string already
    if out.publication.is_some() {
        return;
    }

    let mut clauses: Vec<String> = Vec::new();

    if let Some(publication) = &data.publication {
        if let Some(journal) = &publication.pub_name {
            clauses.push(journal.clone());
        }
        if let Some(volume) = &publication.volume_num {
            clauses.push(format!("Volume {volume}"));
        } else if let Some(publisher) = &publication.publisher {
            // OUP posts articles online ahead of volume assignment
            if publisher == "OUP" || publisher == "Oxford University Press" {
                clauses.push("Advance Access".to_string());
            }
        }
        if let Some(issue) = &publication.issue_num {
            clauses.push(format!("Issue {issue}"));
        }
    }

    if let Some(pagination) = &data.pagination {
        let range = pagination.page_range.clone().or_else(|| {
            match (&pagination.first_page, &pagination.last_page) {
                (Some(first), Some(last)) => Some(format!("{first}-{last}")),
                _ => None,
            }
        });
        if let Some(range) = range {
            clauses.push(format!("pp. {range}"));
        } else if let Some(first) = &pagination.first_page {
            // a lone first page only qualifies an existing string
            if !clauses.is_empty() {
                clauses.push(format!("page {first}"));
            }
        } else if let Some(idno) = &pagination.electronic_id {
            clauses.push(format!("id.{idno}"));
        }
        if let Some(count) = &pagination.page_count {
            clauses.push(format!("{count} pp."));
        }
    }

    if !clauses.is_empty() {
        out.publication = Some(clauses.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{Pagination, Publication};
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn run(publication: Option<Publication>, pagination: Option<Pagination>) -> Option<String> {
        let data = IngestRecord {
            publication,
            pagination,
            ..Default::default()
        };
        let mut out = TaggedRecord::default();
        assemble(&data, &mut out);
        out.publication
    }

    #[test]
    fn test_journal_volume_issue_pages() {
        let result = run(
            Some(Publication {
                pub_name: Some("ApJ".into()),
                volume_num: Some("900".into()),
                issue_num: Some("2".into()),
                ..Default::default()
            }),
            Some(Pagination {
                first_page: Some("45".into()),
                last_page: Some("50".into()),
                ..Default::default()
            }),
        );
        assert_eq!(result.as_deref(), Some("ApJ, Volume 900, Issue 2, pp. 45-50"));
    }

    #[rstest]
    #[case("OUP")]
    #[case("Oxford University Press")]
    fn test_oup_advance_access(#[case] publisher: &str) {
        let result = run(
            Some(Publication {
                pub_name: Some("MNRAS".into()),
                publisher: Some(publisher.into()),
                ..Default::default()
            }),
            None,
        );
        assert_eq!(result.as_deref(), Some("MNRAS, Advance Access"));
    }

    #[test]
    fn test_volume_suppresses_advance_access() {
        let result = run(
            Some(Publication {
                pub_name: Some("MNRAS".into()),
                volume_num: Some("512".into()),
                publisher: Some("OUP".into()),
                ..Default::default()
            }),
            None,
        );
        assert_eq!(result.as_deref(), Some("MNRAS, Volume 512"));
    }

    #[test]
    fn test_explicit_page_range_wins_over_first_last() {
        let result = run(
            Some(Publication {
                pub_name: Some("ApJ".into()),
                ..Default::default()
            }),
            Some(Pagination {
                page_range: Some("100-110".into()),
                first_page: Some("45".into()),
                last_page: Some("50".into()),
                ..Default::default()
            }),
        );
        assert_eq!(result.as_deref(), Some("ApJ, pp. 100-110"));
    }

    #[test]
    fn test_lone_first_page_needs_preceding_clause() {
        let with_journal = run(
            Some(Publication {
                pub_name: Some("ApJ".into()),
                ..Default::default()
            }),
            Some(Pagination {
                first_page: Some("45".into()),
                ..Default::default()
            }),
        );
        assert_eq!(with_journal.as_deref(), Some("ApJ, page 45"));

        let alone = run(
            None,
            Some(Pagination {
                first_page: Some("45".into()),
                ..Default::default()
            }),
        );
        assert_eq!(alone, None);
    }

    #[test]
    fn test_electronic_id_fallback() {
        let result = run(
            Some(Publication {
                pub_name: Some("ApJ".into()),
                volume_num: Some("900".into()),
                ..Default::default()
            }),
            Some(Pagination {
                electronic_id: Some("L17".into()),
                ..Default::default()
            }),
        );
        assert_eq!(result.as_deref(), Some("ApJ, Volume 900, id.L17"));
    }

    #[test]
    fn test_page_count_always_appended() {
        let result = run(
            Some(Publication {
                pub_name: Some("ApJ".into()),
                ..Default::default()
            }),
            Some(Pagination {
                page_range: Some("45-50".into()),
                page_count: Some("6".into()),
                ..Default::default()
            }),
        );
        assert_eq!(result.as_deref(), Some("ApJ, pp. 45-50, 6 pp."));

        let count_only = run(
            None,
            Some(Pagination {
                page_count: Some("12".into()),
                ..Default::default()
            }),
        );
        assert_eq!(count_only.as_deref(), Some("12 pp."));
    }

    #[test]
    fn test_preset_publication_is_never_overwritten() {
        let data = IngestRecord {
            publication: Some(Publication {
                pub_name: Some("ApJ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut out = TaggedRecord {
            publication: Some("Minor Planet Electronic Circ., No. 2023-A12".into()),
            ..Default::default()
        };
        assemble(&data, &mut out);
        assert_eq!(
            out.publication.as_deref(),
            Some("Minor Planet Electronic Circ., No. 2023-A12")
        );
    }

    #[test]
    fn test_nothing_to_assemble() {
        assert_eq!(run(None, None), None);
    }
}
