//! Input metadata model produced by the upstream document parser.
//!
//! Every field is optional or defaults to empty: upstream parsers emit whatever
//! they could recover from a document, and the translator is expected to cope
//! with any subset. Field renames track the parser's camelCase wire keys, so a
//! record can be deserialized straight from the parser's JSON output.
//!
//! The translator reads these structures; only the venue special-case rewriter
//! mutates them, and it operates on the translator's private copy.

use serde::{Deserialize, Serialize};

/// A parsed document's bibliographic metadata, as handed over by the upstream parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestRecord {
    pub title: Option<TitleBlock>,
    pub subtitle: Option<String>,
    pub authors: Vec<Contributor>,
    /// Non-author contributors; consumed only by venue-specific rewrites.
    #[serde(rename = "otherContributor")]
    pub other_contributor: Vec<OtherContributor>,
    #[serde(rename = "abstract")]
    pub abstract_block: Option<AbstractBlock>,
    pub keywords: Vec<Keyword>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<PubDate>,
    #[serde(rename = "persistentIDs")]
    pub persistent_ids: Vec<PersistentId>,
    #[serde(rename = "openAccess")]
    pub open_access: Option<OpenAccess>,
    /// Opaque reference entries; their format belongs to the serializer.
    pub references: Vec<String>,
    pub publication: Option<Publication>,
    pub pagination: Option<Pagination>,
}

/// Title in English and/or the document's native language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleBlock {
    pub text_english: Option<String>,
    pub text_native: Option<String>,
    pub lang_native: Option<String>,
}

/// One entry of the contributor list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contributor {
    pub name: Option<ContributorName>,
    pub attrib: Option<ContributorAttrib>,
    pub affiliation: Vec<Affiliation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributorName {
    pub surname: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    /// Byline exactly as printed by the publisher.
    pub pubraw: Option<String>,
    /// Collaboration name for group authorship.
    pub collab: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributorAttrib {
    pub orcid: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Affiliation {
    pub aff_pub_raw: Option<String>,
}

/// Wrapper around a contributor appearing outside the author list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherContributor {
    pub contrib: Option<Contributor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbstractBlock {
    pub text_english: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Keyword {
    pub key_string: Option<String>,
}

/// Publication dates of varying precision: `YYYY`, `YYYY-MM`, or `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PubDate {
    pub print_date: Option<String>,
    pub electr_date: Option<String>,
    pub other_date: Vec<OtherDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtherDate {
    pub other_date_type: Option<String>,
    pub other_date_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistentId {
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAccess {
    pub open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Publication {
    pub pub_name: Option<String>,
    pub pub_year: Option<String>,
    pub volume_num: Option<String>,
    pub issue_num: Option<String>,
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page_range: Option<String>,
    pub page_count: Option<String>,
    #[serde(rename = "electronicID")]
    pub electronic_id: Option<String>,
    pub first_page: Option<String>,
    pub last_page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_parser_output() {
        let json = r#"{
            "title": {"textEnglish": "An Example", "langNative": null},
            "authors": [
                {
                    "name": {"surname": "Smith", "given_name": "Jane"},
                    "attrib": {"orcid": "0000-0001-2345-6789"},
                    "affiliation": [{"affPubRaw": "Example University"}]
                }
            ],
            "pubDate": {"printDate": "2020-06-15"},
            "persistentIDs": [{"DOI": "10.1000/example"}],
            "openAccess": {"open": true},
            "publication": {"pubName": "ApJ", "volumeNum": "900"},
            "pagination": {"firstPage": "45", "lastPage": "50", "electronicID": "e12"}
        }"#;
        let record: IngestRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.title.as_ref().unwrap().text_english.as_deref(),
            Some("An Example")
        );
        let author = &record.authors[0];
        assert_eq!(
            author.name.as_ref().unwrap().surname.as_deref(),
            Some("Smith")
        );
        assert_eq!(
            author.affiliation[0].aff_pub_raw.as_deref(),
            Some("Example University")
        );
        assert_eq!(
            record.pub_date.as_ref().unwrap().print_date.as_deref(),
            Some("2020-06-15")
        );
        assert_eq!(record.persistent_ids[0].doi.as_deref(), Some("10.1000/example"));
        assert!(record.open_access.as_ref().unwrap().open);
        assert_eq!(
            record.pagination.as_ref().unwrap().electronic_id.as_deref(),
            Some("e12")
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record: IngestRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, IngestRecord::default());
        assert!(record.authors.is_empty());
        assert!(record.references.is_empty());
    }
}
