//! Output shapes for GEO dataset queries and projection from raw ESummary
//! records
//!
//! ESummary records for the `gds` database are heterogeneous; any field may
//! be absent. Projection therefore reads every field defensively and maps a
//! missing vendor field to `None`, never to an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// FTP base for GEO series directories
const GEO_FTP_BASE: &str = "https://ftp.ncbi.nlm.nih.gov/geo/series";

/// A dataset row in search results
///
/// Every field is optional; a record missing a vendor field surfaces it as
/// `null` in the serialized output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub accession: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub organism: Option<String>,
    pub platform: Option<String>,
    pub samples: Option<u64>,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub dataset_type: Option<String>,
}

impl DatasetRecord {
    /// Project a raw ESummary record into the search-result shape
    pub fn from_summary(record: &Value) -> Self {
        Self {
            accession: str_field(record, "accession"),
            title: str_field(record, "title"),
            summary: str_field(record, "summary"),
            organism: str_field(record, "taxon"),
            platform: str_field(record, "gpl"),
            samples: u64_field(record, "n_samples"),
            date: str_field(record, "pdat"),
            dataset_type: str_field(record, "gdstype"),
        }
    }
}

/// Platform accession and title nested in a dataset detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPlatform {
    pub accession: Option<String>,
    pub title: Option<String>,
}

/// One sample descriptor nested in a dataset detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoSample {
    pub accession: Option<String>,
    pub title: Option<String>,
}

/// Detailed information about a single GEO dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDetail {
    pub accession: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub organism: Option<String>,
    pub platform: GeoPlatform,
    #[serde(rename = "type")]
    pub dataset_type: Option<String>,
    pub publication_date: Option<String>,
    /// Read from the vendor `suppfile` field; the upstream service labels
    /// this an update date even though the field name suggests otherwise
    pub update_date: Option<String>,
    pub sample_count: Option<u64>,
    pub samples: Vec<GeoSample>,
    pub pubmed_ids: Vec<Value>,
    pub ftp_link: String,
}

/// Maximum number of sample descriptors carried in a detail record
const MAX_SAMPLES: usize = 10;

impl DatasetDetail {
    /// Project a raw ESummary record into the detail shape
    ///
    /// `accession` is the accession the caller asked for; it seeds the
    /// derived FTP link while the output `accession` field still reads from
    /// the record itself. The nested sample list is truncated to the first
    /// ten entries.
    pub fn from_summary(accession: &str, record: &Value) -> Self {
        let samples = record
            .get("samples")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .take(MAX_SAMPLES)
                    .map(|sample| GeoSample {
                        accession: str_field(sample, "accession"),
                        title: str_field(sample, "title"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            accession: str_field(record, "accession"),
            title: str_field(record, "title"),
            summary: str_field(record, "summary"),
            organism: str_field(record, "taxon"),
            platform: GeoPlatform {
                accession: str_field(record, "gpl"),
                title: str_field(record, "platformtitle"),
            },
            dataset_type: str_field(record, "gdstype"),
            publication_date: str_field(record, "pdat"),
            update_date: str_field(record, "suppfile"),
            sample_count: u64_field(record, "n_samples"),
            samples,
            pubmed_ids: record
                .get("pubmedids")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            ftp_link: ftp_link(accession),
        }
    }
}

/// Outcome of a dataset search
///
/// Serializes to one of two shapes: `{count, datasets, query}` when the
/// search produced results, or `{count: 0, datasets: [], message}` when it
/// matched nothing (a normal outcome, not a failure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub count: usize,
    pub datasets: Vec<DatasetRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Derive the FTP directory for a series accession
///
/// GEO groups series directories by dropping the last three characters of
/// the accession (`GSE12345` lives under `GSE12nnn/`). Accessions shorter
/// than three characters or not following the series convention yield a
/// malformed but harmless URL; this is a known edge of the upstream layout,
/// not something the client corrects.
pub fn ftp_link(accession: &str) -> String {
    let prefix = accession
        .get(..accession.len().saturating_sub(3))
        .unwrap_or("");
    format!("{}/{}nnn/{}/", GEO_FTP_BASE, prefix, accession)
}

fn str_field(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u64_field(record: &Value, key: &str) -> Option<u64> {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_u64(),
        // Some ESummary payloads carry counts as strings
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}
