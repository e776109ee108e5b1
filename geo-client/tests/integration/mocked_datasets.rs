//! Integration tests for the GEO search-then-summarize round trip
//!
//! These tests run the full client pipeline against a wiremock server and
//! verify query compilation, ID correlation, projection, and the error
//! taxonomy without touching the real NCBI endpoints.

use geo_client::{ClientConfig, DatasetQuery, GeoClient, GeoError};
use serde_json::json;
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: JSON response from ESearch with the given UID list
fn esearch_json_response(uids: &[&str]) -> String {
    json!({
        "esearchresult": {
            "count": uids.len().to_string(),
            "retmax": uids.len().to_string(),
            "retstart": "0",
            "idlist": uids,
        }
    })
    .to_string()
}

/// Helper: one gds ESummary record with the standard vendor fields
fn gds_record(uid: &str, accession: &str) -> serde_json::Value {
    json!({
        "uid": uid,
        "accession": accession,
        "title": format!("Study {}", accession),
        "summary": "Expression profiling study",
        "taxon": "Homo sapiens",
        "gpl": "570",
        "n_samples": 6,
        "pdat": "2021/03/01",
        "gdstype": "Expression profiling by array",
    })
}

/// Helper: JSON response from ESummary for the given records
fn esummary_json_response(records: &[(&str, serde_json::Value)]) -> String {
    let mut result = serde_json::Map::new();
    result.insert(
        "uids".to_string(),
        json!(records.iter().map(|(uid, _)| *uid).collect::<Vec<_>>()),
    );
    for (uid, record) in records {
        result.insert(uid.to_string(), record.clone());
    }
    json!({ "result": result }).to_string()
}

/// Helper: create a GeoClient pointing at the mock server
fn create_test_client(base_url: &str) -> GeoClient {
    let config = ClientConfig::new()
        .with_base_url(base_url)
        .with_tool("geo-client-test");
    GeoClient::with_config(config)
}

#[tokio::test]
#[traced_test]
async fn test_search_round_trip_projects_in_search_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "gds"))
        .and(query_param("term", "cancer AND \"human\"[Organism]"))
        .and(query_param("retmax", "5"))
        .and(query_param("retmode", "json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_json_response(&["1", "2"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("db", "gds"))
        .and(query_param("id", "1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esummary_json_response(&[
            ("2", gds_record("2", "GSE200")),
            ("1", gds_record("1", "GSE100")),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let outcome = client
        .search_datasets(
            DatasetQuery::new()
                .query("cancer")
                .organism("human")
                .limit(5),
        )
        .await
        .unwrap();

    assert_eq!(outcome.count, 2);
    assert_eq!(outcome.query.as_deref(), Some("cancer AND \"human\"[Organism]"));
    assert!(outcome.message.is_none());
    // Search order wins over summary key order
    assert_eq!(outcome.datasets[0].accession.as_deref(), Some("GSE100"));
    assert_eq!(outcome.datasets[1].accession.as_deref(), Some("GSE200"));
}

#[tokio::test]
#[traced_test]
async fn test_search_with_empty_id_list_is_a_normal_outcome() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No hits means no summary call at all
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let outcome = client
        .search_datasets(DatasetQuery::new().query("no such thing"))
        .await
        .unwrap();

    assert_eq!(outcome.count, 0);
    assert!(outcome.datasets.is_empty());
    assert!(outcome.query.is_none());
    assert_eq!(
        outcome.message.as_deref(),
        Some("No datasets found matching the criteria")
    );
}

#[tokio::test]
#[traced_test]
async fn test_search_skips_ids_missing_from_summary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_json_response(&["3", "1", "2"])),
        )
        .mount(&mock_server)
        .await;

    // UID 3 never shows up in the summary response
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("id", "3,1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esummary_json_response(&[
            ("1", gds_record("1", "GSE100")),
            ("2", gds_record("2", "GSE200")),
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let outcome = client
        .search_datasets(DatasetQuery::new().query("cancer"))
        .await
        .unwrap();

    assert_eq!(outcome.count, 2);
    assert_eq!(outcome.datasets[0].accession.as_deref(), Some("GSE100"));
    assert_eq!(outcome.datasets[1].accession.as_deref(), Some("GSE200"));
}

#[tokio::test]
#[traced_test]
async fn test_search_surfaces_remote_error_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(json!({"error": "Invalid db name specified"}).to_string()),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client
        .search_datasets(DatasetQuery::new().query("cancer"))
        .await;

    match result {
        Err(GeoError::RemoteError { message }) => {
            assert_eq!(message, "Invalid db name specified");
        }
        other => panic!("Expected RemoteError, got {:?}", other.map(|o| o.count)),
    }
}

#[tokio::test]
#[traced_test]
async fn test_search_surfaces_non_json_body_as_parse_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client
        .search_datasets(DatasetQuery::new().query("cancer"))
        .await;

    assert!(matches!(result, Err(GeoError::JsonError(_))));
}

#[tokio::test]
#[traced_test]
async fn test_search_surfaces_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client
        .search_datasets(DatasetQuery::new().query("cancer"))
        .await;

    match result {
        Err(GeoError::ApiError { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected ApiError, got {:?}", other.map(|o| o.count)),
    }
}

#[tokio::test]
#[traced_test]
async fn test_search_propagates_summary_failure_unchanged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_json_response(&["1"])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client
        .search_datasets(DatasetQuery::new().query("cancer"))
        .await;

    // Found IDs do not soften a failed summary call
    match result {
        Err(GeoError::ApiError { status, .. }) => assert_eq!(status, 502),
        other => panic!("Expected ApiError, got {:?}", other.map(|o| o.count)),
    }
}

#[tokio::test]
#[traced_test]
async fn test_detail_round_trip_with_sample_truncation() {
    let mock_server = MockServer::start().await;

    let samples: Vec<serde_json::Value> = (0..12)
        .map(|i| json!({"accession": format!("GSM{}", i), "title": format!("replicate {}", i)}))
        .collect();
    let mut record = gds_record("200012345", "GSE12345");
    record["samples"] = json!(samples);
    record["platformtitle"] = json!("Affymetrix Human Genome U133 Plus 2.0 Array");
    record["pubmedids"] = json!([19137005, 21057496]);
    record["suppfile"] = json!("GSE12345_RAW.tar");

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", "GSE12345[Accession]"))
        .and(query_param("retmax", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_json_response(&["200012345"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("id", "200012345"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esummary_json_response(&[("200012345", record)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let detail = client.get_dataset_detail("GSE12345").await.unwrap();

    assert_eq!(detail.accession.as_deref(), Some("GSE12345"));
    assert_eq!(detail.samples.len(), 10);
    assert_eq!(detail.samples[0].accession.as_deref(), Some("GSM0"));
    assert_eq!(
        detail.platform.title.as_deref(),
        Some("Affymetrix Human Genome U133 Plus 2.0 Array")
    );
    assert_eq!(detail.update_date.as_deref(), Some("GSE12345_RAW.tar"));
    assert_eq!(detail.pubmed_ids.len(), 2);
    assert_eq!(
        detail.ftp_link,
        "https://ftp.ncbi.nlm.nih.gov/geo/series/GSE12nnn/GSE12345/"
    );
}

#[tokio::test]
#[traced_test]
async fn test_detail_not_found_names_the_accession() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(&[])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.get_dataset_detail("GSE99999").await;

    match result {
        Err(GeoError::DatasetNotFound { accession }) => assert_eq!(accession, "GSE99999"),
        other => panic!("Expected DatasetNotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
#[traced_test]
async fn test_detail_summary_gap_is_detail_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_json_response(&["200012345"])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esummary_json_response(&[])),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.get_dataset_detail("GSE12345").await;

    assert!(matches!(
        result,
        Err(GeoError::DetailUnavailable { accession }) if accession == "GSE12345"
    ));
}
