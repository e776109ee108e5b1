//! Client for the NCBI GEO DataSets (`gds`) E-utilities API
//!
//! Every public operation is a single search-then-summarize round trip:
//! an ESearch call discovers opaque numeric UIDs, an ESummary call fetches
//! the records for those UIDs, and the results are projected into the
//! stable output shapes in [`crate::geo::models`].

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{GeoError, Result};
use crate::geo::models::{DatasetDetail, DatasetRecord, SearchOutcome};
use crate::geo::query::DatasetQuery;

/// Entrez database holding GEO DataSets records
const GDS_DB: &str = "gds";

/// Client for interacting with the GEO DataSets API
#[derive(Clone)]
pub struct GeoClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl GeoClient {
    /// Create a new GEO client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use geo_client::GeoClient;
    ///
    /// let client = GeoClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new GEO client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use geo_client::{ClientConfig, GeoClient};
    ///
    /// let config = ClientConfig::new().with_tool("my-pipeline");
    /// let client = GeoClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.effective_base_url().to_string(),
            client,
            config,
        }
    }

    /// Create a new GEO client with a custom HTTP client and default
    /// configuration
    pub fn with_client(client: Client) -> Self {
        let config = ClientConfig::new();
        Self {
            base_url: config.effective_base_url().to_string(),
            client,
            config,
        }
    }

    /// Create a dataset query builder
    pub fn search(&self) -> DatasetQuery {
        DatasetQuery::new()
    }

    /// Search GEO for datasets matching the compiled query
    ///
    /// Compiles the query, runs the search-then-summarize round trip, and
    /// returns the projected records in the order the search ranked them.
    /// An empty hit list is a normal outcome carrying an explanatory
    /// message, not an error. UIDs the summary response does not cover are
    /// skipped silently.
    ///
    /// # Errors
    ///
    /// * `GeoError::RequestError` - If either HTTP request fails
    /// * `GeoError::JsonError` - If a response body is not valid JSON
    /// * `GeoError::RemoteError` - If a response carries an `error` field
    ///
    /// # Example
    ///
    /// ```no_run
    /// use geo_client::{DatasetQuery, GeoClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = GeoClient::new();
    ///     let outcome = client
    ///         .search_datasets(
    ///             DatasetQuery::new()
    ///                 .query("cancer")
    ///                 .organism("human")
    ///                 .limit(5),
    ///         )
    ///         .await?;
    ///
    ///     println!("Found {} datasets", outcome.count);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, query))]
    pub async fn search_datasets(&self, query: DatasetQuery) -> Result<SearchOutcome> {
        let term = query.build();
        let retmax = query.get_limit();

        info!(query = %term, max_results = retmax, "Searching GEO datasets");

        let search_data = self.esearch(&term, retmax).await?;
        let id_list = extract_id_list(&search_data);

        if id_list.is_empty() {
            info!("Search matched no datasets");
            return Ok(SearchOutcome {
                count: 0,
                datasets: Vec::new(),
                query: None,
                message: Some("No datasets found matching the criteria".to_string()),
            });
        }

        let summary_data = self.esummary(&id_list).await?;

        // Project in the search's relevance order, not summary key order
        let mut datasets = Vec::with_capacity(id_list.len());
        for uid in &id_list {
            if let Some(record) = summary_record(&summary_data, uid) {
                datasets.push(DatasetRecord::from_summary(record));
            } else {
                debug!(uid = %uid, "Search hit missing from summary response, skipping");
            }
        }

        info!(
            hits = id_list.len(),
            projected = datasets.len(),
            "Search completed"
        );

        Ok(SearchOutcome {
            count: datasets.len(),
            datasets,
            query: Some(term),
            message: None,
        })
    }

    /// Get detailed information about a specific GEO dataset by accession
    ///
    /// # Errors
    ///
    /// * `GeoError::DatasetNotFound` - If the accession matches no record
    /// * `GeoError::DetailUnavailable` - If the summary response has no
    ///   record for the discovered UID
    /// * `GeoError::RequestError` / `GeoError::JsonError` /
    ///   `GeoError::RemoteError` - As for [`search_datasets`](Self::search_datasets)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use geo_client::GeoClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = GeoClient::new();
    ///     let detail = client.get_dataset_detail("GSE12345").await?;
    ///     println!("{:?}: {} samples", detail.title, detail.samples.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(accession = %accession))]
    pub async fn get_dataset_detail(&self, accession: &str) -> Result<DatasetDetail> {
        let term = DatasetQuery::new().accession(accession).build();

        // Only the first hit is used, so cap the search at one
        let search_data = self.esearch(&term, 1).await?;
        let id_list = extract_id_list(&search_data);

        let Some(uid) = id_list.first() else {
            warn!("No search hit for accession");
            return Err(GeoError::DatasetNotFound {
                accession: accession.to_string(),
            });
        };

        let summary_data = self.esummary(std::slice::from_ref(uid)).await?;

        let Some(record) = summary_record(&summary_data, uid) else {
            warn!(uid = %uid, "Summary response missing record for search hit");
            return Err(GeoError::DetailUnavailable {
                accession: accession.to_string(),
            });
        };

        info!(uid = %uid, "Retrieved dataset detail");
        Ok(DatasetDetail::from_summary(accession, record))
    }

    /// Issue an ESearch request against the `gds` database
    async fn esearch(&self, term: &str, retmax: usize) -> Result<Value> {
        let url = format!(
            "{}/esearch.fcgi?db={}&term={}&retmax={}&retmode=json",
            self.base_url,
            GDS_DB,
            urlencoding::encode(term),
            retmax
        );

        debug!("Making ESearch API request");
        self.fetch_json(&url).await
    }

    /// Issue an ESummary request for the given UIDs
    async fn esummary(&self, uids: &[String]) -> Result<Value> {
        let url = format!(
            "{}/esummary.fcgi?db={}&id={}&retmode=json",
            self.base_url,
            GDS_DB,
            uids.join(",")
        );

        debug!(uid_count = uids.len(), "Making ESummary API request");
        self.fetch_json(&url).await
    }

    /// Perform one GET and normalize its failure modes
    ///
    /// Non-success HTTP statuses, unparseable bodies, and an application
    /// level `error` field in the parsed body all surface as `GeoError`
    /// values; nothing panics. One attempt only, no retry.
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let mut url = url.to_string();
        for (key, value) in self.config.build_api_params() {
            url.push('&');
            url.push_str(&key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "API request failed");
            return Err(GeoError::ApiError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)?;

        if let Some(message) = data.get("error").and_then(Value::as_str) {
            warn!(message = %message, "API response carried an error field");
            return Err(GeoError::RemoteError {
                message: message.to_string(),
            });
        }

        Ok(data)
    }
}

impl Default for GeoClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the UID list out of an ESearch response
///
/// Any level of the `esearchresult.idlist` path may be absent or of the
/// wrong shape; all of those cases yield an empty list.
fn extract_id_list(search_data: &Value) -> Vec<String> {
    search_data
        .pointer("/esearchresult/idlist")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Look up the summary record for one UID in an ESummary response
fn summary_record<'a>(summary_data: &'a Value, uid: &str) -> Option<&'a Value> {
    summary_data
        .get("result")
        .and_then(|result| result.get(uid))
}
