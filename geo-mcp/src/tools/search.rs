//! Dataset search tool for GEO MCP server

use rmcp::{handler::server::wrapper::Parameters, model::*, schemars};
use serde::Deserialize;
use std::borrow::Cow;
use tracing::{info, warn};

/// Request parameters for the search_geo tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(description = "Free-text search query (e.g., 'breast cancer')")]
    pub query: String,

    #[schemars(description = "Filter by organism name (e.g., 'Homo sapiens')")]
    pub organism: Option<String>,

    #[schemars(description = "Filter by platform identifier (e.g., 'GPL570')")]
    pub platform: Option<String>,

    #[schemars(
        description = "Filter by dataset type (e.g., 'Expression profiling by array')"
    )]
    pub study_type: Option<String>,

    #[schemars(description = "Maximum number of results (default: 10)")]
    pub max_results: Option<usize>,
}

/// Search GEO for datasets matching the given criteria
pub async fn search_geo(
    server: &super::GeoServer,
    Parameters(params): Parameters<SearchRequest>,
) -> Result<CallToolResult, ErrorData> {
    if params.query.trim().is_empty() {
        return Err(ErrorData {
            code: ErrorCode(-32602),
            message: Cow::from("A non-empty query is required"),
            data: None,
        });
    }

    let max_results = params.max_results.unwrap_or(10);
    if max_results == 0 {
        return Err(ErrorData {
            code: ErrorCode(-32602),
            message: Cow::from("max_results must be a positive integer"),
            data: None,
        });
    }

    let mut query = server
        .client
        .search()
        .query(params.query.as_str())
        .limit(max_results);
    if let Some(ref organism) = params.organism {
        query = query.organism(organism.as_str());
    }
    if let Some(ref platform) = params.platform {
        query = query.platform(platform.as_str());
    }
    if let Some(ref study_type) = params.study_type {
        query = query.dataset_type(study_type.as_str());
    }

    info!(
        query = %params.query,
        organism = ?params.organism,
        platform = ?params.platform,
        study_type = ?params.study_type,
        max_results = max_results,
        "Searching GEO datasets"
    );

    match server.client.search_datasets(query).await {
        Ok(outcome) => super::json_response(&outcome),
        Err(e) => {
            warn!(error = %e, "GEO search failed");
            super::error_response(e)
        }
    }
}
