//! Dataset detail tool for GEO MCP server

use rmcp::{handler::server::wrapper::Parameters, model::*, schemars};
use serde::Deserialize;
use std::borrow::Cow;
use tracing::{info, warn};

/// Request parameters for the get_geo_details tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DetailsRequest {
    #[schemars(description = "GEO accession of the dataset (e.g., 'GSE12345')")]
    pub accession: String,
}

/// Get detailed information about a specific GEO dataset
pub async fn get_geo_details(
    server: &super::GeoServer,
    Parameters(params): Parameters<DetailsRequest>,
) -> Result<CallToolResult, ErrorData> {
    if params.accession.trim().is_empty() {
        return Err(ErrorData {
            code: ErrorCode(-32602),
            message: Cow::from("A non-empty accession is required"),
            data: None,
        });
    }

    info!(accession = %params.accession, "Fetching GEO dataset details");

    match server.client.get_dataset_detail(&params.accession).await {
        Ok(detail) => super::json_response(&detail),
        Err(e) => {
            warn!(error = %e, "GEO detail fetch failed");
            super::error_response(e)
        }
    }
}
