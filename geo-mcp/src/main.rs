use anyhow::Result;
use clap::Parser;
use rmcp::{
    handler::server::wrapper::Parameters, model::*, tool, tool_handler, tool_router,
    transport::stdio, ServerHandler, ServiceExt,
};
use std::sync::Arc;
use tracing::info;

mod tools;
use tools::GeoServer;

#[derive(Parser)]
#[command(name = "geo-mcp", about = "GEO MCP Server")]
struct Args {
    /// HTTP port to listen on (if not set, uses stdio)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tool_router]
impl GeoServer {
    #[tool(
        description = "Search the GEO (Gene Expression Omnibus) database for datasets matching criteria. Supports filtering by organism, platform identifier (e.g., GPL570), and dataset type. Returns accession, title, summary, organism, platform, sample count, publication date, and dataset type for each hit."
    )]
    async fn search_geo(
        &self,
        params: Parameters<tools::search::SearchRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        tools::search::search_geo(self, params).await
    }

    #[tool(
        description = "Get detailed information about a specific GEO dataset by accession (e.g., 'GSE12345'). Includes the platform title, up to 10 sample descriptors, associated PubMed IDs, and the FTP download location."
    )]
    async fn get_geo_details(
        &self,
        params: Parameters<tools::details::DetailsRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        tools::details::get_geo_details(self, params).await
    }
}

#[tool_handler]
impl ServerHandler for GeoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "geo-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "GEO MCP Server - Search and retrieve gene expression datasets from the NCBI Gene Expression Omnibus.".to_string(),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing to stderr to avoid interfering with JSON-RPC on stdout
    // MCP protocol uses stdin/stdout for JSON-RPC messages
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting GEO MCP Server");

    if let Some(port) = args.port {
        let shared_client = Arc::new(geo_client::GeoClient::new());

        use rmcp::transport::streamable_http_server::{
            session::local::LocalSessionManager, StreamableHttpService,
        };
        let service = StreamableHttpService::new(
            move || Ok(GeoServer::new(Arc::clone(&shared_client))),
            LocalSessionManager::default().into(),
            Default::default(),
        );

        let router = axum::Router::new().nest_service("/mcp", service);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        info!("HTTP MCP server listening on port {port}");
        axum::serve(listener, router).await?;
    } else {
        let service = GeoServer::new(Arc::new(geo_client::GeoClient::new()))
            .serve(stdio())
            .await?;
        info!("MCP server initialized, waiting for requests");
        service.waiting().await?;
    }

    Ok(())
}
