//! # GEO Client
//!
//! An async Rust client for querying the NCBI GEO (Gene Expression Omnibus)
//! DataSets index through the Entrez E-utilities API.
//!
//! Two operations are provided, each a single search-then-summarize round
//! trip against the `gds` database:
//!
//! - [`GeoClient::search_datasets`] — search by structured criteria and
//!   return projected dataset records in relevance order
//! - [`GeoClient::get_dataset_detail`] — fetch detailed information for one
//!   dataset by accession, including its sample list
//!
//! ## Quick Start
//!
//! ```no_run
//! use geo_client::{DatasetQuery, GeoClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeoClient::new();
//!
//!     let outcome = client
//!         .search_datasets(
//!             DatasetQuery::new()
//!                 .query("breast cancer")
//!                 .organism("Homo sapiens")
//!                 .limit(5),
//!         )
//!         .await?;
//!
//!     for dataset in &outcome.datasets {
//!         println!("{:?}: {:?}", dataset.accession, dataset.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod geo;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{GeoError, Result};
pub use geo::{
    DatasetDetail, DatasetQuery, DatasetRecord, GeoClient, GeoPlatform, GeoSample, SearchOutcome,
};
