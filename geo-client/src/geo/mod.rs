//! GEO DataSets API client, query builder, and output models

pub mod client;
pub mod models;
pub mod query;

pub use client::GeoClient;
pub use models::{DatasetDetail, DatasetRecord, GeoPlatform, GeoSample, SearchOutcome};
pub use query::DatasetQuery;
