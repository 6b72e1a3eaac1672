//! sitesearch-vector
//!
//! Remote half of the hybrid pipeline: the HTTP vector-space client and
//! the build-time ingestion pipeline that repopulates it.

pub mod client;
pub mod ingest;

pub use client::HttpVectorStore;
pub use ingest::{build_record, ingest_all, ingest_all_sequential};
