//! sitesearch-index
//!
//! Build-time half of the keyword channel: partition a scan by search
//! context, build one token index per partition and write it to the
//! version's output directory.

pub mod builder;
pub mod partition;
pub mod writer;

pub use builder::{BasicIndexBuilder, BasicKeywordSearcher};
pub use partition::{index_file_name, partition, PartitionMap};
pub use writer::write_version_indexes;
