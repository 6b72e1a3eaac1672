//! Helpers shared by the sitesearch binaries.

pub mod scan;
