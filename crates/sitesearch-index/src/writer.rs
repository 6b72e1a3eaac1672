//! Builds and writes one index file per partition into a version's output
//! directory.

use std::path::PathBuf;

use sitesearch_core::config::SearchConfig;
use sitesearch_core::error::{Error, Result};
use sitesearch_core::traits::IndexBuilder;
use sitesearch_core::types::VersionDocuments;
use tracing::debug;

use crate::partition::{index_file_name, partition};

/// Partition one version's scan, run the builder once per partition and
/// write each result as a UTF-8 JSON file. Returns the written paths.
/// Any builder or I/O failure aborts the build step.
pub fn write_version_indexes(
    version: &VersionDocuments,
    base_url: &str,
    config: &SearchConfig,
    builder: &dyn IndexBuilder,
) -> Result<Vec<PathBuf>> {
    let map = partition(
        &version.lists,
        config.search_context_by_paths.as_deref(),
        base_url,
        &config.context_policy,
    );

    let mut written = Vec::with_capacity(map.len());
    for (key, groups) in &map {
        let index = builder.build(groups)?;
        let serialized = serde_json::to_string(&index)
            .map_err(|e| Error::Build(format!("serialize index (/{key}): {e}")))?;
        let path = version
            .out_dir
            .join(index_file_name(&config.search_index_filename, key));
        debug!(partition = %key, path = %path.display(), "writing index to disk");
        std::fs::write(&path, serialized)
            .map_err(|e| Error::Build(format!("write index {}: {e}", path.display())))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesearch_core::types::{DocumentLists, SearchDocument};

    fn doc(id: u32, url: &str) -> SearchDocument {
        SearchDocument {
            id,
            parent_id: None,
            text: format!("text {id}"),
            summary: None,
            url: url.to_string(),
            hash: None,
            breadcrumb: vec![],
        }
    }

    fn config_with_contexts(contexts: Option<Vec<String>>) -> SearchConfig {
        SearchConfig {
            vector_space_id: "docs".into(),
            provider_url: "https://vectors.example.com".into(),
            search_context_by_paths: contexts,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn writes_one_file_per_partition() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let version = VersionDocuments {
            out_dir: tmp.path().to_path_buf(),
            lists: DocumentLists {
                titles: vec![doc(1, "/site/guides/a"), doc(2, "/site/blog/b")],
                headings: vec![],
                contents: vec![],
            },
        };
        let config = config_with_contexts(Some(vec!["guides".into()]));
        let builder = crate::builder::BasicIndexBuilder::new();
        let written =
            write_version_indexes(&version, "/site/", &config, &builder).expect("write");

        assert_eq!(written.len(), 2);
        assert!(tmp.path().join("search-index.json").is_file());
        assert!(tmp.path().join("search-index-guides.json").is_file());
    }

    #[test]
    fn root_only_when_no_contexts_configured() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let version = VersionDocuments {
            out_dir: tmp.path().to_path_buf(),
            lists: DocumentLists {
                titles: vec![doc(1, "/site/guides/a")],
                headings: vec![],
                contents: vec![],
            },
        };
        let config = config_with_contexts(None);
        let builder = crate::builder::BasicIndexBuilder::new();
        let written =
            write_version_indexes(&version, "/site/", &config, &builder).expect("write");
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("search-index.json"));
    }
}
