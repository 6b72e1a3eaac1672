//! Build-time vector-space ingestion.
//!
//! For each site version the target space is cleared first, then every
//! content document is submitted with its owning page's title and
//! breadcrumb attached. Any failure aborts the whole build step: a space
//! that is partially cleared or partially repopulated would silently
//! corrupt future searches, so there is no in-process retry.

use std::collections::HashMap;

use futures::stream::{self, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use sitesearch_core::error::Result;
use sitesearch_core::traits::VectorStore;
use sitesearch_core::types::{
    DocId, SearchDocument, VectorAttributes, VectorRecord, VersionDocuments,
};

/// Build the ingestion payload for one content document.
///
/// The owning title document is resolved through `titles_by_id`; a missing
/// parent yields `page_title = None, breadcrumb = None` rather than an
/// error.
pub fn build_record(
    content: &SearchDocument,
    titles_by_id: &HashMap<DocId, &SearchDocument>,
) -> VectorRecord {
    let title_doc = content.parent_id.and_then(|p| titles_by_id.get(&p));
    VectorRecord {
        data: content.text.clone(),
        attributes: VectorAttributes {
            data: content.text.clone(),
            title: content.summary.clone(),
            url: content.url.clone(),
            hash: content.hash.clone(),
            page_title: title_doc.map(|t| t.text.clone()),
            breadcrumb: title_doc.map(|t| t.breadcrumb.clone()),
        },
    }
}

/// Ingest every version's content documents, clearing the space once up
/// front. The clear is a hard ordering barrier: no ingest call is
/// dispatched until it has completed. Individual ingest calls have no
/// mutual ordering dependency and run concurrently up to `concurrency`,
/// but all of them must succeed for the step to succeed.
pub async fn ingest_all(
    store: &dyn VectorStore,
    versions: &[VersionDocuments],
    concurrency: usize,
) -> Result<()> {
    store.clear().await?;

    for version in versions {
        let titles_by_id: HashMap<DocId, &SearchDocument> =
            version.lists.titles.iter().map(|t| (t.id, t)).collect();
        let records: Vec<VectorRecord> = version
            .lists
            .contents
            .iter()
            .map(|c| build_record(c, &titles_by_id))
            .collect();

        info!(
            out_dir = %version.out_dir.display(),
            chunks = records.len(),
            "ingesting content chunks"
        );
        let pb = ProgressBar::new(records.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%)")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        stream::iter(records.into_iter().map(Ok))
            .try_for_each_concurrent(concurrency.max(1), |record| {
                let pb = pb.clone();
                async move {
                    store.ingest(record).await?;
                    pb.inc(1);
                    Ok(())
                }
            })
            .await?;
        pb.finish_and_clear();
    }
    Ok(())
}

/// Sequential variant used where deterministic call order matters more
/// than throughput (for example under a provider rate limit).
pub async fn ingest_all_sequential(
    store: &dyn VectorStore,
    versions: &[VersionDocuments],
) -> Result<()> {
    store.clear().await?;
    for version in versions {
        let titles_by_id: HashMap<DocId, &SearchDocument> =
            version.lists.titles.iter().map(|t| (t.id, t)).collect();
        let mut submitted = 0usize;
        for content in &version.lists.contents {
            store.ingest(build_record(content, &titles_by_id)).await?;
            submitted += 1;
        }
        info!(
            out_dir = %version.out_dir.display(),
            chunks = submitted,
            "ingested content chunks"
        );
    }
    Ok(())
}
