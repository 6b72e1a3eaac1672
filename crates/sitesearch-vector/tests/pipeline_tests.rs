use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use sitesearch_core::error::{Error, Result};
use sitesearch_core::traits::VectorStore;
use sitesearch_core::types::{
    DocumentLists, SearchDocument, SemanticHit, VectorRecord, VersionDocuments,
};
use sitesearch_vector::{ingest_all, ingest_all_sequential};

#[derive(Default)]
struct RecordingStore {
    events: Mutex<Vec<String>>,
    fail_after: Option<usize>,
    ingested: AtomicUsize,
}

#[async_trait::async_trait]
impl VectorStore for RecordingStore {
    async fn ingest(&self, record: VectorRecord) -> Result<()> {
        let n = self.ingested.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after {
            if n >= limit {
                return Err(Error::Build("provider rejected the chunk".into()));
            }
        }
        self.events
            .lock()
            .expect("lock")
            .push(format!("ingest:{}", record.attributes.url));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.events.lock().expect("lock").push("clear".into());
        Ok(())
    }

    async fn lookup(&self, _query: &str, _top_k: usize) -> Result<Vec<SemanticHit>> {
        Ok(vec![])
    }
}

fn title(id: u32, text: &str, url: &str) -> SearchDocument {
    SearchDocument {
        id,
        parent_id: None,
        text: text.to_string(),
        summary: None,
        url: url.to_string(),
        hash: None,
        breadcrumb: vec!["docs".to_string()],
    }
}

fn content(id: u32, parent: u32, url: &str) -> SearchDocument {
    SearchDocument {
        id,
        parent_id: Some(parent),
        text: format!("chunk {id}"),
        summary: None,
        url: url.to_string(),
        hash: None,
        breadcrumb: vec![],
    }
}

fn version(n_pages: u32) -> VersionDocuments {
    let titles = (0..n_pages)
        .map(|i| title(i, &format!("Page {i}"), &format!("/docs/p{i}")))
        .collect();
    let contents = (0..n_pages)
        .map(|i| content(100 + i, i, &format!("/docs/p{i}")))
        .collect();
    VersionDocuments {
        out_dir: PathBuf::from("/tmp/out"),
        lists: DocumentLists {
            titles,
            headings: vec![],
            contents,
        },
    }
}

#[tokio::test]
async fn clear_strictly_precedes_every_ingest_dispatch() {
    let store = RecordingStore::default();
    ingest_all(&store, &[version(5)], 3).await.expect("ingest");

    let events = store.events.lock().expect("lock");
    assert_eq!(events[0], "clear");
    assert_eq!(events.iter().filter(|e| e.starts_with("ingest:")).count(), 5);
    assert_eq!(events.iter().filter(|e| *e == "clear").count(), 1);
}

#[tokio::test]
async fn all_content_chunks_are_submitted_exactly_once() {
    let store = RecordingStore::default();
    ingest_all_sequential(&store, &[version(4)]).await.expect("ingest");

    let events = store.events.lock().expect("lock");
    for i in 0..4 {
        let expected = format!("ingest:/docs/p{i}");
        assert_eq!(events.iter().filter(|e| **e == expected).count(), 1);
    }
}

#[tokio::test]
async fn a_single_ingest_failure_aborts_the_build_step() {
    let store = RecordingStore {
        fail_after: Some(2),
        ..RecordingStore::default()
    };
    let err = ingest_all(&store, &[version(10)], 1)
        .await
        .expect_err("must abort");
    assert!(!err.is_recoverable());
    // Fail-fast: nowhere near all ten chunks were submitted.
    assert!(store.ingested.load(Ordering::SeqCst) < 10);
}
