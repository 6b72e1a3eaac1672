//! Query-time coordination of the two result channels.
//!
//! The keyword channel is synchronous against an index already in memory.
//! The semantic channel sits behind a single-slot 500 ms debounce timer and
//! a monotonically increasing request sequence number: a response is applied
//! only if its sequence number still matches the latest issued request, so
//! a stale response can never race ahead of a fresh one. Superseded
//! in-flight lookups are not aborted at the transport level; their results
//! are discarded on arrival. Only a timer that has not yet fired is
//! actually cancelled.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use sitesearch_core::config::RankBy;
use sitesearch_core::traits::{KeywordSearcher, VectorStore};
use sitesearch_core::types::{AggregatedResult, LocalHit};

use crate::aggregate::aggregate;

pub const SEMANTIC_DEBOUNCE: Duration = Duration::from_millis(500);
const LOCAL_LIMIT: usize = 100;

/// Result state for one page view. Mutated only by the dispatcher; an
/// empty query resets it synchronously.
#[derive(Debug, Clone, Default)]
pub struct SearchQueryState {
    pub query: String,
    pub local: Option<Vec<LocalHit>>,
    pub semantic: Vec<AggregatedResult>,
    /// True while a semantic request for the current query is in flight.
    pub loading_semantic: bool,
}

struct Pending {
    handle: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

pub struct QueryDispatcher {
    keyword: Arc<dyn KeywordSearcher>,
    store: Arc<dyn VectorStore>,
    rank_by: RankBy,
    top_k: usize,
    debounce: Duration,
    seq: Arc<AtomicU64>,
    state: Arc<Mutex<SearchQueryState>>,
    pending: Option<Pending>,
}

impl QueryDispatcher {
    pub fn new(
        keyword: Arc<dyn KeywordSearcher>,
        store: Arc<dyn VectorStore>,
        rank_by: RankBy,
        top_k: usize,
    ) -> Self {
        Self {
            keyword,
            store,
            rank_by,
            top_k,
            debounce: SEMANTIC_DEBOUNCE,
            seq: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(SearchQueryState::default())),
            pending: None,
        }
    }

    /// Snapshot of the current result state.
    pub fn state(&self) -> SearchQueryState {
        self.state.lock().expect("state lock poisoned").clone()
    }

    /// React to a query-text change.
    ///
    /// Runs the keyword lookup immediately, restarts the semantic debounce
    /// timer (replacing, not stacking, any timer still waiting), and for an
    /// empty query clears both panes synchronously. Must be called from
    /// within a tokio runtime.
    pub fn set_query(&mut self, text: &str) {
        let my_seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(pending) = self.pending.take() {
            // Cancel only the timer; a lookup already dispatched keeps
            // running and is discarded by the sequence gate instead.
            if !pending.fired.load(Ordering::SeqCst) {
                pending.handle.abort();
            }
        }

        {
            let mut state = self.state.lock().expect("state lock poisoned");
            state.query = text.to_string();
            if text.is_empty() {
                state.local = None;
                state.semantic.clear();
                state.loading_semantic = false;
                return;
            }
            match self.keyword.search(text, LOCAL_LIMIT) {
                Ok(hits) => state.local = Some(hits),
                Err(e) => {
                    warn!(error = %e, "keyword lookup failed");
                    state.local = Some(Vec::new());
                }
            }
            state.loading_semantic = true;
        }

        let fired = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn({
            let fired = Arc::clone(&fired);
            let seq = Arc::clone(&self.seq);
            let state = Arc::clone(&self.state);
            let store = Arc::clone(&self.store);
            let debounce = self.debounce;
            let rank_by = self.rank_by;
            let top_k = self.top_k;
            let text = text.to_string();
            async move {
                tokio::time::sleep(debounce).await;
                fired.store(true, Ordering::SeqCst);
                if seq.load(Ordering::SeqCst) != my_seq {
                    return;
                }
                let result = store.lookup(&text, top_k).await;
                let mut state = state.lock().expect("state lock poisoned");
                if seq.load(Ordering::SeqCst) != my_seq {
                    // A newer query owns the panes now.
                    return;
                }
                match result {
                    Ok(hits) => state.semantic = aggregate(&hits, rank_by),
                    Err(e) => {
                        warn!(error = %e, "semantic lookup failed, keeping keyword results");
                        state.semantic.clear();
                    }
                }
                state.loading_semantic = false;
            }
        });
        self.pending = Some(Pending { handle, fired });
    }

    /// Wait for the pending semantic request (if any) to finish. Used by
    /// batch callers such as the CLI; interactive callers poll `state`.
    pub async fn settle(&mut self) {
        if let Some(pending) = self.pending.take() {
            let _ = pending.handle.await;
        }
    }
}

impl Drop for QueryDispatcher {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}
