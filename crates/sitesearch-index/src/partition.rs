//! Splits one scan into per-context sub-index groups.
//!
//! A "search context" is a configured site-relative URL prefix (for example
//! a product area). Each context gets its own index file; the empty key `""`
//! is the root "everywhere" partition.

use std::collections::BTreeMap;

use sitesearch_core::config::ContextPolicy;
use sitesearch_core::types::{DocumentLists, SearchDocument};
use tracing::debug;

/// Per-context document groups, in scanner kind order (titles, headings,
/// contents) with empty kind slots already compacted away.
pub type PartitionMap = BTreeMap<String, Vec<Vec<SearchDocument>>>;

/// A document matches context `c` iff its site-relative path equals `c` or
/// sits below `c/`. Contexts are tested in configuration order; the first
/// match wins.
fn matched_context<'a>(relative: &str, contexts: &'a [String]) -> Option<&'a str> {
    contexts
        .iter()
        .find(|c| relative == c.as_str() || relative.starts_with(&format!("{c}/")))
        .map(String::as_str)
}

/// Assign every document to its partition.
///
/// With no contexts configured the whole scan maps to the root key. With
/// contexts configured:
/// - documents whose URL does not start with `base_url`, or matches no
///   context, fall into the root group (when it exists);
/// - `hide_search_bar_with_no_search_context` suppresses the root group
///   entirely, so such documents are dropped;
/// - `use_all_contexts_with_no_search_context` additionally duplicates
///   matched documents into the root group.
///
/// The three scanner lists stay in lockstep per partition until the final
/// compaction, which removes kind slots that never received a document.
/// The root group keeps all three slots even when empty.
pub fn partition(
    lists: &DocumentLists,
    contexts: Option<&[String]>,
    base_url: &str,
    policy: &ContextPolicy,
) -> PartitionMap {
    let Some(contexts) = contexts else {
        let mut map = PartitionMap::new();
        map.insert(
            String::new(),
            lists.as_slices().iter().map(|docs| docs.to_vec()).collect(),
        );
        return map;
    };

    // Sparse per-kind slots: root slots exist up front, context slots are
    // created on first matching document.
    let mut by_dir: BTreeMap<String, Vec<Option<Vec<SearchDocument>>>> = BTreeMap::new();
    let mut root: Vec<Option<Vec<SearchDocument>>> = Vec::new();

    for (kind_index, documents) in lists.as_slices().iter().enumerate() {
        root.push(Some(Vec::new()));
        for doc in documents.iter() {
            if let Some(relative) = doc.url.strip_prefix(base_url) {
                if let Some(context) = matched_context(relative, contexts) {
                    let slots = by_dir
                        .entry(context.to_string())
                        .or_insert_with(|| vec![None; lists.as_slices().len()]);
                    slots[kind_index]
                        .get_or_insert_with(Vec::new)
                        .push(doc.clone());
                    if !policy.use_all_contexts_with_no_search_context {
                        continue;
                    }
                }
            }
            if let Some(slot) = root[kind_index].as_mut() {
                slot.push(doc.clone());
            }
        }
    }

    if !policy.hide_search_bar_with_no_search_context {
        by_dir.insert(String::new(), root);
    }

    let map: PartitionMap = by_dir
        .into_iter()
        .map(|(key, slots)| (key, slots.into_iter().flatten().collect()))
        .collect();
    debug!(partitions = map.len(), "assigned documents to search contexts");
    map
}

/// Substitute the `{dir}` placeholder of the index file template: empty for
/// the root partition, otherwise `-` plus the context with `/` flattened to
/// `-`.
pub fn index_file_name(template: &str, key: &str) -> String {
    let dir = if key.is_empty() {
        String::new()
    } else {
        format!("-{}", key.replace('/', "-"))
    };
    template.replace("{dir}", &dir)
}
