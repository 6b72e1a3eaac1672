use std::env;
use std::sync::Arc;

use sitesearch_core::config::{expand_path, Credentials, SearchConfig};
use sitesearch_index::BasicKeywordSearcher;
use sitesearch_query::QueryDispatcher;
use sitesearch_vector::HttpVectorStore;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (index_file, query) = match args.as_slice() {
        [index_file, query] => (index_file.clone(), query.clone()),
        _ => {
            eprintln!("Usage: sitesearch-search <index_file> \"<query>\"");
            std::process::exit(1);
        }
    };

    let config = SearchConfig::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let credentials = Credentials::from_env();
    // Query-time code only ever sees the public token.
    let public_token = credentials.require_public_token()?;

    let searcher = BasicKeywordSearcher::load(&expand_path(&index_file))?;
    let store = HttpVectorStore::new(&config.provider_url, &config.vector_space_id, public_token);
    let mut dispatcher = QueryDispatcher::new(
        Arc::new(searcher),
        Arc::new(store),
        config.effective_rank_by(),
        config.top_k,
    );

    let state = tokio::runtime::Runtime::new()?.block_on(async {
        dispatcher.set_query(&query);
        dispatcher.settle().await;
        dispatcher.state()
    });

    match &state.local {
        Some(hits) if !hits.is_empty() => {
            println!("Keyword results");
            println!("===============");
            for hit in hits {
                println!("{:.3}  {}  {}", hit.score, hit.url, hit.title);
            }
        }
        _ => println!("No keyword results"),
    }

    println!();
    if state.semantic.is_empty() {
        println!("No semantic results");
    } else {
        println!("Semantic results");
        println!("================");
        for result in &state.semantic {
            let count = result.count.map(|c| format!(" ({c} chunks)")).unwrap_or_default();
            println!(
                "{:.3}  {}  {}{count}",
                result.similarity,
                result.url,
                result.title.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}
