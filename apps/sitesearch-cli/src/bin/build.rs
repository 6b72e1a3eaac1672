use std::env;

use sitesearch_cli::scan::discover_versions;
use sitesearch_core::config::{expand_path, Credentials, SearchConfig};
use sitesearch_index::{write_version_indexes, BasicIndexBuilder};
use sitesearch_vector::{ingest_all, HttpVectorStore};
use tracing_subscriber::EnvFilter;

fn parse_args() -> (String, String) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut base_url = "/".to_string();
    let mut scan_root = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--base-url" => {
                if i + 1 < args.len() {
                    base_url = args.remove(i + 1);
                    args.remove(i);
                    continue;
                }
                eprintln!("Error: --base-url requires a value");
                std::process::exit(1);
            }
            _ if !args[i].starts_with('-') => scan_root = Some(args[i].clone()),
            _ => {}
        }
        i += 1;
    }
    let Some(scan_root) = scan_root else {
        eprintln!("Usage: sitesearch-build [--base-url <url>] <scan_root>");
        std::process::exit(1);
    };
    (scan_root, base_url)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SearchConfig::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let credentials = Credentials::from_env();
    let (scan_root, base_url) = parse_args();
    let scan_root = expand_path(&scan_root);

    println!("Scanning {}", scan_root.display());
    let versions = discover_versions(&scan_root)?;
    if versions.is_empty() {
        println!("No documents.json scan files found under {}.", scan_root.display());
        return Ok(());
    }

    let builder = BasicIndexBuilder::new();
    let mut index_files = 0usize;
    for version in &versions {
        index_files += write_version_indexes(version, &base_url, &config, &builder)?.len();
    }

    let write_token = credentials.require_write_token()?;
    let store = HttpVectorStore::new(&config.provider_url, &config.vector_space_id, write_token);
    let chunk_count: usize = versions.iter().map(|v| v.lists.contents.len()).sum();
    tokio::runtime::Runtime::new()?
        .block_on(async { ingest_all(&store, &versions, config.ingest_concurrency).await })?;

    println!("✅ Build step completed");
    println!("📊 {} version(s), {} index file(s) written", versions.len(), index_files);
    println!("📊 {} content chunk(s) ingested into the vector space", chunk_count);
    Ok(())
}
