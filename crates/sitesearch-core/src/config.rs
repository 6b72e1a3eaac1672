use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Strategy for collapsing per-chunk semantic hits on the same page into
/// one ranked result. Absence in the configuration means `MaxSimilarity`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RankBy {
    #[default]
    MaxSimilarity,
    Average,
    Count,
    WeightedAverage,
}

/// Partition policy flags, consumed by the context partitioner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextPolicy {
    /// Suppress the root "everywhere" partition entirely.
    pub hide_search_bar_with_no_search_context: bool,
    /// Duplicate context-matched documents into the root partition as well.
    pub use_all_contexts_with_no_search_context: bool,
}

/// The configuration surface consumed by the pipeline, resolved once at
/// startup and passed explicitly into the entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub vector_space_id: String,
    pub provider_url: String,
    pub top_k: usize,
    pub rank_by: Option<RankBy>,
    pub search_context_by_paths: Option<Vec<String>>,
    #[serde(flatten)]
    pub context_policy: ContextPolicy,
    /// Index file name template; `{dir}` is substituted per partition.
    pub search_index_filename: String,
    /// Upper bound on concurrently in-flight ingestion calls.
    pub ingest_concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            vector_space_id: String::new(),
            provider_url: String::new(),
            top_k: 10,
            rank_by: None,
            search_context_by_paths: None,
            context_policy: ContextPolicy::default(),
            search_index_filename: "search-index{dir}.json".to_string(),
            ingest_concurrency: 4,
        }
    }
}

impl SearchConfig {
    /// Merge `sitesearch.toml`, an env-specific overlay, and
    /// `SITESEARCH_*` environment variables into a validated config.
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("sitesearch.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("sitesearch.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("sitesearch.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("sitesearch.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("SITESEARCH_"));

        let config: SearchConfig = figment
            .extract()
            .map_err(|e| Error::Config(format!("failed to load configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on a surface that would otherwise degrade silently at the
    /// first network call.
    pub fn validate(&self) -> Result<()> {
        if self.vector_space_id.is_empty() {
            return Err(Error::Config("vector_space_id must be set".into()));
        }
        if self.provider_url.is_empty() {
            return Err(Error::Config("provider_url must be set".into()));
        }
        if self.top_k == 0 {
            return Err(Error::Config("top_k must be at least 1".into()));
        }
        if self.ingest_concurrency == 0 {
            return Err(Error::Config("ingest_concurrency must be at least 1".into()));
        }
        if !self.search_index_filename.contains("{dir}") {
            return Err(Error::Config(
                "search_index_filename must contain the {dir} placeholder".into(),
            ));
        }
        Ok(())
    }

    pub fn effective_rank_by(&self) -> RankBy {
        self.rank_by.unwrap_or_default()
    }
}

/// Provider tokens. The write token is build-time only and must never be
/// reachable from any query-time code path; the public token is the one
/// embedded in served pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub write_token: Option<String>,
    pub public_token: Option<String>,
}

impl Credentials {
    /// Read `SITESEARCH_WRITE_TOKEN` / `SITESEARCH_PUBLIC_TOKEN`.
    pub fn from_env() -> Self {
        Self {
            write_token: env::var("SITESEARCH_WRITE_TOKEN").ok(),
            public_token: env::var("SITESEARCH_PUBLIC_TOKEN").ok(),
        }
    }

    pub fn require_write_token(&self) -> Result<&str> {
        match self.write_token.as_deref() {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(Error::Config("write token is not set".into())),
        }
    }

    pub fn require_public_token(&self) -> Result<&str> {
        match self.public_token.as_deref() {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(Error::Config("public token is not set".into())),
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after
/// expansion. Absolute paths are returned as-is.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}
