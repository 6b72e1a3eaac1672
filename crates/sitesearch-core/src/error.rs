use thiserror::Error;

/// Error taxonomy for the search pipeline.
///
/// `Config` fails fast before any network call. `Build` aborts the whole
/// build step: a partially cleared or partially repopulated vector space is
/// not safe to serve, so build failures are never retried in-process (a
/// rebuild is the retry mechanism). `Query` is recoverable: the caller logs
/// it and degrades to keyword-only results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("build step failed: {0}")]
    Build(String),

    #[error("semantic lookup failed: {0}")]
    Query(String),
}

impl Error {
    /// True when the error may be swallowed at query time without leaving
    /// shared state inconsistent.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Query(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
