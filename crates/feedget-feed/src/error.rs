use std::path::PathBuf;

use semver::Version;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("source url must not be empty")]
    EmptySourceUrl,
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed returned a malformed catalog: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("package '{0}' was not found on the feed")]
    PackageNotFound(String),
    #[error("package '{id}' has no version {requested}")]
    VersionNotFound { id: String, requested: Version },
    #[error("failed writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog fetch ended before delivering a result")]
    Interrupted,
}
