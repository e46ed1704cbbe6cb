use std::fs;
use std::path::{Path, PathBuf};

use feedget_core::PackageSummary;
use semver::Version;
use tracing::debug;

use crate::error::FeedError;
use crate::wire::{decode_catalog, CatalogEntry};

/// The remote repository seam. The CLI only ever talks to this trait, so
/// tests can stand in a canned catalog without a network.
pub trait Feed: Send + Sync {
    fn packages(&self) -> Result<Vec<PackageSummary>, FeedError>;
    fn install(&self, id: &str, version: Option<&Version>) -> Result<InstallReport, FeedError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub id: String,
    pub version: Version,
    pub path: PathBuf,
}

/// Blocking HTTP client for a JSON package feed.
#[derive(Debug)]
pub struct HttpFeed {
    source_url: String,
    api_key: Option<String>,
    install_root: PathBuf,
    http: reqwest::blocking::Client,
}

impl HttpFeed {
    pub fn connect(source_url: &str, api_key: Option<&str>) -> Result<Self, FeedError> {
        if source_url.trim().is_empty() {
            return Err(FeedError::EmptySourceUrl);
        }
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("feedget/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            source_url: source_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            install_root: PathBuf::from("packages"),
            http,
        })
    }

    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = root.into();
        self
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, FeedError> {
        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Feed-ApiKey", key);
        }
        Ok(request.send()?.error_for_status()?)
    }

    fn catalog(&self) -> Result<Vec<CatalogEntry>, FeedError> {
        let url = format!("{}/catalog", self.source_url);
        debug!(url = %url, "fetching catalog");
        let body = self.get(&url)?.text()?;
        Ok(decode_catalog(&body)?)
    }
}

impl Feed for HttpFeed {
    fn packages(&self) -> Result<Vec<PackageSummary>, FeedError> {
        let entries = self.catalog()?;
        Ok(entries.iter().map(CatalogEntry::to_summary).collect())
    }

    fn install(&self, id: &str, version: Option<&Version>) -> Result<InstallReport, FeedError> {
        let entries = self.catalog()?;
        let entry = select_entry(&entries, id, version)?;
        debug!(id = %entry.id, version = %entry.version, "downloading package");

        let bytes = self.get(&entry.content)?.bytes()?;
        let path = package_path(&self.install_root, entry);
        fs::create_dir_all(&self.install_root).map_err(|source| FeedError::Io {
            path: self.install_root.clone(),
            source,
        })?;
        fs::write(&path, &bytes).map_err(|source| FeedError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(InstallReport {
            id: entry.id.clone(),
            version: entry.version.clone(),
            path,
        })
    }
}

fn package_path(root: &Path, entry: &CatalogEntry) -> PathBuf {
    root.join(format!("{}.{}.pkg", entry.id, entry.version))
}

/// Picks the catalog entry for an install request: id is matched
/// case-insensitively, and without an explicit version the highest
/// available one wins.
pub(crate) fn select_entry<'a>(
    entries: &'a [CatalogEntry],
    id: &str,
    version: Option<&Version>,
) -> Result<&'a CatalogEntry, FeedError> {
    let mut candidates: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| entry.id.eq_ignore_ascii_case(id))
        .collect();
    if candidates.is_empty() {
        return Err(FeedError::PackageNotFound(id.to_string()));
    }

    match version {
        Some(requested) => candidates
            .into_iter()
            .find(|entry| entry.version == *requested)
            .ok_or_else(|| FeedError::VersionNotFound {
                id: id.to_string(),
                requested: requested.clone(),
            }),
        None => {
            candidates.sort_by(|a, b| a.version.cmp(&b.version));
            candidates
                .pop()
                .ok_or_else(|| FeedError::PackageNotFound(id.to_string()))
        }
    }
}
