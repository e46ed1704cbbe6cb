use feedget_core::PackageSummary;
use semver::Version;
use serde::Deserialize;

/// One row of the feed's `/catalog` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub version: Version,
    #[serde(default)]
    pub description: String,
    pub content: String,
}

impl CatalogEntry {
    pub fn to_summary(&self) -> PackageSummary {
        PackageSummary::new(&self.id, self.version.clone(), &self.description)
    }
}

pub fn decode_catalog(body: &str) -> Result<Vec<CatalogEntry>, serde_json::Error> {
    serde_json::from_str(body)
}
