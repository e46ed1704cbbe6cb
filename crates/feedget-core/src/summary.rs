use semver::Version;
use serde::{Deserialize, Serialize};

/// One catalog entry as the feed advertises it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSummary {
    pub id: String,
    pub version: Version,
    #[serde(default)]
    pub description: String,
}

impl PackageSummary {
    pub fn new(id: impl Into<String>, version: Version, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version,
            description: description.into(),
        }
    }

    /// The terse one-line rendering used by non-verbose listings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.id, self.version)
    }

    pub fn id_matches(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(&needle.to_lowercase())
    }
}
