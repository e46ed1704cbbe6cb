use anyhow::{anyhow, Context};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Local package manifest consumed by `feedget pack`.
///
/// The manifest is authored as TOML next to the files it describes:
///
/// ```toml
/// id = "hello"
/// version = "1.0.0"
/// description = "Prints a greeting"
/// files = ["bin/hello"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub id: String,
    pub version: Version,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl PackageManifest {
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let manifest: Self = toml::from_str(input).context("failed to parse package manifest")?;
        if manifest.id.trim().is_empty() {
            return Err(anyhow!("manifest id must not be empty"));
        }
        for file in &manifest.files {
            if file.trim().is_empty() {
                return Err(anyhow!("manifest '{}' lists an empty file entry", manifest.id));
            }
            if file.split(['/', '\\']).any(|part| part == "..") {
                return Err(anyhow!(
                    "manifest '{}' file entry '{}' escapes the package root",
                    manifest.id,
                    file
                ));
            }
        }
        Ok(manifest)
    }
}
