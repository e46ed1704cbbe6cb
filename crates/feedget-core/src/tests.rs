use semver::Version;

use super::*;

fn version(raw: &str) -> Version {
    Version::parse(raw).expect("test version must parse")
}

#[test]
fn full_name_joins_id_and_version() {
    let summary = PackageSummary::new("Newtonsoft.Json", version("13.0.3"), "JSON for .NET");
    assert_eq!(summary.full_name(), "Newtonsoft.Json 13.0.3");
}

#[test]
fn id_match_is_case_insensitive_substring() {
    let summary = PackageSummary::new("Newtonsoft.Json", version("13.0.3"), "");
    assert!(summary.id_matches("json"));
    assert!(summary.id_matches("NEWTON"));
    assert!(!summary.id_matches("yaml"));
}

#[test]
fn manifest_parses_with_defaults() {
    let manifest = PackageManifest::from_toml_str(
        r#"
        id = "hello"
        version = "1.0.0"
        "#,
    )
    .expect("minimal manifest must parse");

    assert_eq!(manifest.id, "hello");
    assert_eq!(manifest.version, version("1.0.0"));
    assert!(manifest.description.is_empty());
    assert!(manifest.authors.is_empty());
    assert!(manifest.files.is_empty());
}

#[test]
fn manifest_rejects_empty_id() {
    let err = PackageManifest::from_toml_str(
        r#"
        id = "  "
        version = "1.0.0"
        "#,
    )
    .expect_err("blank id must be rejected");
    assert!(err.to_string().contains("id must not be empty"));
}

#[test]
fn manifest_rejects_parent_traversal_in_files() {
    let err = PackageManifest::from_toml_str(
        r#"
        id = "hello"
        version = "1.0.0"
        files = ["bin/../../etc/passwd"]
        "#,
    )
    .expect_err("traversal must be rejected");
    assert!(err.to_string().contains("escapes the package root"));
}

#[test]
fn manifest_rejects_malformed_version() {
    let err = PackageManifest::from_toml_str(
        r#"
        id = "hello"
        version = "one point oh"
        "#,
    )
    .expect_err("malformed version must be rejected");
    assert!(err.to_string().contains("failed to parse package manifest"));
}
