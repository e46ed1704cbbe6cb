mod manifest;
mod summary;

pub use manifest::PackageManifest;
pub use summary::PackageSummary;

#[cfg(test)]
mod tests;
