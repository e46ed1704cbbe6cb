mod client;
mod error;
mod wire;

pub use client::{Feed, HttpFeed, InstallReport};
pub use error::FeedError;
pub use wire::CatalogEntry;
