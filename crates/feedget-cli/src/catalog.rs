use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use feedget_core::PackageSummary;
use feedget_feed::{Feed, FeedError};
use tracing::debug;

use crate::spinner::Spinner;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Lazily fetched, memoized package catalog.
///
/// The fetch runs on a single worker thread and hands its result back over a
/// channel; the calling thread wakes once a second purely to redraw the
/// spinner until the worker reports. A failed fetch is propagated, not
/// cached, and a worker that dies without reporting surfaces as
/// [`FeedError::Interrupted`] rather than spinning forever.
#[derive(Default)]
pub struct CatalogCache {
    catalog: Option<Vec<PackageSummary>>,
    spinner: Spinner,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_fetch(&mut self, feed: &Arc<dyn Feed>) -> Result<&[PackageSummary], FeedError> {
        if self.catalog.is_none() {
            let fetched = self.fetch(feed)?;
            debug!(packages = fetched.len(), "catalog cached");
            self.catalog = Some(fetched);
        }
        Ok(self.catalog.as_deref().unwrap_or_default())
    }

    fn fetch(&mut self, feed: &Arc<dyn Feed>) -> Result<Vec<PackageSummary>, FeedError> {
        let (sender, receiver) = mpsc::channel();
        let worker_feed = Arc::clone(feed);
        thread::spawn(move || {
            let _ = sender.send(worker_feed.packages());
        });

        let mut stdout = io::stdout();
        let outcome = loop {
            match receiver.recv_timeout(POLL_INTERVAL) {
                Ok(result) => break result,
                Err(RecvTimeoutError::Timeout) => {
                    // cosmetic only; a write failure must not abort the fetch
                    let _ = self.spinner.tick(&mut stdout, "Loading ");
                }
                Err(RecvTimeoutError::Disconnected) => break Err(FeedError::Interrupted),
            }
        };
        // terminate the progress line before anything else prints
        println!();
        outcome
    }
}
