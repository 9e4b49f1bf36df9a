//! Asynchronous registry search
//!
//! A search runs on a worker thread and delivers exactly one result over a
//! channel. The control thread polls without blocking.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::domain::{RegistryEntry, RegistrySource};
use crate::error::{Result, install};

/// State of an outstanding search after one poll
#[derive(Debug)]
pub enum SearchPoll {
    Pending,
    Done(Result<Vec<RegistryEntry>>),
}

/// An in-flight registry search. Dropping it abandons the result.
#[derive(Debug)]
pub struct SearchHandle {
    rx: Receiver<Result<Vec<RegistryEntry>>>,
}

impl SearchHandle {
    pub fn start(source: Arc<dyn RegistrySource>) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver is gone when the search was cancelled.
            let _ = tx.send(source.search());
        });
        Self { rx }
    }

    pub fn poll(&self) -> SearchPoll {
        match self.rx.try_recv() {
            Ok(result) => SearchPoll::Done(result),
            Err(TryRecvError::Empty) => SearchPoll::Pending,
            Err(TryRecvError::Disconnected) => SearchPoll::Done(Err(install::search_failed(
                "registry search worker stopped without a result",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::StaticRegistry;
    use std::time::{Duration, Instant};

    fn wait(handle: &SearchHandle) -> Result<Vec<RegistryEntry>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let SearchPoll::Done(result) = handle.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "search never finished");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_search_delivers_entries() {
        let source = StaticRegistry::with_entries(&[("Audio", "com.studio.audio@1.0.0")]);
        let handle = SearchHandle::start(Arc::new(source));
        let entries = wait(&handle).unwrap();
        assert_eq!(entries[0].id, "com.studio.audio@1.0.0");
    }

    #[test]
    fn test_search_delivers_failure() {
        let handle = SearchHandle::start(Arc::new(StaticRegistry::failing()));
        assert!(wait(&handle).is_err());
    }

    #[test]
    fn test_poll_is_pending_while_search_blocks() {
        let source = StaticRegistry::default().delayed(Duration::from_millis(300));
        let handle = SearchHandle::start(Arc::new(source));
        assert!(matches!(handle.poll(), SearchPoll::Pending));
        assert!(wait(&handle).is_ok());
    }
}
