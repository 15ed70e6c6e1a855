// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background loading with stale-result rejection.
//!
//! Each request gets a monotonic id. Only the result of the most recent
//! request is handed back; results of superseded requests are dropped when
//! they arrive, so a slow decode can never overwrite a newer one.

use anyhow::Result;
use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(pub u64);

pub struct BackgroundLoader<T> {
    sender: Sender<(RequestId, Result<T>)>,
    receiver: Receiver<(RequestId, Result<T>)>,
    latest: Option<RequestId>,
    next_id: u64,
}

impl<T: Send + 'static> Default for BackgroundLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> BackgroundLoader<T> {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            latest: None,
            next_id: 1,
        }
    }

    /// Run `job` on a worker thread, superseding any pending request.
    pub fn request<F>(&mut self, job: F) -> RequestId
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.latest = Some(id);

        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let _ = sender.send((id, job()));
        });
        id
    }

    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Forget the pending request; its result will be discarded.
    pub fn cancel(&mut self) {
        self.latest = None;
    }

    /// Result of the latest request, if it has finished.
    pub fn poll(&mut self) -> Option<Result<T>> {
        while let Ok((id, result)) = self.receiver.try_recv() {
            if Some(id) == self.latest {
                self.latest = None;
                return Some(result);
            }
            log::warn!("Discarding stale load result #{}", id.0);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel as gate;
    use std::time::{Duration, Instant};

    fn wait_for<T: Send + 'static>(loader: &mut BackgroundLoader<T>) -> Option<Result<T>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(result) = loader.poll() {
                return Some(result);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_latest_result_is_delivered() {
        let mut loader = BackgroundLoader::new();
        loader.request(|| Ok(42u32));
        assert_eq!(wait_for(&mut loader).unwrap().unwrap(), 42);
        assert!(!loader.is_pending());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut loader = BackgroundLoader::new();
        let (release, wait) = gate::<()>();

        // First request finishes only after the second one was issued
        loader.request(move || {
            let _ = wait.recv();
            Ok("stale")
        });
        loader.request(|| Ok("fresh"));
        assert_eq!(wait_for(&mut loader).unwrap().unwrap(), "fresh");

        release.send(()).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_errors_are_delivered() {
        let mut loader: BackgroundLoader<u8> = BackgroundLoader::new();
        loader.request(|| Err(anyhow::anyhow!("decode failed")));
        assert!(wait_for(&mut loader).unwrap().is_err());
    }

    #[test]
    fn test_cancel_drops_result() {
        let mut loader = BackgroundLoader::new();
        loader.request(|| Ok(1u8));
        loader.cancel();
        std::thread::sleep(Duration::from_millis(50));
        assert!(loader.poll().is_none());
    }
}
