// src/test_support.rs
// In-memory Fetcher for tests: answers from a map and records every request.

use crate::validate::{FetchMethod, FetchOutcome, Fetcher};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub(crate) struct FakeFetcher {
    outcomes: HashMap<String, FetchOutcome>,
    requests: Mutex<Vec<(String, FetchMethod)>>,
}

impl FakeFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answers `url` with `status`; `body` is only handed out for a 200 GET,
    /// like the real client.
    pub(crate) fn respond(self, url: &str, status: u16, body: &str) -> Self {
        self.outcome(
            url,
            FetchOutcome::Response {
                status,
                body: Some(body.to_string()),
            },
        )
    }

    pub(crate) fn outcome(mut self, url: &str, outcome: FetchOutcome) -> Self {
        self.outcomes.insert(url.to_string(), outcome);
        self
    }

    pub(crate) fn requests(&self) -> Vec<(String, FetchMethod)> {
        let mut requests = self.requests.lock().unwrap().clone();
        requests.sort_by(|a, b| a.0.cmp(&b.0));
        requests
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, url: &str, method: FetchMethod) -> impl Future<Output = FetchOutcome> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), method));

        let outcome = match self.outcomes.get(url).cloned() {
            Some(FetchOutcome::Response { status, body })
                if method == FetchMethod::Get && status == 200 =>
            {
                FetchOutcome::Response { status, body }
            }
            Some(FetchOutcome::Response { status, .. }) => {
                FetchOutcome::Response { status, body: None }
            }
            Some(other) => other,
            None => FetchOutcome::Failed("no response configured".to_string()),
        };

        async move { outcome }
    }
}
