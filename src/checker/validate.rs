// src/checker/validate.rs
// =============================================================================
// This module classifies and probes the candidate links, one at a time.
//
// For every candidate:
// 1. Same host as the page? -> internal, otherwise external
// 2. Probe it -> failures and non-200 answers also count as invalid
// 3. Wait a second before the next one (polite to the sites we hit)
//
// Probing is strictly sequential. Many of these links point at third-party
// servers, and the delay keeps us from hammering them.
// =============================================================================

use std::time::Duration;

use indicatif::ProgressBar;
use thiserror::Error;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, warn};
use url::Url;

use super::base::BaseAddress;
use super::http::{Probe, ProbeOutcome};
use super::tally::LinkTally;

/// How long to wait between requests
pub const DELAY_BETWEEN_REQUESTS: Duration = Duration::from_secs(1);

/// An error that stops the validation pass.
///
/// Network trouble never ends up here; it is counted as an invalid link.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("failed to release the response for {url}: {reason}")]
    Release { url: String, reason: String },
}

pub struct Validator<P> {
    probe: P,
    delay: Duration,
    deadline: Option<Duration>,
    progress: ProgressBar,
}

impl<P: Probe> Validator<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            delay: DELAY_BETWEEN_REQUESTS,
            deadline: None,
            progress: ProgressBar::hidden(),
        }
    }

    /// Stop probing once this much time has passed since the pass started.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Report per-link progress on this bar. Hidden by default.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    // Classifies and probes every candidate, updating the tally in place
    //
    // Parameters:
    //   base: the page's address (its host decides internal vs external)
    //   candidates: links from the extractor, in document order
    //   tally: counters to update
    //
    // Returns: Err only when a response could not be released. The tally
    // then holds the counts up to and including the failing link.
    pub async fn validate(
        &self,
        base: &BaseAddress,
        candidates: &[Url],
        tally: &mut LinkTally,
    ) -> Result<(), ValidateError> {
        self.progress.set_length(candidates.len() as u64);
        let deadline = self.deadline.map(|limit| Instant::now() + limit);

        for (index, link) in candidates.iter().enumerate() {
            // No delay before the first probe, and none after the last
            if index > 0 {
                sleep(self.delay).await;
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                warn!(
                    skipped = candidates.len() - index,
                    "validation deadline exceeded, remaining links not checked"
                );
                break;
            }

            if link.host_str() == base.host() {
                tally.internal += 1;
            } else {
                tally.external += 1;
            }

            let outcome = match deadline {
                Some(deadline) => timeout_at(deadline, self.probe.probe(link))
                    .await
                    .unwrap_or_else(|_| {
                        ProbeOutcome::Unreachable("validation deadline exceeded".to_string())
                    }),
                None => self.probe.probe(link).await,
            };

            match outcome {
                ProbeOutcome::Ok => debug!(%link, "link is reachable"),
                ProbeOutcome::NonSuccessStatus(status) => {
                    debug!(%link, %status, "link answered with a non-OK status");
                    tally.invalid += 1;
                }
                ProbeOutcome::Unreachable(reason) => {
                    debug!(%link, %reason, "link is unreachable");
                    tally.invalid += 1;
                }
                ProbeOutcome::ResourceError(reason) => {
                    self.progress.abandon();
                    return Err(ValidateError::Release {
                        url: link.to_string(),
                        reason,
                    });
                }
            }

            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    // Answers from a fixed table; unknown URLs get Ok
    #[derive(Default)]
    struct ScriptedProbe {
        answers: HashMap<String, ProbeOutcome>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedProbe {
        fn answer(mut self, url: &str, outcome: ProbeOutcome) -> Self {
            self.answers.insert(url.to_string(), outcome);
            self
        }
    }

    impl Probe for ScriptedProbe {
        async fn probe(&self, url: &Url) -> ProbeOutcome {
            self.calls.borrow_mut().push(url.to_string());
            self.answers.get(url.as_str()).cloned().unwrap_or(ProbeOutcome::Ok)
        }
    }

    // Never answers
    struct HangingProbe;

    impl Probe for HangingProbe {
        async fn probe(&self, _url: &Url) -> ProbeOutcome {
            std::future::pending().await
        }
    }

    fn base() -> BaseAddress {
        BaseAddress::parse("https://example.com/").unwrap()
    }

    fn urls(list: &[&str]) -> Vec<Url> {
        list.iter().map(|u| Url::parse(u).unwrap()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_candidates_leaves_tally_alone() {
        let mut tally = LinkTally::default();
        Validator::new(ScriptedProbe::default())
            .validate(&base(), &[], &mut tally)
            .await
            .unwrap();
        assert_eq!(tally, LinkTally::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_internal_and_external() {
        let candidates = urls(&["https://example.com/about", "https://other.test/"]);
        let mut tally = LinkTally::default();

        Validator::new(ScriptedProbe::default())
            .validate(&base(), &candidates, &mut tally)
            .await
            .unwrap();

        assert_eq!(
            tally,
            LinkTally {
                anchor: 0,
                internal: 1,
                external: 1,
                invalid: 0,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_host_comparison_ignores_scheme_and_port() {
        let candidates = urls(&[
            "http://example.com:8080/x",
            "https://www.example.com/",
            "mailto:someone@example.com",
        ]);
        let mut tally = LinkTally::default();

        Validator::new(ScriptedProbe::default())
            .validate(&base(), &candidates, &mut tally)
            .await
            .unwrap();

        assert_eq!(tally.internal, 1);
        assert_eq!(tally.external, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_internal_link_counts_twice() {
        let candidates = urls(&["https://example.com/slow"]);
        let probe = ScriptedProbe::default().answer(
            "https://example.com/slow",
            ProbeOutcome::Unreachable("Request timed out".to_string()),
        );
        let mut tally = LinkTally::default();

        Validator::new(probe)
            .validate(&base(), &candidates, &mut tally)
            .await
            .unwrap();

        assert_eq!(tally.internal, 1);
        assert_eq!(tally.invalid, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_success_status_is_invalid() {
        let candidates = urls(&["https://other.test/missing", "https://other.test/ok"]);
        let probe = ScriptedProbe::default().answer(
            "https://other.test/missing",
            ProbeOutcome::NonSuccessStatus(reqwest::StatusCode::NOT_FOUND),
        );
        let mut tally = LinkTally::default();

        Validator::new(probe)
            .validate(&base(), &candidates, &mut tally)
            .await
            .unwrap();

        assert_eq!(tally.external, 2);
        assert_eq!(tally.invalid, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicates_are_probed_each_time() {
        let candidates = urls(&["https://other.test/", "https://other.test/"]);
        let probe = ScriptedProbe::default();
        let mut tally = LinkTally::default();

        let validator = Validator::new(probe);
        validator.validate(&base(), &candidates, &mut tally).await.unwrap();

        assert_eq!(tally.external, 2);
        assert_eq!(validator.probe.calls.borrow().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_failure_aborts_the_pass() {
        let candidates = urls(&[
            "https://example.com/a",
            "https://example.com/broken",
            "https://example.com/c",
        ]);
        let probe = ScriptedProbe::default().answer(
            "https://example.com/broken",
            ProbeOutcome::ResourceError("connection poisoned".to_string()),
        );
        let mut tally = LinkTally::default();

        let validator = Validator::new(probe);
        let err = validator
            .validate(&base(), &candidates, &mut tally)
            .await
            .unwrap_err();

        let ValidateError::Release { url, reason } = err;
        assert_eq!(url, "https://example.com/broken");
        assert_eq!(reason, "connection poisoned");

        // The third link was never touched
        assert_eq!(tally.internal, 2);
        assert_eq!(tally.invalid, 0);
        assert_eq!(validator.probe.calls.borrow().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_probes_but_not_after_last() {
        let candidates = urls(&[
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3",
        ]);
        let mut tally = LinkTally::default();

        let started = Instant::now();
        Validator::new(ScriptedProbe::default())
            .validate(&base(), &candidates, &mut tally)
            .await
            .unwrap();

        assert_eq!(started.elapsed(), DELAY_BETWEEN_REQUESTS * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_stops_hanging_probe() {
        let candidates = urls(&["https://example.com/hang", "https://other.test/never"]);
        let mut tally = LinkTally::default();

        Validator::new(HangingProbe)
            .with_deadline(Some(Duration::from_secs(30)))
            .validate(&base(), &candidates, &mut tally)
            .await
            .unwrap();

        // The hanging link is classified and counted invalid; the next one
        // is never reached
        assert_eq!(
            tally,
            LinkTally {
                anchor: 0,
                internal: 1,
                external: 0,
                invalid: 1,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_during_delay_skips_the_rest() {
        let candidates = urls(&[
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3",
        ]);
        let mut tally = LinkTally::default();

        Validator::new(ScriptedProbe::default())
            .with_deadline(Some(Duration::from_millis(1500)))
            .validate(&base(), &candidates, &mut tally)
            .await
            .unwrap();

        // t=0 first probe, t=1s second probe, t=2s past the deadline
        assert_eq!(tally.internal, 2);
        assert_eq!(tally.invalid, 0);
    }
}
