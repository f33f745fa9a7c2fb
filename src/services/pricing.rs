use crate::constants::{RATE_LIMIT_BACKOFF_MS, TRANSPORT_ATTEMPTS, TRANSPORT_RETRY_DELAY_MS};
use crate::error::{AppError, Result};
use crate::services::discogs::DiscogsApi;
use std::time::Duration;
use tokio::time::sleep;

/// Outcome of resolving one release's market price.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceOutcome {
    /// Lowest price currently listed for sale.
    Listed(f64),
    /// No copy for sale; a normal terminal state, the item is skipped.
    NoListing,
    /// Transport/API failure that exhausted its retry budget under the
    /// `skip` policy. Distinct from `NoListing` so the caller can report
    /// it as a failure rather than a quiet skip.
    Failed(String),
}

/// Retry pacing for the resolver, kept as a value so tests can zero the
/// delays and drive the loop with a scripted quota.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Wait after the remote reports zero remaining quota, before
    /// re-issuing the same request. Retried without an attempt cap; the
    /// window always replenishes.
    pub rate_limit_backoff: Duration,
    /// Total attempts per item when transport failures are skippable.
    pub transport_attempts: u32,
    pub transport_retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            rate_limit_backoff: Duration::from_millis(RATE_LIMIT_BACKOFF_MS),
            transport_attempts: TRANSPORT_ATTEMPTS,
            transport_retry_delay: Duration::from_millis(TRANSPORT_RETRY_DELAY_MS),
        }
    }
}

/// What to do when price resolution fails at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceErrorPolicy {
    /// Propagate the error and abort the whole run.
    Abort,
    /// Retry up to the policy's attempt cap, then record a per-item
    /// failure and continue with the next item.
    Skip,
}

impl PriceErrorPolicy {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(PriceErrorPolicy::Abort),
            "skip" => Ok(PriceErrorPolicy::Skip),
            _ => Err(AppError::Config(format!(
                "Invalid price-error policy: {}. Valid options: abort, skip",
                s
            ))),
        }
    }
}

/// Resolves market prices one release at a time, honoring the remaining
/// rate-limit quota reported on every stats response.
pub struct PriceResolver {
    currency_code: String,
    retry: RetryPolicy,
    on_error: PriceErrorPolicy,
}

impl PriceResolver {
    pub fn new(currency_code: &str, retry: RetryPolicy, on_error: PriceErrorPolicy) -> Self {
        Self {
            currency_code: currency_code.to_string(),
            retry,
            on_error,
        }
    }

    /// Resolve the lowest listed price for one release.
    ///
    /// A response reporting zero remaining quota is discarded and the same
    /// request is retried after the backoff; the resolver never advances
    /// to the next item while the window is exhausted. A missing quota
    /// header is treated as available quota.
    pub async fn resolve(&self, api: &dyn DiscogsApi, release_id: u64) -> Result<PriceOutcome> {
        let mut attempts_left = self.retry.transport_attempts.max(1);

        loop {
            match api.marketplace_stats(release_id, &self.currency_code).await {
                Ok(envelope) => {
                    if envelope.requests_remaining == Some(0) {
                        println!(
                            "⏳ Rate limit exhausted, backing off {:.0}s before retrying release {}",
                            self.retry.rate_limit_backoff.as_secs_f64(),
                            release_id
                        );
                        sleep(self.retry.rate_limit_backoff).await;
                        continue;
                    }

                    return Ok(match envelope.stats.lowest_price {
                        Some(price) => PriceOutcome::Listed(price.value),
                        None => PriceOutcome::NoListing,
                    });
                }
                Err(err) => match self.on_error {
                    PriceErrorPolicy::Abort => return Err(err),
                    PriceErrorPolicy::Skip => {
                        attempts_left -= 1;
                        if attempts_left == 0 {
                            return Ok(PriceOutcome::Failed(err.to_string()));
                        }
                        eprintln!(
                            "⚠️  Price fetch failed for release {} ({}), {} attempt(s) left",
                            release_id, err, attempts_left
                        );
                        sleep(self.retry.transport_retry_delay).await;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake::FakeDiscogs;

    fn instant_policy() -> RetryPolicy {
        RetryPolicy {
            rate_limit_backoff: Duration::ZERO,
            transport_attempts: 3,
            transport_retry_delay: Duration::ZERO,
        }
    }

    fn resolver(on_error: PriceErrorPolicy) -> PriceResolver {
        PriceResolver::new("EUR", instant_policy(), on_error)
    }

    #[tokio::test]
    async fn test_listed_price() {
        let api = FakeDiscogs::new();
        api.set_price(7, Some(12.5));

        let outcome = resolver(PriceErrorPolicy::Abort).resolve(&api, 7).await.unwrap();
        assert_eq!(outcome, PriceOutcome::Listed(12.5));
    }

    #[tokio::test]
    async fn test_no_listing_is_not_an_error() {
        let api = FakeDiscogs::new();

        let outcome = resolver(PriceErrorPolicy::Abort).resolve(&api, 7).await.unwrap();
        assert_eq!(outcome, PriceOutcome::NoListing);
    }

    #[tokio::test]
    async fn test_retries_same_release_until_quota_returns() {
        let api = FakeDiscogs::new();
        api.set_price(7, Some(9.0));
        api.script_remaining(&[0, 0, 5]);

        let outcome = resolver(PriceErrorPolicy::Abort).resolve(&api, 7).await.unwrap();

        assert_eq!(outcome, PriceOutcome::Listed(9.0));
        // Two exhausted responses were discarded and re-requested.
        api.with_state(|s| assert_eq!(s.calls.stats, vec![7, 7, 7]));
    }

    #[tokio::test]
    async fn test_abort_policy_propagates_transport_failure() {
        let api = FakeDiscogs::new();
        api.set_price(7, Some(9.0));
        api.inject_stats_failures(7, 1);

        let result = resolver(PriceErrorPolicy::Abort).resolve(&api, 7).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_skip_policy_retries_then_fails_item() {
        let api = FakeDiscogs::new();
        api.set_price(7, Some(9.0));
        api.inject_stats_failures(7, 10);

        let outcome = resolver(PriceErrorPolicy::Skip).resolve(&api, 7).await.unwrap();

        assert!(matches!(outcome, PriceOutcome::Failed(_)));
        api.with_state(|s| assert_eq!(s.calls.stats.len(), 3));
    }

    #[tokio::test]
    async fn test_skip_policy_recovers_within_attempt_budget() {
        let api = FakeDiscogs::new();
        api.set_price(7, Some(9.0));
        api.inject_stats_failures(7, 1);

        let outcome = resolver(PriceErrorPolicy::Skip).resolve(&api, 7).await.unwrap();

        assert_eq!(outcome, PriceOutcome::Listed(9.0));
        api.with_state(|s| assert_eq!(s.calls.stats.len(), 2));
    }
}
