use std::time::Duration;

use tracing::warn;

use crate::error::CollectError;

/// Fixed-delay retry budgets for the two retryable error kinds.
///
/// Budgets count total attempts, not re-tries: a budget of 3 means the
/// operation runs at most 3 times. Delays are constant between attempts;
/// there is no backoff growth. Transient network blips get a very large
/// budget with a short delay, rate-limit responses a smaller budget with a
/// delay long enough to let the remote window reset.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub transient_attempts: u32,
    pub transient_delay: Duration,
    pub waitable_attempts: u32,
    pub waitable_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            transient_attempts: 9000,
            transient_delay: Duration::from_secs(10),
            waitable_attempts: 3000,
            waitable_delay: Duration::from_secs(30),
        }
    }
}

/// Runs `op` until it succeeds, exhausts the budget for its error kind, or
/// fails with a non-retryable error.
///
/// The two budgets are tracked independently: a run may burn transient
/// attempts and waitable attempts in any interleaving, and each kind fails
/// the call only when its own budget is spent. The final error of the
/// exhausted kind is returned as-is so the caller sees what actually
/// happened on the wire.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, CollectError>
where
    F: FnMut() -> Result<T, CollectError>,
{
    let mut transient_used = 0u32;
    let mut waitable_used = 0u32;

    loop {
        let err = match op() {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        match err {
            CollectError::Transient(_) => {
                transient_used += 1;
                if transient_used >= policy.transient_attempts {
                    return Err(err);
                }
                warn!(
                    "{label}: {err}, retrying (transient attempt {transient_used}/{})",
                    policy.transient_attempts
                );
                std::thread::sleep(policy.transient_delay);
            }
            CollectError::Waitable(_) => {
                waitable_used += 1;
                if waitable_used >= policy.waitable_attempts {
                    return Err(err);
                }
                warn!(
                    "{label}: {err}, retrying (waitable attempt {waitable_used}/{})",
                    policy.waitable_attempts
                );
                std::thread::sleep(policy.waitable_delay);
            }
            other => return Err(other),
        }
    }
}
