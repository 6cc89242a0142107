use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Interval between operation status refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` polls until the operation reports completion
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

/// The poll loop ran past [`PollPolicy::timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTimeout(pub Duration);

/// Refresh `current` every `policy.interval` until `is_done` holds.
///
/// There is no iteration cap. The loop ends when `is_done` returns true,
/// when `refresh` fails, or, if the policy sets one, when the timeout
/// elapses.
pub async fn poll_until<T, E, D, F, Fut>(
    mut current: T,
    policy: &PollPolicy,
    is_done: D,
    mut refresh: F,
) -> Result<T, E>
where
    D: Fn(&T) -> bool,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<PollTimeout>,
{
    let started = Instant::now();
    let mut attempt: u64 = 0;
    while !is_done(&current) {
        sleep(policy.interval).await;
        if let Some(limit) = policy.timeout
            && started.elapsed() >= limit
        {
            return Err(PollTimeout(limit).into());
        }
        attempt += 1;
        tracing::debug!(attempt, "Refreshing operation status");
        current = refresh(current).await?;
    }
    Ok(current)
}
