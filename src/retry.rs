//! Generic retry with exponential backoff
//!
//! Kept independent of the model-call specifics so the policy can be unit
//! tested in isolation. Delays double per attempt: base, 2x base, 4x base.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run `operation` up to `max_attempts` times, sleeping between failures
///
/// The first attempt runs immediately. After a failed attempt `n` (1-based)
/// the delay is `base_delay * 2^(n-1)`. The error from the final attempt is
/// returned unchanged.
pub async fn retry_with_backoff<T, E, F, Fut>(
    max_attempts: usize,
    base_delay: Duration,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= max_attempts {
                    return Err(e);
                }
                let backoff = base_delay.saturating_mul(2_u32.pow((attempt - 1) as u32));
                warn!(
                    "Attempt {} failed: {}, retrying in {:?}",
                    attempt, e, backoff
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
}
