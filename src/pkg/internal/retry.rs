use std::future::Future;
use std::time::Duration;

/// Attempt budget for the extraction call.
pub const MAX_ATTEMPTS: u32 = 3;

/// Outcome of one attempt: transient failures are retried until the attempt
/// budget runs out, fatal ones abort the loop immediately.
pub enum AttemptError<E> {
    Transient(E),
    Fatal(E),
}

/// Delay before re-attempting: 2^attempt seconds (1s, 2s, 4s, ...).
pub fn exponential_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt)
}

/// Bounded retry loop. `op` receives the zero-based attempt number; `delay`
/// maps the number of the attempt that just failed to the wait before the
/// next one. Returns the last transient error once the budget is exhausted.
pub async fn with_retries<T, E, F, Fut>(
    max_attempts: u32,
    delay: fn(u32) -> Duration,
    mut op: F,
) -> core::result::Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = core::result::Result<T, AttemptError<E>>>,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Fatal(err)) => return Err(err),
            Err(AttemptError::Transient(err)) => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(err);
                }
                let wait = delay(attempt - 1);
                tracing::warn!(
                    "attempt {} of {} failed, retrying in {:?}",
                    attempt,
                    max_attempts,
                    wait
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn no_delay(_attempt: u32) -> Duration {
        Duration::ZERO
    }

    #[test]
    fn delay_doubles_per_attempt() {
        assert_eq!(exponential_delay(0), Duration::from_secs(1));
        assert_eq!(exponential_delay(1), Duration::from_secs(2));
        assert_eq!(exponential_delay(2), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn transient_errors_use_the_whole_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<(), &str> = with_retries(MAX_ATTEMPTS, no_delay, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Transient("server error")) }
        })
        .await;
        assert_eq!(result.unwrap_err(), "server error");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fatal_error_stops_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), &str> = with_retries(MAX_ATTEMPTS, no_delay, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Fatal("client error")) }
        })
        .await;
        assert_eq!(result.unwrap_err(), "client error");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_after_transient_failure() {
        let result = with_retries(MAX_ATTEMPTS, no_delay, |attempt| async move {
            if attempt == 0 {
                Err(AttemptError::Transient("flaky"))
            } else {
                Ok(attempt)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn immediate_success_makes_one_call() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = with_retries(MAX_ATTEMPTS, no_delay, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
