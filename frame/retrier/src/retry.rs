use std::{fmt, future::Future, time::Duration};
use tracing::warn;

/// Retries an async operation while `condition` holds, sleeping between attempts
/// for the durations yielded by `strategy`.
pub struct Retry<I, T, E>
where
    I: Iterator<Item = Duration>,
{
    name: &'static str,
    tries: usize,
    strategy: I,
    condition: fn(&Result<T, E>) -> bool,
}

impl<I, T, E> Retry<I, T, E>
where
    I: Iterator<Item = Duration>,
    E: fmt::Display,
{
    /// By default every `Err` is retried.
    pub fn new(name: &'static str, tries: usize, strategy: I) -> Self {
        Retry {
            name,
            tries,
            strategy,
            condition: Result::is_err,
        }
    }

    /// Set a condition deciding whether the result of an attempt is retried.
    /// Returning true means retry.
    pub fn set_condition(mut self, condition: fn(&Result<T, E>) -> bool) -> Self {
        self.condition = condition;
        self
    }

    /// Runs `operation` at least once and at most `tries` times.
    pub async fn spawn_async<F, Fut>(mut self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let res = operation().await;
            if attempt >= self.tries || !(self.condition)(&res) {
                return res;
            }
            let delay = match self.strategy.next() {
                Some(delay) => delay,
                None => return res,
            };
            if let Err(err) = &res {
                warn!(
                    "{} failed (attempt {}/{}): {}. Retrying in {:?}",
                    self.name, attempt, self.tries, err, delay
                );
            }
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::FixedDelay;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_retry_until_success() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let res: Result<usize, String> = Retry::new("until_success", 5, FixedDelay::new(1))
            .spawn_async(move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(format!("attempt {}", n))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(res, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_tries() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let res: Result<(), String> = Retry::new("gives_up", 4, FixedDelay::new(1))
            .spawn_async(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("unreachable node".to_string())
            })
            .await;

        assert!(res.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_retry_condition_stops_early() {
        fn only_transient(res: &Result<(), String>) -> bool {
            matches!(res, Err(e) if e.starts_with("transient"))
        }

        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let res = Retry::new("condition", 10, FixedDelay::new(1))
            .set_condition(only_transient)
            .spawn_async(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("fatal: bad password".to_string())
            })
            .await;

        assert_eq!(res, Err("fatal: bad password".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
