//! A lock-free, broadcast cancellation signal every task polls rather than blocks on.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Inner {
    flag: AtomicBool,
    deadline: Option<Instant>,
}

/// Cheaply cloneable handle to a single broadcast cancellation signal.
///
/// Carries an explicit flag (set by [`CancellationToken::cancel`]) and an optional
/// wall-clock deadline. [`CancellationToken::is_cancelled`] is the only thing any task
/// should poll; it never blocks.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// A token that never cancels on its own; only an explicit [`cancel`](Self::cancel) trips it.
    pub fn new() -> Self {
        CancellationToken {
            inner: Arc::new(Inner {
                flag: AtomicBool::new(false),
                deadline: None,
            }),
        }
    }

    /// A token that also cancels once `timeout` has elapsed since creation.
    pub fn with_timeout(timeout: Duration) -> Self {
        CancellationToken {
            inner: Arc::new(Inner {
                flag: AtomicBool::new(false),
                deadline: Some(Instant::now() + timeout),
            }),
        }
    }

    /// Explicitly trips the signal. Idempotent.
    pub fn cancel(&self) {
        self.inner.flag.store(true, Ordering::Relaxed);
    }

    /// True once either [`cancel`](Self::cancel) was called or the deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::Relaxed)
            || self
                .inner
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_cancelled() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn explicit_cancel_is_observed_by_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn timeout_trips_without_explicit_cancel() {
        let token = CancellationToken::with_timeout(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(20));
        assert!(token.is_cancelled());
    }
}
