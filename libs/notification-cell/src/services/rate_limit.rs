use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Process-wide cooldown protecting the mail transport from bursts.
///
/// The check and the timestamp update happen under one lock, so two
/// concurrent dispatches cannot both pass the same window. The window is
/// global, not per-recipient.
pub struct DispatchRateLimiter {
    cooldown: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl DispatchRateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_dispatch: Mutex::new(None),
        }
    }

    /// Returns true and claims the window if enough time has passed since the
    /// previous successful claim.
    pub fn try_acquire(&self) -> bool {
        let mut last = self
            .last_dispatch
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let now = Instant::now();
        if let Some(previous) = *last {
            if now.duration_since(previous) < self.cooldown {
                return false;
            }
        }

        *last = Some(now);
        true
    }
}

impl Default for DispatchRateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn second_call_within_window_is_rejected() {
        let limiter = DispatchRateLimiter::new(Duration::from_secs(1));
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn window_reopens_after_cooldown() {
        let limiter = DispatchRateLimiter::new(Duration::from_millis(20));
        assert!(limiter.try_acquire());
        thread::sleep(Duration::from_millis(30));
        assert!(limiter.try_acquire());
    }

    #[test]
    fn concurrent_callers_get_exactly_one_claim() {
        let limiter = Arc::new(DispatchRateLimiter::new(Duration::from_secs(1)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                thread::spawn(move || limiter.try_acquire())
            })
            .collect();

        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|granted| *granted)
            .count();

        assert_eq!(granted, 1);
    }
}
