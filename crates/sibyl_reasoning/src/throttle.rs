//! Admission control for LLM calls.
//!
//! Process-wide gate shared by every request: at most one call per
//! `min_interval`, widened to `cooldown` while the sticky error counter is
//! positive. This makes the service self-throttling under sustained
//! provider errors without an external circuit breaker.

use sibyl_core::config::ThrottleConfig;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct Throttle {
    min_interval: Duration,
    cooldown: Duration,
    state: Mutex<ThrottleState>,
}

#[derive(Debug)]
struct ThrottleState {
    last_call: Option<Instant>,
    recent_errors: u32,
}

impl Throttle {
    pub fn new(config: &ThrottleConfig) -> Self {
        Self {
            min_interval: Duration::from_secs_f64(config.min_interval_secs),
            cooldown: Duration::from_secs_f64(config.cooldown_secs),
            state: Mutex::new(ThrottleState {
                last_call: None,
                recent_errors: 0,
            }),
        }
    }

    /// Suspend until the next LLM call is allowed.
    ///
    /// The state lock is held across the wait so concurrent requests
    /// serialize through the gate instead of racing past it.
    pub async fn acquire(&self) {
        let mut state = self.state.lock().await;
        let required = if state.recent_errors > 0 {
            self.cooldown
        } else {
            self.min_interval
        };

        if let Some(last) = state.last_call {
            let elapsed = last.elapsed();
            if elapsed < required {
                let wait = required - elapsed;
                tracing::info!(
                    "Rate limiting: waiting {:.2}s before next LLM call",
                    wait.as_secs_f64()
                );
                tokio::time::sleep(wait).await;
            }
        }

        state.last_call = Some(Instant::now());
    }

    /// Record the outcome of the call this gate admitted. Successes drain
    /// the sticky error counter (floor zero); failures bump it, widening
    /// the spacing to the cooldown.
    pub async fn report(&self, success: bool) {
        let mut state = self.state.lock().await;
        if success {
            state.recent_errors = state.recent_errors.saturating_sub(1);
        } else {
            state.recent_errors += 1;
            tracing::warn!(
                "LLM call failed, cooldown active ({} recent errors)",
                state.recent_errors
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min: f64, cooldown: f64) -> ThrottleConfig {
        ThrottleConfig {
            min_interval_secs: min,
            cooldown_secs: cooldown,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let throttle = Throttle::new(&config(5.0, 10.0));
        let start = Instant::now();
        throttle.acquire().await;
        throttle.report(true).await;
        throttle.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_call_is_immediate() {
        let throttle = Throttle::new(&config(5.0, 10.0));
        let start = Instant::now();
        throttle.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_after_failure() {
        let throttle = Throttle::new(&config(5.0, 10.0));
        throttle.acquire().await;
        throttle.report(false).await;

        let start = Instant::now();
        throttle.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(10) - Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_drains_error_counter() {
        let throttle = Throttle::new(&config(5.0, 10.0));
        throttle.acquire().await;
        throttle.report(false).await;
        throttle.report(true).await;

        let start = Instant::now();
        throttle.acquire().await;
        // Counter back to zero: base interval applies, not the cooldown.
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(5) - Duration::from_millis(1));
        assert!(waited < Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquires_serialize() {
        let throttle = std::sync::Arc::new(Throttle::new(&config(5.0, 10.0)));
        let start = Instant::now();

        let a = {
            let t = throttle.clone();
            tokio::spawn(async move { t.acquire().await })
        };
        let b = {
            let t = throttle.clone();
            tokio::spawn(async move { t.acquire().await })
        };
        a.await.unwrap();
        b.await.unwrap();

        // Two admissions must span at least one full interval.
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
