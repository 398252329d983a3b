//! Cooperative cancellation and injectable time.
//!
//! A request carries one [`CancelToken`]; engines call
//! [`CancelToken::checkpoint`] between facilities so a cancelled or expired
//! request returns promptly without surfacing partial results. The
//! [`Clock`] trait lets the session store and weather cache be tested
//! without sleeping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};

use super::RiskError;

/// Request-scoped cancellation flag plus optional deadline.
///
/// Cloning shares the underlying flag, so an adapter can hand one half to
/// the transport layer and the other to the engine.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Token that never cancels and carries no deadline.
    pub fn none() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: None,
        }
    }

    /// Token that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Signals cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Remaining time before the deadline, if one is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Returns `Err(Cancelled)` or `Err(DeadlineExceeded)` when the request
    /// should stop, `Ok(())` otherwise. Cancellation wins over expiry.
    pub fn checkpoint(&self) -> Result<(), RiskError> {
        if self.cancelled.load(Ordering::SeqCst) {
            return Err(RiskError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(RiskError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}

/// Time source for TTL logic. Production uses [`SystemClock`]; tests drive a
/// [`ManualClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Manually advanced clock for deterministic expiry tests.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<SystemTime>>,
}

impl ManualClock {
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Starts at the Unix epoch.
    pub fn at_epoch() -> Self {
        Self::new(SystemTime::UNIX_EPOCH)
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_passes_checkpoint() {
        assert!(CancelToken::none().checkpoint().is_ok());
    }

    #[test]
    fn cancelled_token_fails_every_clone() {
        let token = CancelToken::none();
        let clone = token.clone();
        token.cancel();
        assert_eq!(clone.checkpoint(), Err(RiskError::Cancelled));
    }

    #[test]
    fn elapsed_deadline_reports_deadline_exceeded() {
        let token = CancelToken::with_timeout(Duration::from_secs(0));
        assert_eq!(token.checkpoint(), Err(RiskError::DeadlineExceeded));
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::at_epoch();
        let t0 = clock.now();
        clock.advance(Duration::from_secs(3600));
        assert_eq!(clock.now().duration_since(t0).unwrap().as_secs(), 3600);
    }
}
