//! Failed-login tracking for super-admin accounts.
//!
//! Counters are keyed by phone number and guarded by a single mutex. A
//! failure older than the attempt window starts a fresh count; reaching the
//! threshold locks only that phone number until the lockout expires.

use std::collections::HashMap;
use std::time::Instant;

use parking_lot::Mutex;
use tarkib_config::LockoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Failure recorded; this many more are allowed inside the window.
    Counted { remaining: u32 },
    /// The threshold was reached and the identity is now locked.
    Locked,
}

#[derive(Debug, Clone, Copy)]
struct AttemptRecord {
    failures: u32,
    window_started: Instant,
    locked_until: Option<Instant>,
}

#[derive(Debug)]
pub struct LoginAttemptTracker {
    config: LockoutConfig,
    records: Mutex<HashMap<String, AttemptRecord>>,
}

impl LoginAttemptTracker {
    pub fn new(config: LockoutConfig) -> Self {
        Self {
            config,
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn record_failure(&self, identity: &str) -> AttemptOutcome {
        self.record_failure_at(identity, Instant::now())
    }

    pub fn record_failure_at(&self, identity: &str, now: Instant) -> AttemptOutcome {
        let mut records = self.records.lock();
        let record = records
            .entry(identity.to_string())
            .or_insert(AttemptRecord {
                failures: 0,
                window_started: now,
                locked_until: None,
            });

        if record.locked_until.is_some_and(|until| now < until) {
            return AttemptOutcome::Locked;
        }

        if record.locked_until.is_some()
            || now.duration_since(record.window_started) >= self.config.attempt_window
        {
            *record = AttemptRecord {
                failures: 0,
                window_started: now,
                locked_until: None,
            };
        }

        record.failures += 1;
        if record.failures >= self.config.max_failed_attempts {
            record.locked_until = Some(now + self.config.lockout);
            return AttemptOutcome::Locked;
        }

        AttemptOutcome::Counted {
            remaining: self.config.max_failed_attempts - record.failures,
        }
    }

    pub fn is_locked(&self, identity: &str) -> bool {
        self.is_locked_at(identity, Instant::now())
    }

    pub fn is_locked_at(&self, identity: &str, now: Instant) -> bool {
        self.records
            .lock()
            .get(identity)
            .and_then(|record| record.locked_until)
            .is_some_and(|until| now < until)
    }

    /// Forgets every failure recorded for `identity`.
    pub fn reset(&self, identity: &str) {
        self.records.lock().remove(identity);
    }
}
