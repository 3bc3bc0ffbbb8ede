//! Brute-force lockout: consecutive-failure tracking with an
//! escalating cooldown.
//!
//! The state machine is `Open → Cooling → Open`. It is pure over an
//! injected `now` so the backoff schedule can be tested without
//! sleeping, and it is serialized into the vault file so a scripted
//! attacker cannot reset the counter by restarting the process.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tunable lockout policy.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failures tolerated before the first cooldown.
    pub threshold: u32,
    /// Cooldown after crossing the threshold, in seconds.
    pub base_delay_secs: u64,
    /// Upper bound on any single cooldown, in seconds.
    pub max_delay_secs: u64,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: 3,
            base_delay_secs: 30,
            max_delay_secs: 3_600,
        }
    }
}

impl LockoutPolicy {
    /// Cooldown for the given consecutive-failure count.
    ///
    /// Doubles for each failure past the threshold, capped so the
    /// legitimate owner is never locked out for good.
    fn backoff_secs(&self, failures: u32) -> u64 {
        let over = failures.saturating_sub(self.threshold);
        let factor = 1u64 << over.min(20);
        self.base_delay_secs
            .saturating_mul(factor)
            .min(self.max_delay_secs)
    }
}

/// Whether an unlock attempt may proceed right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Allowed,
    Blocked { remaining_secs: u64 },
}

/// Persisted lockout state, scoped to one vault.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockoutState {
    /// Consecutive failed unlock attempts.
    #[serde(default)]
    pub consecutive_failures: u32,

    /// End of the current cooldown, if one is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<DateTime<Utc>>,
}

impl LockoutState {
    /// Must be consulted before any verify/derive work: a blocked
    /// attempt never gets to spend a KDF call.
    pub fn check(&self, now: DateTime<Utc>) -> Attempt {
        match self.locked_until {
            Some(until) if until > now => {
                let remaining = (until - now).num_seconds().max(1) as u64;
                Attempt::Blocked {
                    remaining_secs: remaining,
                }
            }
            _ => Attempt::Allowed,
        }
    }

    /// Record a failed attempt; starts or extends the cooldown once the
    /// threshold is crossed.
    pub fn record_failure(&mut self, now: DateTime<Utc>, policy: &LockoutPolicy) {
        self.consecutive_failures += 1;

        if self.consecutive_failures >= policy.threshold {
            let delay = policy.backoff_secs(self.consecutive_failures);
            self.locked_until = Some(now + Duration::seconds(delay as i64));
        }
    }

    /// Reset to a clean slate after a successful unlock.
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.locked_until = None;
    }
}
