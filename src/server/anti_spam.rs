//! Per-socket flood guard.
//!
//! Client messages and server pushes are counted in one-second windows. Going
//! over either budget bans the socket for `BAN_DURATION_SECONDS`. Repeats of
//! the same error code are dropped until the client sends a valid action.

use std::time::{Duration, Instant};
use log::{debug, warn};

use crate::config::anti_spam::{BAN_DURATION_SECONDS, MAX_PUSHES_PER_SECOND, MAX_REQUESTS_PER_SECOND};

/// What to do with the message being counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// This message tripped the ban.
    Ban,
    /// The socket was already banned.
    Banned,
}

/// Event counter over a one-second window that restarts lazily.
#[derive(Debug, Clone, Copy)]
struct RateWindow {
    opened: Instant,
    count: u32,
}

impl RateWindow {
    fn new(now: Instant) -> Self {
        Self { opened: now, count: 0 }
    }

    /// Count one event; true once the window holds more than `limit`.
    fn hit(&mut self, now: Instant, limit: u32) -> bool {
        if now.saturating_duration_since(self.opened) >= Duration::from_secs(1) {
            self.opened = now;
            self.count = 0;
        }
        self.count = self.count.saturating_add(1);
        self.count > limit
    }
}

pub struct AntiSpamState {
    label: String,
    requests: RateWindow,
    pushes: RateWindow,
    last_error: Option<String>,
    banned_until: Option<Instant>,
}

impl AntiSpamState {
    /// `label` names the socket in logs.
    pub fn new(label: impl Into<String>) -> Self {
        let now = Instant::now();
        Self {
            label: label.into(),
            requests: RateWindow::new(now),
            pushes: RateWindow::new(now),
            last_error: None,
            banned_until: None,
        }
    }

    /// Count an incoming client message.
    pub fn on_request(&mut self) -> Verdict {
        self.on_request_at(Instant::now())
    }

    /// Count an outgoing frame, win notice or error.
    pub fn on_push(&mut self) -> Verdict {
        self.on_push_at(Instant::now())
    }

    fn on_request_at(&mut self, now: Instant) -> Verdict {
        if self.banned_at(now) {
            return Verdict::Banned;
        }
        if self.requests.hit(now, MAX_REQUESTS_PER_SECOND) {
            self.ban(now, "requests");
            return Verdict::Ban;
        }
        Verdict::Pass
    }

    fn on_push_at(&mut self, now: Instant) -> Verdict {
        if self.banned_at(now) {
            return Verdict::Banned;
        }
        if self.pushes.hit(now, MAX_PUSHES_PER_SECOND) {
            self.ban(now, "pushes");
            return Verdict::Ban;
        }
        Verdict::Pass
    }

    /// Whether an error with `code` should reach the client. The same code
    /// twice in a row is dropped.
    pub fn admit_error(&mut self, code: &str) -> bool {
        if self.last_error.as_deref() == Some(code) {
            debug!("[AntiSpam] Dropped repeated {} for session={}", code, self.label);
            return false;
        }
        self.last_error = Some(code.to_string());
        true
    }

    /// A valid action arrived; the next error is reported again.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn is_banned(&self) -> bool {
        self.banned_at(Instant::now())
    }

    /// Seconds left on the ban, 0 when not banned.
    pub fn ban_remaining_secs(&self) -> u64 {
        self.banned_until
            .map_or(0, |until| until.saturating_duration_since(Instant::now()).as_secs())
    }

    fn banned_at(&self, now: Instant) -> bool {
        self.banned_until.is_some_and(|until| now < until)
    }

    fn ban(&mut self, now: Instant, budget: &str) {
        self.banned_until = Some(now + Duration::from_secs(BAN_DURATION_SECONDS));
        warn!(
            "[AntiSpam] Banned session={} for {}s: over the {} budget",
            self.label, BAN_DURATION_SECONDS, budget
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_error_codes_are_dropped_until_valid_action() {
        let mut guard = AntiSpamState::new("s");
        assert!(guard.admit_error("INVALID_ACTION"));
        assert!(!guard.admit_error("INVALID_ACTION"));
        assert!(guard.admit_error("VIEWPORT_TOO_LARGE"));
        guard.clear_error();
        assert!(guard.admit_error("VIEWPORT_TOO_LARGE"));
    }

    #[test]
    fn request_flood_bans_then_reports_banned() {
        let mut guard = AntiSpamState::new("s");
        let now = Instant::now();
        for _ in 0..MAX_REQUESTS_PER_SECOND {
            assert_eq!(guard.on_request_at(now), Verdict::Pass);
        }
        assert_eq!(guard.on_request_at(now), Verdict::Ban);
        assert_eq!(guard.on_request_at(now), Verdict::Banned);
        assert_eq!(guard.on_push_at(now), Verdict::Banned);
        assert!(guard.is_banned());
        assert!(guard.ban_remaining_secs() > 0);
    }

    #[test]
    fn push_budget_is_separate_from_requests() {
        let mut guard = AntiSpamState::new("s");
        let now = Instant::now();
        for _ in 0..MAX_PUSHES_PER_SECOND {
            assert_eq!(guard.on_push_at(now), Verdict::Pass);
        }
        assert_eq!(guard.on_push_at(now), Verdict::Ban);
        assert!(guard.is_banned());
    }

    #[test]
    fn window_restarts_after_a_second() {
        let mut guard = AntiSpamState::new("s");
        let start = Instant::now();
        for _ in 0..MAX_REQUESTS_PER_SECOND {
            assert_eq!(guard.on_request_at(start), Verdict::Pass);
        }
        let later = start + Duration::from_secs(1);
        assert_eq!(guard.on_request_at(later), Verdict::Pass);
        assert!(!guard.is_banned());
        assert_eq!(guard.ban_remaining_secs(), 0);
    }
}
