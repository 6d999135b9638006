//! Transient validation notices with an auto-hide deadline.

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_NOTICE_DELAY_SECS: u64 = 3;
const MAX_NOTICE_DELAY_SECS: u64 = 86_400;

/// A visible message and the moment it stops being visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub hide_at: DateTime<Utc>,
    pub generation: u64,
}

/// Holds at most one notice. Raising a new one replaces the old and restarts
/// the deadline; each raise gets a fresh generation so a hide scheduled for an
/// older notice is ignored.
#[derive(Debug, Clone)]
pub struct Notifier {
    delay: Duration,
    current: Option<Notice>,
    generation: u64,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::with_delay_secs(DEFAULT_NOTICE_DELAY_SECS)
    }
}

impl Notifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: None,
            generation: 0,
        }
    }

    pub fn with_delay_secs(secs: u64) -> Self {
        Self::new(clamped_delay(secs))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Applies to notices raised after the call.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn set_delay_secs(&mut self, secs: u64) {
        self.delay = clamped_delay(secs);
    }

    pub fn raise(&mut self, message: impl Into<String>) -> u64 {
        self.raise_at(message, Utc::now())
    }

    pub fn raise_at(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        self.generation += 1;
        self.current = Some(Notice {
            message: message.into(),
            raised_at: now,
            hide_at: now + self.delay,
            generation: self.generation,
        });
        self.generation
    }

    pub fn current(&mut self) -> Option<&Notice> {
        self.current_at(Utc::now())
    }

    /// The visible notice at `now`; an expired one is dropped.
    pub fn current_at(&mut self, now: DateTime<Utc>) -> Option<&Notice> {
        if self.current.as_ref().is_some_and(|notice| now >= notice.hide_at) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn is_shown_at(&mut self, now: DateTime<Utc>) -> bool {
        self.current_at(now).is_some()
    }

    /// Hides the notice only if it is still the one identified by `generation`.
    pub fn hide(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(notice) if notice.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

fn clamped_delay(secs: u64) -> Duration {
    Duration::seconds(secs.min(MAX_NOTICE_DELAY_SECS) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn notice_hides_after_delay() {
        let mut notifier = Notifier::default();
        notifier.raise_at("Please Enter a Valid Budget", at(0));
        assert!(notifier.is_shown_at(at(2)));
        assert!(!notifier.is_shown_at(at(3)));
    }

    #[test]
    fn new_notice_restarts_deadline_without_stacking() {
        let mut notifier = Notifier::with_delay_secs(3);
        notifier.raise_at("first", at(0));
        notifier.raise_at("second", at(2));
        let notice = notifier.current_at(at(4)).cloned().unwrap();
        assert_eq!(notice.message, "second");
        assert_eq!(notice.hide_at, at(5));
        assert!(!notifier.is_shown_at(at(5)));
    }

    #[test]
    fn stale_hide_does_not_clear_newer_notice() {
        let mut notifier = Notifier::default();
        let first = notifier.raise_at("first", at(0));
        let second = notifier.raise_at("second", at(1));
        assert!(!notifier.hide(first));
        assert!(notifier.is_shown_at(at(2)));
        assert!(notifier.hide(second));
        assert!(!notifier.is_shown_at(at(2)));
    }

    #[test]
    fn delay_is_configurable() {
        let mut notifier = Notifier::with_delay_secs(10);
        notifier.raise_at("slow", at(0));
        assert!(notifier.is_shown_at(at(9)));
        notifier.set_delay(Duration::seconds(1));
        notifier.raise_at("fast", at(9));
        assert!(!notifier.is_shown_at(at(10)));
    }

    #[test]
    fn dismiss_clears_notice() {
        let mut notifier = Notifier::default();
        notifier.raise_at("gone", at(0));
        notifier.dismiss();
        assert!(notifier.current_at(at(0)).is_none());
    }
}
