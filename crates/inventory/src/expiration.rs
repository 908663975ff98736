//! Expiration window, reference date, and day arithmetic.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, ValueObject};

/// How many days ahead of expiry an item is flagged as "expiring soon".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ExpirationWindow(u32);

impl ValueObject for ExpirationWindow {}

impl ExpirationWindow {
    pub const MIN_DAYS: u32 = 3;
    pub const MAX_DAYS: u32 = 9;
    pub const DEFAULT_DAYS: u32 = 3;

    pub fn new(days: u32) -> DomainResult<Self> {
        if !(Self::MIN_DAYS..=Self::MAX_DAYS).contains(&days) {
            return Err(DomainError::validation(format!(
                "expiration window must be between {} and {} days (got {days})",
                Self::MIN_DAYS,
                Self::MAX_DAYS
            )));
        }
        Ok(Self(days))
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl Default for ExpirationWindow {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

impl TryFrom<u32> for ExpirationWindow {
    type Error = DomainError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<ExpirationWindow> for u32 {
    fn from(value: ExpirationWindow) -> Self {
        value.0
    }
}

/// Source of "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date (tests, replays).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Everything the derived predicates need besides the item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryContext {
    pub today: NaiveDate,
    pub window: ExpirationWindow,
}

impl ExpiryContext {
    pub fn new(today: NaiveDate, window: ExpirationWindow) -> Self {
        Self { today, window }
    }

    pub fn from_clock(clock: &dyn Clock, window: ExpirationWindow) -> Self {
        Self::new(clock.today(), window)
    }

    /// Whole days from `today` until `expires_on` (negative once past).
    pub fn days_until(&self, expires_on: NaiveDate) -> i64 {
        expires_on.signed_duration_since(self.today).num_days()
    }
}

/// Human label for the remaining shelf life.
pub fn expiry_label(days_remaining: i64) -> String {
    match days_remaining {
        d if d < 0 => "Expired".to_string(),
        0 => "Expires Today".to_string(),
        1 => "Expires Tomorrow".to_string(),
        d => format!("Expires in {d} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_accepts_only_three_to_nine_days() {
        assert!(ExpirationWindow::new(2).is_err());
        assert_eq!(ExpirationWindow::new(3).unwrap().days(), 3);
        assert_eq!(ExpirationWindow::new(9).unwrap().days(), 9);
        assert!(ExpirationWindow::new(10).is_err());
        assert_eq!(ExpirationWindow::default().days(), 3);
    }

    #[test]
    fn window_deserialization_is_validated() {
        let ok: ExpirationWindow = serde_json::from_str("5").unwrap();
        assert_eq!(ok.days(), 5);
        assert!(serde_json::from_str::<ExpirationWindow>("42").is_err());
    }

    #[test]
    fn days_until_counts_calendar_days() {
        let ctx = ExpiryContext::new(date(2024, 2, 28), ExpirationWindow::default());
        assert_eq!(ctx.days_until(date(2024, 2, 28)), 0);
        assert_eq!(ctx.days_until(date(2024, 3, 1)), 2);
        assert_eq!(ctx.days_until(date(2024, 2, 27)), -1);
    }

    #[test]
    fn fixed_clock_feeds_context() {
        let clock = FixedClock(date(2025, 1, 1));
        let ctx = ExpiryContext::from_clock(&clock, ExpirationWindow::default());
        assert_eq!(ctx.today, date(2025, 1, 1));
    }

    #[test]
    fn labels() {
        assert_eq!(expiry_label(-3), "Expired");
        assert_eq!(expiry_label(0), "Expires Today");
        assert_eq!(expiry_label(1), "Expires Tomorrow");
        assert_eq!(expiry_label(6), "Expires in 6 days");
    }
}
