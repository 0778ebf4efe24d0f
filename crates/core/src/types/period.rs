//! Subscription period in months.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for a month count outside the offered periods.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("subscription period must be 1, 3, 6 or 12 months (got {0})")]
pub struct PeriodError(pub i64);

/// A subscription period the storefront offers.
///
/// Serialized as the bare month count, matching the backend's
/// `subscriptionPeriod` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum SubscriptionPeriod {
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl SubscriptionPeriod {
    /// All periods in ascending order.
    pub const ALL: [Self; 4] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::TwelveMonths,
    ];

    /// Number of months covered.
    #[must_use]
    pub const fn months(self) -> u8 {
        match self {
            Self::OneMonth => 1,
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::TwelveMonths => 12,
        }
    }

    /// Next longer period, saturating at twelve months.
    #[must_use]
    pub const fn longer(self) -> Self {
        match self {
            Self::OneMonth => Self::ThreeMonths,
            Self::ThreeMonths => Self::SixMonths,
            Self::SixMonths | Self::TwelveMonths => Self::TwelveMonths,
        }
    }

    /// Next shorter period, saturating at one month.
    #[must_use]
    pub const fn shorter(self) -> Self {
        match self {
            Self::OneMonth | Self::ThreeMonths => Self::OneMonth,
            Self::SixMonths => Self::ThreeMonths,
            Self::TwelveMonths => Self::SixMonths,
        }
    }

    /// Step through the offered periods; positive steps lengthen, negative
    /// steps shorten, and the ends clamp.
    #[must_use]
    pub fn step(self, direction: i32) -> Self {
        match direction.signum() {
            1 => self.longer(),
            -1 => self.shorter(),
            _ => self,
        }
    }
}

impl TryFrom<i64> for SubscriptionPeriod {
    type Error = PeriodError;

    fn try_from(months: i64) -> Result<Self, Self::Error> {
        match months {
            1 => Ok(Self::OneMonth),
            3 => Ok(Self::ThreeMonths),
            6 => Ok(Self::SixMonths),
            12 => Ok(Self::TwelveMonths),
            other => Err(PeriodError(other)),
        }
    }
}

impl From<SubscriptionPeriod> for u8 {
    fn from(period: SubscriptionPeriod) -> Self {
        period.months()
    }
}

impl fmt::Display for SubscriptionPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mo.", self.months())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_offered_months() {
        for period in SubscriptionPeriod::ALL {
            let months = i64::from(period.months());
            assert_eq!(SubscriptionPeriod::try_from(months).unwrap(), period);
        }
    }

    #[test]
    fn test_try_from_rejects_other_months() {
        assert_eq!(SubscriptionPeriod::try_from(2), Err(PeriodError(2)));
        assert_eq!(SubscriptionPeriod::try_from(0), Err(PeriodError(0)));
        assert_eq!(SubscriptionPeriod::try_from(24), Err(PeriodError(24)));
    }

    #[test]
    fn test_step_clamps_at_ends() {
        use super::SubscriptionPeriod::{OneMonth, SixMonths, ThreeMonths, TwelveMonths};

        assert_eq!(OneMonth.step(-1), OneMonth);
        assert_eq!(OneMonth.step(1), ThreeMonths);
        assert_eq!(SixMonths.step(1), TwelveMonths);
        assert_eq!(TwelveMonths.step(1), TwelveMonths);
        assert_eq!(TwelveMonths.step(-1), SixMonths);
        assert_eq!(ThreeMonths.step(0), ThreeMonths);
    }

    #[test]
    fn test_serde_as_month_count() {
        let json = serde_json::to_string(&SubscriptionPeriod::SixMonths).unwrap();
        assert_eq!(json, "6");
        let parsed: SubscriptionPeriod = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, SubscriptionPeriod::TwelveMonths);
        assert!(serde_json::from_str::<SubscriptionPeriod>("5").is_err());
    }
}
