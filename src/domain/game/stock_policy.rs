//! Age-based stock clearing rules
//!
//! Games older than the delete threshold are removed from the catalog,
//! games between the delete and discount thresholds get a discount price.
//! Newer games are left alone.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::shared::{DomainError, DomainResult};

/// Release age (in months, relative to today) at which a game is deleted.
pub const DELETE_MONTHS: i32 = -18;
/// Release age (in months, relative to today) at which a game is discounted.
pub const UPDATE_PRICE_MONTHS: i32 = -12;
pub const DISCOUNT_PERCENT: u32 = 20;

/// What the clearing job does with one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAction {
    Delete,
    Discount,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockThresholds {
    /// Games released on or before this date are deleted
    pub delete: NaiveDate,
    /// Games released on or before this date (and after `delete`) are discounted
    pub update: NaiveDate,
}

impl StockThresholds {
    pub fn classify(&self, release_date: NaiveDate) -> StockAction {
        if release_date <= self.delete {
            StockAction::Delete
        } else if release_date <= self.update {
            StockAction::Discount
        } else {
            StockAction::Keep
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockPolicy {
    delete_after_months: u32,
    discount_after_months: u32,
    discount_percent: u32,
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self {
            delete_after_months: DELETE_MONTHS.unsigned_abs(),
            discount_after_months: UPDATE_PRICE_MONTHS.unsigned_abs(),
            discount_percent: DISCOUNT_PERCENT,
        }
    }
}

impl StockPolicy {
    pub fn new(
        delete_after_months: u32,
        discount_after_months: u32,
        discount_percent: u32,
    ) -> DomainResult<Self> {
        if discount_after_months >= delete_after_months {
            return Err(DomainError::Validation(format!(
                "discount age ({} months) must be lower than delete age ({} months)",
                discount_after_months, delete_after_months
            )));
        }
        if discount_percent > 100 {
            return Err(DomainError::Validation(format!(
                "discount percent must be within 0..=100 (got {})",
                discount_percent
            )));
        }
        Ok(Self {
            delete_after_months,
            discount_after_months,
            discount_percent,
        })
    }

    pub fn discount_percent(&self) -> u32 {
        self.discount_percent
    }

    /// Thresholds relative to `today`. Month shifts clamp to the last day
    /// of the target month (Aug 31 minus 6 months is Feb 28/29).
    pub fn thresholds(&self, today: NaiveDate) -> DomainResult<StockThresholds> {
        let shift = |months: u32| {
            today.checked_sub_months(Months::new(months)).ok_or_else(|| {
                DomainError::Validation(format!("cannot shift {} back by {} months", today, months))
            })
        };

        Ok(StockThresholds {
            delete: shift(self.delete_after_months)?,
            update: shift(self.discount_after_months)?,
        })
    }

    /// Discount price computed from the base price. Never compounds on a
    /// previous discount.
    ///
    /// The kept fraction is applied as a factor <= 1, so the result never
    /// exceeds `price` and the multiplication stays in range.
    pub fn discounted_price(&self, price: Decimal) -> DomainResult<Decimal> {
        let hundred = Decimal::ONE_HUNDRED;
        let factor = (hundred - Decimal::from(self.discount_percent)) / hundred;
        price
            .checked_mul(factor)
            .map(|discounted| discounted.normalize())
            .ok_or_else(|| {
                DomainError::Validation(format!("cannot discount price {}", price))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_policy_uses_catalog_constants() {
        let policy = StockPolicy::default();
        assert_eq!(policy.discount_percent(), 20);

        let t = policy.thresholds(date(2026, 10, 18)).unwrap();
        assert_eq!(t.delete, date(2025, 4, 18));
        assert_eq!(t.update, date(2025, 10, 18));
        assert!(t.delete < t.update);
    }

    #[test]
    fn month_shift_clamps_to_end_of_month() {
        let t = StockPolicy::default().thresholds(date(2026, 8, 31)).unwrap();
        assert_eq!(t.delete, date(2025, 2, 28));
        assert_eq!(t.update, date(2025, 8, 31));
    }

    #[test]
    fn classify_boundaries() {
        let t = StockPolicy::default().thresholds(date(2026, 10, 18)).unwrap();

        assert_eq!(t.classify(date(2025, 2, 18)), StockAction::Delete);
        // exactly on the delete threshold: deletion wins
        assert_eq!(t.classify(t.delete), StockAction::Delete);
        assert_eq!(t.classify(date(2025, 4, 19)), StockAction::Discount);
        assert_eq!(t.classify(t.update), StockAction::Discount);
        assert_eq!(t.classify(date(2025, 10, 19)), StockAction::Keep);
        assert_eq!(t.classify(date(2026, 4, 18)), StockAction::Keep);
    }

    #[test]
    fn discount_is_twenty_percent_off_base_price() {
        let policy = StockPolicy::default();
        assert_eq!(policy.discounted_price(Decimal::new(100, 0)).unwrap(), Decimal::new(80, 0));
        assert_eq!(
            policy.discounted_price(Decimal::new(5999, 2)).unwrap(),
            Decimal::new(47992, 3)
        );
        assert_eq!(policy.discounted_price(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn huge_prices_discount_without_overflow() {
        let policy = StockPolicy::default();

        let big = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        assert_eq!(
            policy.discounted_price(big).unwrap(),
            Decimal::from_i128_with_scale(8 * 10i128.pow(26), 0)
        );

        let max = policy.discounted_price(Decimal::MAX).unwrap();
        assert!(max > Decimal::ZERO);
        assert!(max < Decimal::MAX);

        let steep = StockPolicy::new(18, 12, 99).unwrap();
        assert!(steep.discounted_price(Decimal::MAX).unwrap() < Decimal::MAX);
    }

    #[test]
    fn new_rejects_inverted_thresholds() {
        assert!(StockPolicy::new(12, 18, 20).is_err());
        assert!(StockPolicy::new(12, 12, 20).is_err());
        assert!(StockPolicy::new(18, 12, 101).is_err());
        assert!(StockPolicy::new(24, 6, 50).is_ok());
    }
}
