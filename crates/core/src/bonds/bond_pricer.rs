//! Discrete-discounting present-value model for bonds.
//!
//! Coupons and face value are discounted per period at the periodic
//! yield, except the final period, which is discounted by the fraction
//! of a 365-day year actually remaining. The blend keeps the valuation
//! smooth as maturity approaches; note it is discontinuous at period
//! boundaries because the remaining period count is a ceiling.

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use super::bond_errors::BondError;
use crate::constants::{DAYS_PER_YEAR, SECONDS_PER_YEAR};
use crate::holdings::CouponFrequency;

/// Current value of a bond from its present-value inputs.
///
/// A matured bond (`maturity_date <= as_of`) is worth exactly its face
/// value. No negative-price clamping is applied.
pub fn present_value(
    face_value: Decimal,
    coupon_rate_pct: Decimal,
    ytm_pct: Decimal,
    maturity_date: DateTime<Utc>,
    frequency: CouponFrequency,
    as_of: DateTime<Utc>,
) -> Result<Decimal, BondError> {
    let seconds_to_maturity = (maturity_date - as_of).num_seconds();
    if seconds_to_maturity <= 0 {
        return Ok(face_value);
    }

    let time_to_maturity_years =
        Decimal::from(seconds_to_maturity) / Decimal::from(SECONDS_PER_YEAR);
    let periods_per_year = Decimal::from(frequency.periods_per_year());

    let periodic_coupon = face_value * (coupon_rate_pct / dec!(100)) / periods_per_year;
    let periodic_ytm = (ytm_pct / dec!(100)) / periods_per_year;

    // A bond one day past a coupon date still counts a full period
    let remaining_periods = (time_to_maturity_years * periods_per_year)
        .ceil()
        .to_i64()
        .ok_or_else(|| {
            BondError::InvalidParameters("remaining period count is unrepresentable".to_string())
        })?;

    // Fraction of a 365-day year left in the final period
    let days_to_maturity = Decimal::from(seconds_to_maturity) / dec!(86_400);
    let progress_ratio = days_to_maturity.ceil() / DAYS_PER_YEAR;

    let one_plus_ytm = Decimal::ONE + periodic_ytm;
    let final_period_denominator = Decimal::ONE + periodic_ytm * progress_ratio;
    if final_period_denominator.is_zero() || (remaining_periods > 1 && one_plus_ytm.is_zero()) {
        return Err(BondError::InvalidParameters(
            "discount denominator is zero".to_string(),
        ));
    }

    let mut value = Decimal::ZERO;
    for t in (1..=remaining_periods).rev() {
        let discounted_coupon = if t > 1 {
            periodic_coupon / checked_discount_factor(one_plus_ytm, t)?
        } else {
            periodic_coupon / final_period_denominator
        };
        value += discounted_coupon;
    }

    let discounted_face = if remaining_periods > 1 {
        face_value / checked_discount_factor(one_plus_ytm, remaining_periods)?
    } else {
        face_value / final_period_denominator
    };

    Ok(value + discounted_face)
}

fn checked_discount_factor(one_plus_ytm: Decimal, periods: i64) -> Result<Decimal, BondError> {
    one_plus_ytm.checked_powi(periods).ok_or_else(|| {
        BondError::InvalidParameters(format!(
            "discount factor overflows at {} periods",
            periods
        ))
    })
}

/// Annual coupon amount implied by a face value and coupon rate.
pub fn annual_coupon_amount(face_value: Decimal, coupon_rate_pct: Decimal) -> Decimal {
    face_value * coupon_rate_pct / dec!(100)
}

/// Back-calculate the annual coupon rate (in percent) from one periodic
/// payment amount.
pub fn implied_coupon_rate(
    face_value: Decimal,
    periodic_payment: Decimal,
    frequency: CouponFrequency,
) -> Result<Decimal, BondError> {
    if face_value <= Decimal::ZERO {
        return Err(BondError::InvalidParameters(format!(
            "face value must be positive, got {}",
            face_value
        )));
    }
    let periods_per_year = Decimal::from(frequency.periods_per_year());
    Ok(periodic_payment * periods_per_year / face_value * dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn matured_bond_is_worth_exactly_face_value() {
        let as_of = at(2024, 6, 1);
        let value = present_value(
            dec!(1000),
            dec!(5),
            dec!(8),
            as_of - Duration::days(1),
            CouponFrequency::Annual,
            as_of,
        )
        .unwrap();
        assert_eq!(value, dec!(1000));
    }

    #[test]
    fn zero_coupon_bond_is_discounted_face_only() {
        // Exactly two 365-day years to maturity, semiannual: 4 periods
        let as_of = at(2024, 1, 1);
        let maturity = as_of + Duration::days(730);

        let value = present_value(
            dec!(1000),
            Decimal::ZERO,
            dec!(6),
            maturity,
            CouponFrequency::Semiannual,
            as_of,
        )
        .unwrap();

        let expected = dec!(1000) / dec!(1.03).powi(4);
        assert_eq!(value, expected);
    }

    #[test]
    fn single_remaining_period_uses_fractional_discounting() {
        // 100 days to maturity, annual coupon: one period left, so both
        // the coupon and the face are discounted by 1 + y * 100/365
        let as_of = at(2024, 3, 1);
        let maturity = as_of + Duration::days(100);

        let value = present_value(
            dec!(1000),
            dec!(5),
            dec!(8),
            maturity,
            CouponFrequency::Annual,
            as_of,
        )
        .unwrap();

        let denominator = Decimal::ONE + dec!(0.08) * (dec!(100) / dec!(365));
        let expected = (dec!(50) + dec!(1000)) / denominator;
        assert_eq!(value, expected);
    }

    #[test]
    fn one_day_past_a_period_boundary_adds_a_full_period() {
        // 366 days at annual frequency rounds up to two periods: one
        // fully discounted coupon plus a fractional final period
        let as_of = at(2023, 3, 1);
        let maturity = as_of + Duration::days(366);

        let value = present_value(
            dec!(1000),
            dec!(5),
            dec!(8),
            maturity,
            CouponFrequency::Annual,
            as_of,
        )
        .unwrap();

        let full = dec!(1.08).powi(2);
        let fractional = Decimal::ONE + dec!(0.08) * (dec!(366) / dec!(365));
        let expected = dec!(50) / full + dec!(50) / fractional + dec!(1000) / full;
        assert_eq!(value, expected);
    }

    #[test]
    fn quarterly_cadence_counts_quarter_periods() {
        // 365 days at quarterly frequency: exactly 4 periods
        let as_of = at(2024, 3, 1);
        let maturity = as_of + Duration::days(365);

        let value = present_value(
            dec!(1000),
            dec!(4),
            dec!(4),
            maturity,
            CouponFrequency::Quarterly,
            as_of,
        )
        .unwrap();

        // Periodic coupon 10, periodic yield 1%
        let coupon = dec!(10);
        let fractional = Decimal::ONE + dec!(0.01) * (dec!(365) / dec!(365));
        let mut expected = Decimal::ZERO;
        for t in 2..=4i64 {
            expected += coupon / dec!(1.01).powi(t);
        }
        expected += coupon / fractional;
        expected += dec!(1000) / dec!(1.01).powi(4);
        assert_eq!(value, expected);
    }

    #[test]
    fn degenerate_yield_is_rejected() {
        // -200% annual YTM at semiannual cadence makes 1 + y == 0
        let as_of = at(2024, 1, 1);
        let maturity = as_of + Duration::days(730);

        let err = present_value(
            dec!(1000),
            dec!(5),
            dec!(-200),
            maturity,
            CouponFrequency::Semiannual,
            as_of,
        )
        .unwrap_err();
        assert!(matches!(err, BondError::InvalidParameters(_)));
    }

    #[test]
    fn implied_coupon_rate_round_trips_the_periodic_payment() {
        let rate = implied_coupon_rate(dec!(1000), dec!(25), CouponFrequency::Quarterly).unwrap();
        assert_eq!(rate, dec!(10));
        assert_eq!(annual_coupon_amount(dec!(1000), rate), dec!(100));
    }

    #[test]
    fn implied_coupon_rate_rejects_non_positive_face() {
        let err = implied_coupon_rate(Decimal::ZERO, dec!(25), CouponFrequency::Annual).unwrap_err();
        assert!(matches!(err, BondError::InvalidParameters(_)));
    }
}
