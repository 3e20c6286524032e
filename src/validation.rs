//! Field-level checks shared by the repository services.
//!
//! Every failure is an [`AppError::Validation`] naming the offending field.
//! Money is `decimal(10, 2)`: stored as integer cents, exposed as [`Decimal`].

use chrono::NaiveDate;
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::error::{AppError, AppResult};

/// Largest magnitude representable as `decimal(10, 2)`, in cents.
pub const MAX_MONEY_CENTS: i64 = 9_999_999_999;

pub fn cents_to_money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn money_to_cents(field: &str, amount: Decimal) -> AppResult<i64> {
    if amount.normalize().scale() > 2 {
        return Err(AppError::validation(
            field,
            "must have at most 2 decimal places",
        ));
    }
    let cents = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|c| c.to_i64())
        .filter(|c| c.abs() <= MAX_MONEY_CENTS)
        .ok_or_else(|| AppError::validation(field, "must fit in 10 digits"))?;
    Ok(cents)
}

pub fn positive_money(field: &str, amount: Decimal) -> AppResult<i64> {
    let cents = money_to_cents(field, amount)?;
    if cents <= 0 {
        return Err(AppError::validation(field, "must be greater than 0"));
    }
    Ok(cents)
}

pub fn non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(field, "must not be empty"));
    }
    Ok(())
}

pub fn max_len(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Required, bounded text column.
pub fn short_text(field: &str, value: &str, max: usize) -> AppResult<()> {
    non_empty(field, value)?;
    max_len(field, value, max)
}

pub fn email(field: &str, value: &str) -> AppResult<()> {
    max_len(field, value, 254)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation(field, "must be a valid email address"));
    }
    Ok(())
}

pub fn rating(value: i32) -> AppResult<i16> {
    if !(1..=5).contains(&value) {
        return Err(AppError::validation("rating", "must be between 1 and 5"));
    }
    Ok(value as i16)
}

/// Number of nights between the two dates; `end_date` must come after `start_date`.
pub fn stay_nights(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<i64> {
    let nights = (end_date - start_date).num_days();
    if nights <= 0 {
        return Err(AppError::validation(
            "end_date",
            "must be after start_date",
        ));
    }
    Ok(nights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn field_of(err: AppError) -> String {
        match err {
            AppError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn money_converts_to_cents_and_back() {
        assert_eq!(money_to_cents("price", dec("150.00")).unwrap(), 15_000);
        assert_eq!(money_to_cents("price", dec("299.99")).unwrap(), 29_999);
        assert_eq!(money_to_cents("price", dec("375.000")).unwrap(), 37_500);
        assert_eq!(cents_to_money(75_000), dec("750.00"));
    }

    #[test]
    fn money_rejects_extra_precision_and_overflow() {
        assert_eq!(field_of(money_to_cents("amount", dec("1.005")).unwrap_err()), "amount");
        assert!(money_to_cents("amount", dec("100000000.00")).is_err());
        assert!(money_to_cents("amount", dec("99999999.99")).is_ok());
        assert_eq!(field_of(money_to_cents("amount", Decimal::MAX).unwrap_err()), "amount");
        assert_eq!(field_of(positive_money("price", Decimal::MAX).unwrap_err()), "price");
        assert!(money_to_cents("min_price", Decimal::MIN).is_err());
    }

    #[test]
    fn positive_money_rejects_zero_and_negative() {
        assert!(positive_money("price_per_night", Decimal::ZERO).is_err());
        assert!(positive_money("price_per_night", dec("-10.00")).is_err());
        assert_eq!(positive_money("price_per_night", dec("0.01")).unwrap(), 1);
    }

    #[test]
    fn email_shape() {
        assert!(email("email", "alice.williams@email.com").is_ok());
        assert!(email("email", "alice").is_err());
        assert!(email("email", "@email.com").is_err());
        assert!(email("email", "alice@localhost").is_err());
        assert!(email("email", "al ice@email.com").is_err());
    }

    #[test]
    fn text_bounds() {
        assert!(short_text("name", "Urban Loft", 100).is_ok());
        assert!(short_text("name", "   ", 100).is_err());
        assert_eq!(field_of(max_len("phone_number", "+1234567890123456", 15).unwrap_err()), "phone_number");
    }

    #[test]
    fn rating_range() {
        assert_eq!(rating(1).unwrap(), 1);
        assert_eq!(rating(5).unwrap(), 5);
        assert!(rating(0).is_err());
        assert!(rating(6).is_err());
    }

    #[test]
    fn nights_require_end_after_start() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(stay_nights(start, NaiveDate::from_ymd_opt(2026, 3, 6).unwrap()).unwrap(), 5);
        assert_eq!(field_of(stay_nights(start, start).unwrap_err()), "end_date");
    }
}
