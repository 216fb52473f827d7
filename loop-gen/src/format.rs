//! Rendering of typed loop values into the strings written to the CSV.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::money::Money;

pub const ISO_DATE: &str = "%Y-%m-%d";
pub const LOCALE_DATE: &str = "%m/%d/%Y";

/// How monetary fields are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoneyStyle {
    /// `$1,234.56`, with zero written as an empty cell.
    Currency,
    /// `1234.56`, with zero written as `.00`.
    Plain,
}

/// How rates and percentages are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PercentStyle {
    /// `3%`
    Suffixed,
    /// `2.5`
    Bare,
}

impl MoneyStyle {
    #[must_use]
    pub fn render(self, money: Money) -> String {
        match self {
            MoneyStyle::Currency if money.is_zero() => String::new(),
            MoneyStyle::Currency => format!("${}", group_thousands(&money.to_string())),
            MoneyStyle::Plain if money.is_zero() => ".00".to_owned(),
            MoneyStyle::Plain => money.to_string(),
        }
    }

    #[must_use]
    pub fn render_opt(self, money: Option<Money>) -> String {
        money.map(|m| self.render(m)).unwrap_or_default()
    }
}

impl PercentStyle {
    /// Renders a fractional `rate` (`0.025`) as a percentage (`2.5` / `2.5%`).
    #[must_use]
    pub fn render(self, rate: Decimal) -> String {
        let percent = (rate * Decimal::ONE_HUNDRED).normalize();
        match self {
            PercentStyle::Suffixed => format!("{}%", percent),
            PercentStyle::Bare => percent.to_string(),
        }
    }
}

#[must_use]
pub fn iso_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(ISO_DATE).to_string())
        .unwrap_or_default()
}

#[must_use]
pub fn locale_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(LOCALE_DATE).to_string())
        .unwrap_or_default()
}

/// Inserts `,` separators into the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain, ""));
    let mut grouped = String::with_capacity(plain.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency_style() {
        assert_eq!(MoneyStyle::Currency.render(Money::from(499_900)), "$499,900.00");
        assert_eq!(MoneyStyle::Currency.render(Money::from(1_250_000)), "$1,250,000.00");
        assert_eq!(MoneyStyle::Currency.render(Money::from(900)), "$900.00");
        assert_eq!(MoneyStyle::Currency.render(Money::ZERO), "");
        assert_eq!(MoneyStyle::Currency.render_opt(None), "");
    }

    #[test]
    fn test_plain_style() {
        let commission = Money::from(499_900).scaled(Decimal::from_str("0.025").unwrap());
        assert_eq!(MoneyStyle::Plain.render(commission), "12497.50");
        assert_eq!(MoneyStyle::Plain.render(Money::ZERO), ".00");
    }

    #[test]
    fn test_percent_styles() {
        let three = Decimal::from_str("0.03").unwrap();
        let two_and_half = Decimal::from_str("0.025").unwrap();
        assert_eq!(PercentStyle::Suffixed.render(three), "3%");
        assert_eq!(PercentStyle::Bare.render(two_and_half), "2.5");
        assert_eq!(PercentStyle::Suffixed.render(Decimal::ZERO), "0%");
        assert_eq!(PercentStyle::Bare.render(Decimal::ZERO), "0");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert_eq!(iso_date(date), "2025-01-01");
        assert_eq!(locale_date(date), "01/01/2025");
        assert_eq!(iso_date(None), "");
    }
}
