//! Money type for cart prices and totals.
//!
//! Amounts are exact decimals in major units. The storefront writes prices
//! as plain JSON numbers (`500`, `12.5`, `33.333`) and a snapshot keeps the
//! number it was given: nothing is rounded until an amount is displayed or
//! asked for in minor units.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Decimal places of a minor unit. Every supported currency uses two.
pub const MINOR_DIGITS: u32 = 2;

/// Most decimal places an amount keeps; further digits are truncated.
pub const MAX_SCALE: u32 = 18;

/// Display currencies.
///
/// The cart itself is single-currency; this only selects the symbol used
/// when rendering amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Currency {
    #[default]
    NGN,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "NGN").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::NGN => "NGN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₦").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::NGN => "\u{20a6}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "NGN" => Some(Currency::NGN),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Currency::from_code(&code).ok_or_else(|| {
            de::Error::unknown_variant(&code, &["NGN", "USD", "EUR", "GBP"])
        })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount in major units, held as `units * 10^-scale`.
///
/// The representation is canonical (no trailing zero digits after the
/// point), so `500` and `500.00` compare equal. Arithmetic saturates
/// instead of overflowing: cart math is total and a pathological price
/// must not take the engine down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Money {
    units: i128,
    scale: u32,
}

impl Money {
    const MAX: Money = Money {
        units: i128::MAX,
        scale: 0,
    };
    const MIN: Money = Money {
        units: i128::MIN,
        scale: 0,
    };

    /// Create an amount from whole major units.
    pub const fn from_major_units(major: i64) -> Self {
        Self {
            units: major as i128,
            scale: 0,
        }
    }

    /// Create an amount from a major-unit number, keeping every decimal
    /// its shortest representation carries.
    ///
    /// Returns `None` for NaN, infinities and values too large to hold.
    ///
    /// ```
    /// use vault_cart::Money;
    /// let price = Money::from_major(33.333).unwrap();
    /// assert_eq!(price.to_string(), "33.333");
    /// assert_eq!(price.minor(), 3333);
    /// assert!(Money::from_major(f64::NAN).is_none());
    /// ```
    pub fn from_major(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        // f64's Display is the shortest decimal that reads back to the same value
        Self::parse_decimal(&amount.to_string())
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self { units: 0, scale: 0 }
    }

    /// Amount in minor units, rounded half away from zero and clamped to
    /// the `i64` range.
    pub fn minor(&self) -> i64 {
        let minor = if self.scale <= MINOR_DIGITS {
            self.units
                .saturating_mul(pow10(MINOR_DIGITS - self.scale).unwrap_or(i128::MAX))
        } else {
            let divisor = pow10(self.scale - MINOR_DIGITS).unwrap_or(i128::MAX);
            let quotient = self.units / divisor;
            let remainder = (self.units % divisor).unsigned_abs();
            if remainder >= divisor.unsigned_abs() - remainder {
                quotient + self.units.signum()
            } else {
                quotient
            }
        };
        i64::try_from(minor).unwrap_or(if minor < 0 { i64::MIN } else { i64::MAX })
    }

    /// Amount in major units as the nearest `f64`.
    pub fn to_major(&self) -> f64 {
        self.to_string().parse().unwrap_or(0.0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Money) -> Money {
        let scale = self.scale.max(other.scale);
        match (self.rescaled(scale), other.rescaled(scale)) {
            (Some(a), Some(b)) => Money::normalized(a.saturating_add(b), scale),
            // One side is too large to rescale; its sign decides the result
            _ if self.to_major() + other.to_major() < 0.0 => Money::MIN,
            _ => Money::MAX,
        }
    }

    /// Saturating multiplication by a quantity.
    pub fn saturating_mul(self, factor: i64) -> Money {
        Money::normalized(self.units.saturating_mul(i128::from(factor)), self.scale)
    }

    /// Format with symbol and thousands separators (e.g., "₦1,500.00").
    pub fn display(&self, currency: Currency) -> String {
        format!("{}{}", currency.symbol(), self.display_amount())
    }

    /// Format to two decimals without symbol (e.g., "1,500.00").
    pub fn display_amount(&self) -> String {
        let minor = self.minor();
        let abs = minor.unsigned_abs();
        let per = 10u64.pow(MINOR_DIGITS);
        let whole = (abs / per).to_string();
        let frac = abs % per;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if minor < 0 { "-" } else { "" };
        format!("{sign}{grouped}.{frac:02}")
    }

    fn normalized(mut units: i128, mut scale: u32) -> Self {
        while scale > 0 && units % 10 == 0 {
            units /= 10;
            scale -= 1;
        }
        Self { units, scale }
    }

    fn rescaled(&self, scale: u32) -> Option<i128> {
        self.units.checked_mul(pow10(scale - self.scale)?)
    }

    /// Parse a plain decimal such as `-12.50`. No exponent, no grouping.
    fn parse_decimal(text: &str) -> Option<Self> {
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        let frac = &frac[..frac.len().min(MAX_SCALE as usize)];

        let mut units: i128 = 0;
        for byte in whole.bytes().chain(frac.bytes()) {
            if !byte.is_ascii_digit() {
                return None;
            }
            units = units.checked_mul(10)?.checked_add(i128::from(byte - b'0'))?;
        }

        let units = if negative { -units } else { units };
        Some(Self::normalized(units, frac.len() as u32))
    }
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        match (self.rescaled(scale), other.rescaled(scale)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.to_major().total_cmp(&other.to_major()),
        }
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.saturating_mul(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// Exact plain decimal in major units (e.g., "33.333", "-2.5", "500").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.units.unsigned_abs().to_string();
        let sign = if self.units < 0 { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let digits = format!("{digits:0>width$}", width = scale + 1);
        let (whole, frac) = digits.split_at(digits.len() - scale);
        write!(f, "{sign}{whole}.{frac}")
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match i64::try_from(self.units) {
            Ok(whole) if self.scale == 0 => serializer.serialize_i64(whole),
            _ => serializer.serialize_f64(self.to_major()),
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a price in major units, as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::from_major_units(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money {
            units: i128::from(v),
            scale: 0,
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_major(v).ok_or_else(|| E::custom("price must be a finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        let parsed: f64 = v
            .trim()
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))?;
        self.visit_f64(parsed)
    }
}
