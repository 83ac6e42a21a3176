//! Digit conversion, price formatting and cart arithmetic for
//! toman-denominated storefronts.
//!
//! # Examples
//!
//! ```
//! use retry_rail::format;
//!
//! assert_eq!(format::to_persian_digits("2024"), "۲۰۲۴");
//! assert_eq!(format::format_price(1_250_000, true), "۱٬۲۵۰٬۰۰۰ تومان");
//! assert_eq!(format::format_latin_price(1_250_000), "1,250,000");
//! ```

use core::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Thousands separator used with Persian digits.
pub const PERSIAN_SEPARATOR: char = '٬';

/// Currency label appended by [`format_price`].
pub const TOMAN: &str = "تومان";

/// Number of rials in one toman.
pub const RIALS_PER_TOMAN: u64 = 10;

/// Value added tax, in percent.
pub const DEFAULT_TAX_PERCENT: u32 = 9;

/// Subtotal from which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: u64 = 500_000;

/// Shipping charged below [`FREE_SHIPPING_THRESHOLD`].
pub const FLAT_SHIPPING: u64 = 50_000;

/// Replaces every ASCII digit of `value`'s display form with its Persian form.
pub fn to_persian_digits(value: impl Display) -> String {
    value
        .to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// Replaces every Persian digit of `text` with its ASCII form.
pub fn to_english_digits(text: &str) -> String {
    text.chars()
        .map(|c| match PERSIAN_DIGITS.iter().position(|p| *p == c) {
            Some(d) => char::from(b'0' + d as u8),
            None => c,
        })
        .collect()
}

/// Formats `value` with `separator` between groups of three digits.
///
/// ```
/// use retry_rail::format::group_thousands;
///
/// assert_eq!(group_thousands(-1234567, ','), "-1,234,567");
/// assert_eq!(group_thousands(999, ','), "999");
/// ```
pub fn group_thousands(value: i64, separator: char) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string(), separator);
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Persian-digit price with the Persian thousands separator and, optionally,
/// the toman label.
pub fn format_price(amount: u64, show_currency: bool) -> String {
    let grouped = to_persian_digits(group_digits(&amount.to_string(), PERSIAN_SEPARATOR));
    if show_currency {
        format!("{grouped} {TOMAN}")
    } else {
        grouped
    }
}

/// ASCII-digit price grouped with `,`, for invoices and logs.
pub fn format_latin_price(amount: u64) -> String {
    group_digits(&amount.to_string(), ',')
}

/// `از X` / `تا Y` / `X - Y` depending on which bounds are present.
pub fn format_price_range(min: Option<u64>, max: Option<u64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => {
            format!("{} - {}", format_price(min, true), format_price(max, true))
        }
        (Some(min), None) => format!("از {}", format_price(min, true)),
        (None, Some(max)) => format!("تا {}", format_price(max, true)),
        (None, None) => String::new(),
    }
}

/// Discount amount for `percent` off `original`, rounded half up.
pub fn calculate_discount(original: u64, percent: u32) -> u64 {
    percent_of(original, percent.min(100))
}

/// Price after applying `percent` off.
#[inline]
pub fn final_price(original: u64, percent: u32) -> u64 {
    original.saturating_sub(calculate_discount(original, percent))
}

#[inline]
pub fn toman_to_rial(toman: u64) -> u64 {
    toman.saturating_mul(RIALS_PER_TOMAN)
}

/// Tax on `price` at `percent`, rounded half up.
#[inline]
pub fn calculate_tax(price: u64, percent: u32) -> u64 {
    percent_of(price, percent)
}

/// Flat shipping below [`FREE_SHIPPING_THRESHOLD`], free from it on.
#[inline]
pub fn calculate_shipping(subtotal: u64) -> u64 {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        0
    } else {
        FLAT_SHIPPING
    }
}

/// Whole-percent reduction from `original` to `sale`, rounded half up.
///
/// Zero when either price is zero or the sale price is not lower.
///
/// ```
/// use retry_rail::format::calculate_discount_percent;
///
/// assert_eq!(calculate_discount_percent(300_000, 200_000), 33);
/// assert_eq!(calculate_discount_percent(100_000, 120_000), 0);
/// ```
pub fn calculate_discount_percent(original: u64, sale: u64) -> u32 {
    if original == 0 || sale == 0 || original <= sale {
        return 0;
    }
    let off = u128::from(original - sale) * 200 + u128::from(original);
    // `sale > 0` keeps the quotient at or below 100.
    u32::try_from(off / (u128::from(original) * 2)).unwrap_or(100)
}

/// One product line of a shopping cart.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartLine {
    pub unit_price: u64,
    pub quantity: u32,
}

impl CartLine {
    #[inline]
    pub fn new(unit_price: u64, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }

    /// Line total; a quantity of zero counts as one.
    #[inline]
    pub fn total(&self) -> u64 {
        let quantity = u64::from(self.quantity.max(1));
        self.unit_price.saturating_mul(quantity)
    }
}

/// Totals of a shopping cart, in tomans.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CartTotal {
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub total: u64,
}

/// Sums `lines`, adds tax at `tax_percent` and shipping per
/// [`calculate_shipping`]. An empty cart totals zero and ships for free.
///
/// ```
/// use retry_rail::format::{calculate_cart_total, CartLine};
///
/// let cart = calculate_cart_total(&[CartLine::new(120_000, 2)], 9);
/// assert_eq!(cart.subtotal, 240_000);
/// assert_eq!(cart.tax, 21_600);
/// assert_eq!(cart.shipping, 50_000);
/// assert_eq!(cart.total, 311_600);
/// ```
pub fn calculate_cart_total(lines: &[CartLine], tax_percent: u32) -> CartTotal {
    if lines.is_empty() {
        return CartTotal::default();
    }
    let subtotal = lines
        .iter()
        .fold(0u64, |sum, line| sum.saturating_add(line.total()));
    let tax = calculate_tax(subtotal, tax_percent);
    let shipping = calculate_shipping(subtotal);
    CartTotal {
        subtotal,
        tax,
        shipping,
        total: subtotal.saturating_add(tax).saturating_add(shipping),
    }
}

/// Display strings for a price, with the discount breakdown when one applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PriceLabel {
    Regular(String),
    Discounted {
        original: String,
        final_price: String,
        /// e.g. `15%`
        discount: String,
        savings: String,
    },
}

/// Labels `original` with `percent` off applied; no discount yields a plain
/// [`format_price`] label.
///
/// ```
/// use retry_rail::format::{format_discounted_price, PriceLabel};
///
/// let PriceLabel::Discounted { final_price, discount, .. } =
///     format_discounted_price(200_000, 10)
/// else {
///     unreachable!()
/// };
/// assert_eq!(final_price, "۱۸۰٬۰۰۰ تومان");
/// assert_eq!(discount, "10%");
/// ```
pub fn format_discounted_price(original: u64, percent: u32) -> PriceLabel {
    if percent == 0 {
        return PriceLabel::Regular(format_price(original, true));
    }
    PriceLabel::Discounted {
        original: format_price(original, true),
        final_price: format_price(final_price(original, percent), true),
        discount: format!("{percent}%"),
        savings: format_price(calculate_discount(original, percent), true),
    }
}

/// Truncates fractions of a toman.
#[inline]
pub fn rial_to_toman(rial: u64) -> u64 {
    rial / RIALS_PER_TOMAN
}

/// `ratio` as a percentage with `decimals` fraction digits, in Persian digits.
///
/// ```
/// use retry_rail::format::format_percent;
///
/// assert_eq!(format_percent(0.125, 1), "۱۲.۵%");
/// ```
pub fn format_percent(ratio: f64, decimals: usize) -> String {
    let digits = to_persian_digits(format!("{:.*}", decimals, ratio * 100.0));
    format!("{digits}%")
}

fn percent_of(amount: u64, percent: u32) -> u64 {
    let scaled = u128::from(amount) * u128::from(percent);
    u64::try_from((scaled + 50) / 100).unwrap_or(u64::MAX)
}

// `digits` is ASCII, so byte length equals digit count.
fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
