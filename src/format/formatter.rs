//! Numeric value formatter
//!
//! Two display styles, mirroring what the dashboard cards need:
//!
//! - `compact`: short-scale abbreviation with at most one fractional digit (`1.2K`)
//! - `currency`: whole currency units with grouping and a locale-placed symbol (`$1,000`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::currency;
use super::error::{FormatError, FormatResult};
use super::locale::{self, CompactUnit, LocaleData, SymbolPosition, NBSP};

/// Display style for a value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueStyle {
    #[default]
    Compact,
    Currency,
}

impl fmt::Display for ValueStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueStyle::Compact => write!(f, "compact"),
            ValueStyle::Currency => write!(f, "currency"),
        }
    }
}

impl FromStr for ValueStyle {
    type Err = FormatError;

    fn from_str(s: &str) -> FormatResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(ValueStyle::Compact),
            "currency" => Ok(ValueStyle::Currency),
            _ => Err(FormatError::UnknownStyle(s.to_string())),
        }
    }
}

/// Options for [`format_value`]
///
/// Every field defaults independently: compact style, `en-US`, `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    #[serde(default)]
    pub style: ValueStyle,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_currency")]
    pub currency_code: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            style: ValueStyle::default(),
            locale: default_locale(),
            currency_code: default_currency(),
        }
    }
}

impl FormatOptions {
    /// Compact style with default locale and currency
    pub fn compact() -> Self {
        Self::default()
    }

    /// Currency style with default locale and currency
    pub fn currency() -> Self {
        Self::default().style(ValueStyle::Currency)
    }

    /// Builder method: set style
    pub fn style(mut self, style: ValueStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder method: set locale tag
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Builder method: set ISO 4217 currency code
    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }
}

/// Formatter with its locale and currency already resolved
///
/// Resolution is the only fallible step; formatting itself cannot fail.
#[derive(Debug, Clone)]
pub struct ValueFormatter {
    style: ValueStyle,
    locale: &'static LocaleData,
    symbol: String,
}

impl ValueFormatter {
    /// Resolve `options` into a formatter
    ///
    /// The currency code is only checked for the currency style.
    pub fn new(options: &FormatOptions) -> FormatResult<Self> {
        let locale = locale::resolve(&options.locale)?;
        let symbol = match options.style {
            ValueStyle::Currency => currency::display_symbol(locale, &options.currency_code)?,
            ValueStyle::Compact => String::new(),
        };

        Ok(Self {
            style: options.style,
            locale,
            symbol,
        })
    }

    pub fn style(&self) -> ValueStyle {
        self.style
    }

    /// Tag of the locale actually used after fallback
    pub fn locale_tag(&self) -> &'static str {
        self.locale.tag
    }

    /// Render `value`
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return non_finite(value);
        }

        match self.style {
            ValueStyle::Compact => self.format_compact(value),
            ValueStyle::Currency => self.format_currency(value),
        }
    }

    fn format_compact(&self, value: f64) -> String {
        let abs = value.abs();
        let (scaled, unit) = self.compact_scale(abs);

        let mut out = String::new();
        if value < 0.0 && scaled != 0.0 {
            out.push('-');
        }
        out.push_str(&render_digits(scaled, 1, self.locale, 2));
        if let Some(unit) = unit {
            out.push_str(self.locale.compact_separator);
            out.push_str(unit.suffix);
        }
        out
    }

    /// Pick the compact unit for `abs`, moving up one unit when rounding
    /// carries the value into the next magnitude (999.95 -> 1K).
    fn compact_scale(&self, abs: f64) -> (f64, Option<&'static CompactUnit>) {
        let mut unit = self.locale.compact_unit_for(abs);
        loop {
            let divisor = unit.map_or(1.0, CompactUnit::divisor);
            let scaled = round_to(abs / divisor, 1);
            let next = self.locale.compact_unit_for(scaled * divisor);

            let moves_up = match (unit, next) {
                (None, Some(_)) => true,
                (Some(current), Some(next)) => next.exponent > current.exponent,
                _ => false,
            };
            if !moves_up {
                return (scaled, unit);
            }
            unit = next;
        }
    }

    fn format_currency(&self, value: f64) -> String {
        let rounded = value.abs().round();
        let digits = render_digits(rounded, 0, self.locale, 1);
        let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };

        match self.locale.symbol_position {
            SymbolPosition::Prefix => {
                // Letter-edged symbols (CHF, XYZ) need a gap before the digits.
                let gap = if self.symbol.chars().last().is_some_and(char::is_alphabetic) {
                    NBSP
                } else {
                    ""
                };
                format!("{sign}{}{gap}{digits}", self.symbol)
            }
            SymbolPosition::Suffix => format!("{sign}{digits}{NBSP}{}", self.symbol),
        }
    }
}

/// Format `value` according to `options`
///
/// Fails only when the locale tag or (for currency style) the currency code
/// is malformed.
///
/// A negative value that rounds to zero is printed without a sign: `-0.2` as
/// currency is `$0` and `-0.01` compact is `0`. This differs from
/// `Intl.NumberFormat`, which keeps the sign (`-$0`, `-0`).
pub fn format_value(value: f64, options: &FormatOptions) -> FormatResult<String> {
    Ok(ValueFormatter::new(options)?.format(value))
}

fn round_to(value: f64, fraction_digits: i32) -> f64 {
    let factor = 10f64.powi(fraction_digits);
    (value * factor).round() / factor
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

/// Render a non-negative, already-rounded number with at most
/// `max_fraction` digits (trailing zeros dropped). Integer digits are grouped
/// once there are at least `3 + min_grouping` of them.
fn render_digits(abs: f64, max_fraction: usize, locale: &LocaleData, min_grouping: usize) -> String {
    let fixed = format!("{:.*}", max_fraction, abs);
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = group_integer(integer, locale.group, min_grouping);
    if !fraction.is_empty() {
        out.push(locale.decimal);
        out.push_str(fraction);
    }
    out
}

fn group_integer(digits: &str, separator: &str, min_grouping: usize) -> String {
    if digits.len() < 3 + min_grouping {
        return digits.to_string();
    }

    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - head) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::locale::NNBSP;

    fn fmt(value: f64, options: &FormatOptions) -> String {
        format_value(value, options).unwrap()
    }

    #[test]
    fn test_compact_default() {
        assert_eq!(fmt(1234.0, &FormatOptions::default()), "1.2K");
        assert_eq!(
            fmt(1234.0, &FormatOptions::compact().locale("en-US")),
            "1.2K"
        );
    }

    #[test]
    fn test_compact_magnitudes() {
        let options = FormatOptions::default();
        assert_eq!(fmt(0.0, &options), "0");
        assert_eq!(fmt(7.0, &options), "7");
        assert_eq!(fmt(12.345, &options), "12.3");
        assert_eq!(fmt(999.0, &options), "999");
        assert_eq!(fmt(1000.0, &options), "1K");
        assert_eq!(fmt(15_500.0, &options), "15.5K");
        assert_eq!(fmt(1_500_000.0, &options), "1.5M");
        assert_eq!(fmt(2_000_000_000.0, &options), "2B");
        assert_eq!(fmt(3.25e12, &options), "3.3T");
    }

    #[test]
    fn test_compact_rounding_carries_to_next_unit() {
        let options = FormatOptions::default();
        assert_eq!(fmt(999.96, &options), "1K");
        assert_eq!(fmt(999_950.0, &options), "1M");
        assert_eq!(fmt(999_940.0, &options), "999.9K");
    }

    #[test]
    fn test_compact_negative_and_tiny() {
        let options = FormatOptions::default();
        assert_eq!(fmt(-1234.0, &options), "-1.2K");
        assert_eq!(fmt(-0.01, &options), "0");
        assert_eq!(fmt(0.04, &options), "0");
    }

    #[test]
    fn test_negative_rounding_to_zero_is_unsigned() {
        let compact = FormatOptions::compact();
        let currency = FormatOptions::currency();
        let euro = FormatOptions::currency().locale("de-DE").currency_code("EUR");

        assert_eq!(format_value(-0.01, &compact).unwrap(), "0");
        assert_eq!(format_value(-0.04, &compact).unwrap(), "0");
        assert_eq!(format_value(-0.06, &compact).unwrap(), "-0.1");
        assert_eq!(format_value(-0.2, &currency).unwrap(), "$0");
        assert_eq!(format_value(-0.5, &currency).unwrap(), "-$1");
        assert_eq!(format_value(-0.4, &euro).unwrap(), format!("0{NBSP}€"));
    }

    #[test]
    fn test_compact_beyond_largest_unit_groups_digits() {
        assert_eq!(fmt(12_345e12, &FormatOptions::default()), "12,345T");
    }

    #[test]
    fn test_compact_other_locales() {
        let de = FormatOptions::compact().locale("de-DE");
        assert_eq!(fmt(1234.0, &de), "1234");
        assert_eq!(fmt(12_345.0, &de), "12.345");
        assert_eq!(fmt(1_234_567.0, &de), format!("1,2{NBSP}Mio."));

        let fr = FormatOptions::compact().locale("fr-FR");
        assert_eq!(fmt(1234.0, &fr), format!("1,2{NBSP}k"));
        assert_eq!(fmt(2.5e9, &fr), format!("2,5{NBSP}Md"));
    }

    #[test]
    fn test_currency_usd() {
        let options = FormatOptions::currency()
            .currency_code("USD")
            .locale("en-US");
        assert_eq!(fmt(1000.0, &options), "$1,000");
        assert_eq!(fmt(999.5, &options), "$1,000");
        assert_eq!(fmt(1_234_567.89, &options), "$1,234,568");
        assert_eq!(fmt(-42.0, &options), "-$42");
        assert_eq!(fmt(-0.2, &options), "$0");
    }

    #[test]
    fn test_currency_gbp_en_gb() {
        let options = FormatOptions::currency()
            .currency_code("GBP")
            .locale("en-GB");
        assert_eq!(fmt(2500.0, &options), "£2,500");
    }

    #[test]
    fn test_currency_eur_default_locale() {
        let options = FormatOptions::currency().currency_code("EUR");
        assert_eq!(fmt(1000.0, &options), "€1,000");
    }

    #[test]
    fn test_currency_suffix_locales() {
        let de = FormatOptions::currency().locale("de-DE").currency_code("EUR");
        assert_eq!(fmt(1000.0, &de), format!("1.000{NBSP}€"));
        assert_eq!(fmt(-1000.0, &de), format!("-1.000{NBSP}€"));

        let fr = FormatOptions::currency().locale("fr-FR").currency_code("EUR");
        assert_eq!(fmt(1000.0, &fr), format!("1{NNBSP}000{NBSP}€"));
    }

    #[test]
    fn test_currency_letter_symbol_gets_space() {
        let options = FormatOptions::currency().currency_code("CHF");
        assert_eq!(fmt(1000.0, &options), format!("CHF{NBSP}1,000"));

        let cad = FormatOptions::currency().currency_code("CAD");
        assert_eq!(fmt(1000.0, &cad), "CA$1,000");
    }

    #[test]
    fn test_defaults_apply_independently() {
        // Only the style is overridden; locale and currency keep their defaults.
        let options = FormatOptions::default().style(ValueStyle::Currency);
        assert_eq!(fmt(1200.0, &options), "$1,200");
    }

    #[test]
    fn test_non_finite() {
        let options = FormatOptions::default();
        assert_eq!(fmt(f64::NAN, &options), "NaN");
        assert_eq!(fmt(f64::INFINITY, &options), "∞");
        assert_eq!(fmt(f64::NEG_INFINITY, &options), "-∞");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            format_value(1.0, &FormatOptions::default().locale("not a locale")),
            Err(FormatError::InvalidLocale("not a locale".to_string()))
        );
        assert_eq!(
            format_value(1.0, &FormatOptions::currency().currency_code("DOLLARS")),
            Err(FormatError::InvalidCurrency("DOLLARS".to_string()))
        );
        // Currency code is irrelevant to the compact style.
        assert!(format_value(1.0, &FormatOptions::compact().currency_code("??")).is_ok());
    }

    #[test]
    fn test_deterministic() {
        let formatter = ValueFormatter::new(&FormatOptions::currency()).unwrap();
        assert_eq!(formatter.format(123_456.0), formatter.format(123_456.0));
        assert_eq!(formatter.locale_tag(), "en-US");
        assert_eq!(formatter.style(), ValueStyle::Currency);
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("Currency".parse::<ValueStyle>().unwrap(), ValueStyle::Currency);
        assert_eq!("compact".parse::<ValueStyle>().unwrap(), ValueStyle::Compact);
        assert!("percent".parse::<ValueStyle>().is_err());
    }

    #[test]
    fn test_group_integer() {
        assert_eq!(group_integer("1", ",", 1), "1");
        assert_eq!(group_integer("1234", ",", 1), "1,234");
        assert_eq!(group_integer("1234", ",", 2), "1234");
        assert_eq!(group_integer("12345", ",", 2), "12,345");
        assert_eq!(group_integer("123456", ",", 1), "123,456");
        assert_eq!(group_integer("1234567", ".", 1), "1.234.567");
    }
}
