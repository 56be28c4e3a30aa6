//! Locale number conventions
//!
//! Hand-maintained subset of CLDR data: decimal/group symbols, compact-short
//! units and currency symbol placement for the locales the dashboard ships.

use super::error::{FormatError, FormatResult};

/// No-break space
pub const NBSP: &str = "\u{a0}";

/// Narrow no-break space (French digit grouping)
pub const NNBSP: &str = "\u{202f}";

/// Where the currency symbol sits relative to the digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1,000`
    Prefix,
    /// `1.000 €` (always separated by a no-break space)
    Suffix,
}

/// One compact-notation magnitude (e.g. thousands as `K`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactUnit {
    /// Power of ten this unit divides by
    pub exponent: i32,
    pub suffix: &'static str,
}

impl CompactUnit {
    pub fn divisor(&self) -> f64 {
        10f64.powi(self.exponent)
    }
}

/// Number formatting conventions for one locale
#[derive(Debug, PartialEq)]
pub struct LocaleData {
    /// Canonical BCP-47 tag
    pub tag: &'static str,
    pub decimal: char,
    pub group: &'static str,
    /// Ascending by exponent
    pub compact_units: &'static [CompactUnit],
    /// Between the digits and a compact suffix
    pub compact_separator: &'static str,
    pub symbol_position: SymbolPosition,
    /// Currency code to display symbol; codes not listed display as themselves
    pub symbols: &'static [(&'static str, &'static str)],
}

impl LocaleData {
    /// Primary language subtag (`en` for `en-US`)
    pub fn language(&self) -> &'static str {
        self.tag.split('-').next().unwrap_or(self.tag)
    }

    /// Largest compact unit whose magnitude does not exceed `abs`
    pub fn compact_unit_for(&self, abs: f64) -> Option<&'static CompactUnit> {
        self.compact_units
            .iter()
            .rev()
            .find(|unit| abs >= unit.divisor())
    }

    /// Display symbol for an upper-case ISO 4217 code
    pub fn symbol_for(&self, code: &str) -> Option<&'static str> {
        self.symbols
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, symbol)| *symbol)
    }
}

const EN_UNITS: &[CompactUnit] = &[
    CompactUnit { exponent: 3, suffix: "K" },
    CompactUnit { exponent: 6, suffix: "M" },
    CompactUnit { exponent: 9, suffix: "B" },
    CompactUnit { exponent: 12, suffix: "T" },
];

// German short compact form leaves thousands unabbreviated.
const DE_UNITS: &[CompactUnit] = &[
    CompactUnit { exponent: 6, suffix: "Mio." },
    CompactUnit { exponent: 9, suffix: "Mrd." },
    CompactUnit { exponent: 12, suffix: "Bio." },
];

const FR_UNITS: &[CompactUnit] = &[
    CompactUnit { exponent: 3, suffix: "k" },
    CompactUnit { exponent: 6, suffix: "M" },
    CompactUnit { exponent: 9, suffix: "Md" },
    CompactUnit { exponent: 12, suffix: "Bn" },
];

pub static EN_US: LocaleData = LocaleData {
    tag: "en-US",
    decimal: '.',
    group: ",",
    compact_units: EN_UNITS,
    compact_separator: "",
    symbol_position: SymbolPosition::Prefix,
    symbols: &[
        ("USD", "$"),
        ("EUR", "€"),
        ("GBP", "£"),
        ("JPY", "¥"),
        ("CAD", "CA$"),
        ("AUD", "A$"),
        ("NZD", "NZ$"),
        ("HKD", "HK$"),
        ("MXN", "MX$"),
        ("BRL", "R$"),
        ("CNY", "CN¥"),
        ("INR", "₹"),
        ("KRW", "₩"),
        ("ILS", "₪"),
    ],
};

pub static EN_GB: LocaleData = LocaleData {
    tag: "en-GB",
    decimal: '.',
    group: ",",
    compact_units: EN_UNITS,
    compact_separator: "",
    symbol_position: SymbolPosition::Prefix,
    symbols: &[
        ("USD", "US$"),
        ("EUR", "€"),
        ("GBP", "£"),
        ("JPY", "JP¥"),
        ("CAD", "CA$"),
        ("AUD", "A$"),
        ("NZD", "NZ$"),
        ("HKD", "HK$"),
        ("MXN", "MX$"),
        ("BRL", "R$"),
        ("CNY", "CN¥"),
        ("INR", "₹"),
        ("KRW", "₩"),
        ("ILS", "₪"),
    ],
};

pub static DE_DE: LocaleData = LocaleData {
    tag: "de-DE",
    decimal: ',',
    group: ".",
    compact_units: DE_UNITS,
    compact_separator: NBSP,
    symbol_position: SymbolPosition::Suffix,
    symbols: &[
        ("USD", "$"),
        ("EUR", "€"),
        ("GBP", "£"),
        ("JPY", "¥"),
        ("CAD", "CA$"),
        ("AUD", "AU$"),
        ("CNY", "CN¥"),
        ("INR", "₹"),
    ],
};

pub static FR_FR: LocaleData = LocaleData {
    tag: "fr-FR",
    decimal: ',',
    group: NNBSP,
    compact_units: FR_UNITS,
    compact_separator: NBSP,
    symbol_position: SymbolPosition::Suffix,
    symbols: &[
        ("USD", "$US"),
        ("EUR", "€"),
        ("GBP", "£GB"),
        ("CAD", "$CA"),
        ("AUD", "$AU"),
        ("INR", "₹"),
    ],
};

/// Every locale with its own data, language defaults first
pub static SUPPORTED_LOCALES: &[&LocaleData] = &[&EN_US, &DE_DE, &FR_FR, &EN_GB];

/// Resolve a BCP-47 tag to locale data
///
/// Exact (case-insensitive) matches win, then the first locale sharing the
/// tag's language, then `en-US`. Only a malformed tag is an error.
pub fn resolve(tag: &str) -> FormatResult<&'static LocaleData> {
    let normalized = tag.trim().replace('_', "-");
    if !is_well_formed(&normalized) {
        return Err(FormatError::InvalidLocale(tag.to_string()));
    }

    if let Some(data) = SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| l.tag.eq_ignore_ascii_case(&normalized))
    {
        return Ok(data);
    }

    let language = normalized.split('-').next().unwrap_or_default();
    if let Some(data) = SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| l.language().eq_ignore_ascii_case(language))
    {
        tracing::debug!(requested = %tag, resolved = data.tag, "Locale resolved by language");
        return Ok(data);
    }

    tracing::debug!(requested = %tag, "Unsupported locale, falling back to en-US");
    Ok(&EN_US)
}

/// Loose BCP-47 syntax check: a 2-3 or 5-8 letter language followed by
/// 1-8 character alphanumeric subtags
fn is_well_formed(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let language = match subtags.next() {
        Some(l) => l,
        None => return false,
    };
    let language_ok = matches!(language.len(), 2..=3 | 5..=8)
        && language.chars().all(|c| c.is_ascii_alphabetic());

    language_ok
        && subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()))
}
