//! Currency codes and symbols

use super::error::{FormatError, FormatResult};
use super::locale::LocaleData;

/// Validate an ISO 4217 code and return it upper-cased
///
/// Any three ASCII letters are accepted; whether the code is actually
/// assigned is not checked.
pub fn normalize_code(code: &str) -> FormatResult<String> {
    let trimmed = code.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(FormatError::InvalidCurrency(code.to_string()))
    }
}

/// Symbol shown for `code` in `locale`; unknown codes display as the code
pub fn display_symbol(locale: &LocaleData, code: &str) -> FormatResult<String> {
    let code = normalize_code(code)?;
    Ok(locale
        .symbol_for(&code)
        .map(str::to_string)
        .unwrap_or(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::locale::{EN_GB, EN_US, FR_FR};

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("usd").unwrap(), "USD");
        assert_eq!(normalize_code(" eur ").unwrap(), "EUR");
        assert!(normalize_code("US").is_err());
        assert!(normalize_code("US1").is_err());
        assert!(normalize_code("DOLLAR").is_err());
    }

    #[test]
    fn test_symbols_depend_on_locale() {
        assert_eq!(display_symbol(&EN_US, "USD").unwrap(), "$");
        assert_eq!(display_symbol(&EN_GB, "USD").unwrap(), "US$");
        assert_eq!(display_symbol(&FR_FR, "USD").unwrap(), "$US");
    }

    #[test]
    fn test_unknown_code_displays_itself() {
        assert_eq!(display_symbol(&EN_US, "chf").unwrap(), "CHF");
        assert_eq!(display_symbol(&EN_US, "XYZ").unwrap(), "XYZ");
    }
}
