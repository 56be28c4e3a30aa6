//! Small display labels used next to formatted totals

use chrono::NaiveDate;

/// Percent-change chip text: `"0%"` for no change, otherwise a signed value
/// with one decimal (`"+5.2%"`, `"-3.0%"`)
pub fn percent_diff_label(percent_diff: f64) -> String {
    if percent_diff == 0.0 {
        "0%".to_string()
    } else if percent_diff > 0.0 {
        format!("+{:.1}%", percent_diff)
    } else {
        format!("{:.1}%", percent_diff)
    }
}

/// Axis label for a day (`"Jun 19"`)
pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_diff_label() {
        assert_eq!(percent_diff_label(0.0), "0%");
        assert_eq!(percent_diff_label(100.0), "+100.0%");
        assert_eq!(percent_diff_label(5.24), "+5.2%");
        assert_eq!(percent_diff_label(-3.0), "-3.0%");
    }

    #[test]
    fn test_day_label() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 19).unwrap();
        assert_eq!(day_label(date), "Jun 19");
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(day_label(date), "Jan 03");
    }
}
