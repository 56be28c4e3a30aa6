//! Synthetic series generation
//!
//! Each day's value is `constant + u * variable`, with `u` drawn from a PRNG
//! seeded by SHA-256 of the metric path and the date. The same (metric, day)
//! always yields the same value, whatever range it is requested in.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::metrics::{MetricKey, MetricPoint};
use crate::range::types::DATE_FORMAT;
use crate::range::DateRange;
use chrono::NaiveDate;

/// Shape of a synthetic metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesShape {
    pub constant: f64,
    pub variable: f64,
}

impl SeriesShape {
    pub fn for_metric(metric: MetricKey) -> Self {
        match metric {
            MetricKey::Revenue => SeriesShape {
                constant: 20_000.0,
                variable: 5_000.0,
            },
            MetricKey::Pax => SeriesShape {
                constant: 1_000.0,
                variable: 250.0,
            },
        }
    }
}

fn seed(metric: MetricKey, day: NaiveDate) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(metric.path().as_bytes());
    hasher.update(day.format(DATE_FORMAT).to_string().as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Value of `metric` on `day`
pub fn point(metric: MetricKey, day: NaiveDate) -> MetricPoint {
    let shape = SeriesShape::for_metric(metric);
    let mut rng = StdRng::seed_from_u64(seed(metric, day));
    let u: f64 = rng.gen();
    MetricPoint::new(day, shape.constant + u * shape.variable)
}

/// One point per day of `range`, ascending
pub fn series(metric: MetricKey, range: DateRange) -> Vec<MetricPoint> {
    range.days().map(|day| point(metric, day)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_values_within_shape() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
        for metric in MetricKey::ALL {
            let shape = SeriesShape::for_metric(metric);
            for p in series(metric, range) {
                assert!(p.value >= shape.constant, "{metric} {p:?}");
                assert!(p.value < shape.constant + shape.variable, "{metric} {p:?}");
            }
        }
    }

    #[test]
    fn test_one_point_per_day_ascending() {
        let range = DateRange::new(date(2024, 2, 27), date(2024, 3, 2)).unwrap();
        let points = series(MetricKey::Pax, range);
        let days: Vec<_> = points.iter().map(|p| p.timestamp).collect();
        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
                date(2024, 3, 2),
            ]
        );
    }

    #[test]
    fn test_deterministic_across_ranges() {
        let day = date(2024, 6, 15);
        let wide = DateRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        let single = DateRange::new(day, day).unwrap();

        let from_wide = series(MetricKey::Revenue, wide)
            .into_iter()
            .find(|p| p.timestamp == day)
            .unwrap();
        assert_eq!(series(MetricKey::Revenue, single), vec![from_wide]);
    }

    #[test]
    fn test_metrics_seeded_independently() {
        let day = date(2024, 6, 15);
        let revenue_u = (point(MetricKey::Revenue, day).value - 20_000.0) / 5_000.0;
        let pax_u = (point(MetricKey::Pax, day).value - 1_000.0) / 250.0;
        assert_ne!(revenue_u, pax_u);
    }
}
