//! Series Routes
//!
//! - GET /api/:metric?from=YYYY-MM-DD&to=YYYY-MM-DD - Daily points for a metric

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::dto::SeriesParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::generator;
use crate::api::state::AppState;
use crate::metrics::{MetricKey, MetricPoint};
use crate::range::types::DATE_FORMAT;
use crate::range::{DateRange, RangeError};

/// GET /api/:metric
///
/// Returns one point per day of `[from, to]`, inclusive and ascending.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(metric): Path<String>,
    Query(params): Query<SeriesParams>,
) -> ApiResult<Json<Vec<MetricPoint>>> {
    let key =
        MetricKey::from_path(&metric).ok_or_else(|| ApiError::UnknownMetric(metric.clone()))?;

    let from = parse_param("from", params.from.as_deref())?;
    let to = parse_param("to", params.to.as_deref())?;

    let range = DateRange::new(from, to)?;
    if range.span_days() > state.max_points() {
        return Err(RangeError::TooLong {
            max_days: state.max_points(),
        }
        .into());
    }

    let points = generator::series(key, range);
    tracing::debug!(metric = %key, range = %range, points = points.len(), "Serving series");
    Ok(Json(points))
}

fn parse_param(name: &str, value: Option<&str>) -> ApiResult<NaiveDate> {
    let value = value.ok_or_else(|| ApiError::Validation(format!("missing `{}` date", name)))?;
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ApiError::Validation(format!("invalid `{}` date: {}", name, value)))
}
