//! Trend-based demand forecasting.
//!
//! Model:
//! - Fit an OLS trend over the historical values in index order.
//! - Project `mean + slope * (n + i)` for each future day, floored at zero.
//! - Surround each point with a fixed `±1.96σ` band that does not widen with
//!   the horizon.
//! - Derive the stock action from realized historical growth, not from the
//!   projection.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::macros::format_description;
use time::{Date, Duration};

use crate::config::{
    CONFIDENCE_Z, GROWTH_ACTION_THRESHOLD, GROWTH_EPSILON, MAX_FORECAST_DAYS, REORDER_COVER_DAYS,
    TARGET_COVER_DAYS, TREND_THRESHOLD,
};
use crate::error::ForecastError;
use crate::trend;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: Date,
    pub value: f64,
}

/// Observations with strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    observations: Vec<Observation>,
}

impl HistoricalSeries {
    pub fn new(observations: Vec<Observation>) -> Result<Self, ForecastError> {
        for (index, pair) in observations.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(ForecastError::NonIncreasingDates { index: index + 1 });
            }
        }
        Ok(Self { observations })
    }

    /// Caller guarantees strictly increasing dates.
    pub(crate) fn from_ordered(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Consecutive daily observations starting at `start`.
    ///
    /// Fails with `NonIncreasingDates` when the run would pass the last
    /// representable date.
    pub fn daily(start: Date, values: impl IntoIterator<Item = f64>) -> Result<Self, ForecastError> {
        let observations = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Observation { date: start.saturating_add(Duration::days(i as i64)), value })
            .collect();
        Self::new(observations)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last_date(&self) -> Option<Date> {
        self.observations.last().map(|o| o.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockAction {
    Increase,
    Decrease,
    Maintain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub date: String,
    pub predicted_demand: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetrics {
    pub historical_avg: f64,
    pub forecast_avg: f64,
    /// Percent change from the first to the last observation.
    pub growth_rate: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: StockAction,
    pub target_stock: f64,
    pub reorder_point: f64,
    pub rationale: String,
}

/// Immutable result of one forecast call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub item_id: String,
    /// Date of the last observation the forecast is anchored on.
    pub as_of: String,
    pub predictions: Vec<Prediction>,
    pub metrics: ForecastMetrics,
    pub recommendation: Recommendation,
}

/// Stateless demand forecaster; every call is independent.
#[derive(Debug, Clone, Copy)]
pub struct Forecaster {
    trend_threshold: f64,
    z: f64,
    growth_threshold: f64,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self {
            trend_threshold: TREND_THRESHOLD,
            z: CONFIDENCE_Z,
            growth_threshold: GROWTH_ACTION_THRESHOLD,
        }
    }
}

impl Forecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trend_threshold(mut self, threshold: f64) -> Self {
        self.trend_threshold = threshold;
        self
    }

    pub fn with_confidence_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    pub fn with_growth_threshold(mut self, threshold: f64) -> Self {
        self.growth_threshold = threshold;
        self
    }

    pub fn forecast(
        &self,
        item_id: &str,
        history: &HistoricalSeries,
        periods: usize,
    ) -> Result<Forecast, ForecastError> {
        if periods == 0 || periods > MAX_FORECAST_DAYS {
            return Err(ForecastError::InvalidHorizon);
        }
        let values = history.values();
        let line = trend::fit(&values)?;
        let last_date = history.last_date().ok_or(ForecastError::EmptyHistory)?;

        let n = values.len();
        let avg = mean(&values);
        let std = stddev_population(&values, avg);
        let trend = self.classify(line.slope);

        let predictions: Vec<Prediction> = (0..periods)
            .map(|i| {
                let point = (avg + line.slope * (n + i) as f64).max(0.0);
                let date = last_date.saturating_add(Duration::days(i as i64 + 1));
                Prediction {
                    date: format_date(date),
                    predicted_demand: round2(point),
                    lower_bound: round2((point - self.z * std).max(0.0)),
                    upper_bound: round2(point + self.z * std),
                }
            })
            .collect();

        let growth_rate = growth_rate(&values);
        let action = if growth_rate > self.growth_threshold {
            StockAction::Increase
        } else if growth_rate < -self.growth_threshold {
            StockAction::Decrease
        } else {
            StockAction::Maintain
        };

        let forecast_avg = mean(&predictions.iter().map(|p| p.predicted_demand).collect::<Vec<_>>());
        tracing::debug!(item_id, n, periods, slope = line.slope, %trend, "forecast");

        Ok(Forecast {
            item_id: item_id.to_string(),
            as_of: format_date(last_date),
            predictions,
            metrics: ForecastMetrics {
                historical_avg: round2(avg),
                forecast_avg: round2(forecast_avg),
                growth_rate: round2(growth_rate),
                trend,
            },
            recommendation: Recommendation {
                action,
                target_stock: round2(forecast_avg * TARGET_COVER_DAYS),
                reorder_point: round2(forecast_avg * REORDER_COVER_DAYS),
                rationale: format!("Based on {trend} trend with {growth_rate:+.1}% growth"),
            },
        })
    }

    fn classify(&self, slope: f64) -> Trend {
        if slope > self.trend_threshold {
            Trend::Increasing
        } else if slope < -self.trend_threshold {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

fn growth_rate(values: &[f64]) -> f64 {
    match values {
        [first, .., last] => (last - first) / (first + GROWTH_EPSILON) * 100.0,
        _ => 0.0,
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Population standard deviation (n).
fn stddev_population(xs: &[f64], mean: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (xs.len() as f64);
    var.sqrt()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}
