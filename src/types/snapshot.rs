use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Everything one successful refresh learned about a region.
///
/// A snapshot is only ever replaced as a whole, so the observation and forecast
/// fields always come from the same refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySnapshot {
    /// The current AQHI reading, if the observation document had one.
    pub current: Option<f64>,
    /// When the current reading was taken, if the observation document said.
    pub current_timestamp: Option<DateTime<Utc>>,
    /// Daily forecasts keyed by period name in the configured language (e.g., "Tonight").
    pub daily_forecasts: HashMap<String, i32>,
    /// Hourly forecasts keyed by the hour they apply to, in chronological order.
    pub hourly_forecasts: BTreeMap<DateTime<Utc>, i32>,
}
