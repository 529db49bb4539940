use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::predict::error::PredictError;

/// Offsets and windows are limited to two days either side of now.
pub const MAX_MINUTES: i64 = 2 * 24 * 60;
pub const DEFAULT_STEP: Duration = Duration::minutes(1);
pub const MIN_STEP: Duration = Duration::seconds(1);

/// How the start instant of an evaluation is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimeMode {
    Now,
    Offset { minutes: i64 },
    At { instant: DateTime<Utc> },
}

impl TimeMode {
    pub fn offset(minutes: i64) -> Result<Self, PredictError> {
        if !(-MAX_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(PredictError::Window(format!(
                "offset {} min outside ±{} min",
                minutes, MAX_MINUTES
            )));
        }
        Ok(TimeMode::Offset { minutes })
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimeMode::Now => now,
            TimeMode::Offset { minutes } => now + Duration::minutes(*minutes),
            TimeMode::At { instant } => *instant,
        }
    }
}

/// Evenly spaced instants from `start` covering a forward window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSeries {
    start: DateTime<Utc>,
    window: Duration,
    step: Duration,
}

impl TimeSeries {
    pub fn new(start: DateTime<Utc>, window: Duration, step: Duration) -> Result<Self, PredictError> {
        if window < Duration::zero() {
            return Err(PredictError::Window("window must not be negative".into()));
        }
        if window > Duration::minutes(MAX_MINUTES) {
            return Err(PredictError::Window(format!(
                "window longer than {} min",
                MAX_MINUTES
            )));
        }
        if step < MIN_STEP {
            return Err(PredictError::Window(format!(
                "step shorter than {} s",
                MIN_STEP.num_seconds()
            )));
        }
        Ok(Self {
            start,
            window,
            step,
        })
    }

    pub fn forward_minutes(start: DateTime<Utc>, window_minutes: i64) -> Result<Self, PredictError> {
        if !(0..=MAX_MINUTES).contains(&window_minutes) {
            return Err(PredictError::Window(format!(
                "window {} min outside 0..={} min",
                window_minutes, MAX_MINUTES
            )));
        }
        Self::new(start, Duration::minutes(window_minutes), DEFAULT_STEP)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Always contains `start`; the last instant never exceeds `start + window`.
    pub fn instants(&self) -> Vec<DateTime<Utc>> {
        let end = self.start + self.window;
        let mut cursor = self.start;
        let mut points = Vec::new();

        while cursor <= end {
            points.push(cursor);
            cursor += self.step;
        }

        points
    }
}
