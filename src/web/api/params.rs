use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::celestrak::{Query, QueryKind};
use crate::predict::{EarthFixedMethod, Frame, TimeMode, TimeSeries};
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::config::DefaultsConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeSelector {
    #[default]
    Now,
    Offset,
    At,
}

/// Query string shared by the viewer endpoints; every field is optional.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewParams {
    /// GROUP, CATNR, INTDES, NAME or SPECIAL
    pub query: Option<String>,
    pub value: Option<String>,
    pub satellite: Option<String>,
    pub time: Option<TimeSelector>,
    /// Minutes relative to now when `time=offset`
    pub offset_minutes: Option<i64>,
    /// UTC instant when `time=at` (RFC 3339 or `YYYY-MM-DDTHH:MM`)
    pub at: Option<String>,
    /// Forward window in minutes, 0 for a single sample
    pub window_minutes: Option<i64>,
    pub frame: Option<Frame>,
    pub method: Option<EarthFixedMethod>,
}

impl ViewParams {
    /// Kind without value falls back to the kind's default value; neither falls back to config.
    pub fn dataset_query(&self, defaults: &DefaultsConfig) -> ApiResult<Query> {
        let kind = match self.query.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => QueryKind::parse(k)?,
            _ => {
                let value = self.value.as_deref().unwrap_or(&defaults.value);
                return Ok(Query::new(defaults.query, value)?);
            }
        };
        let value = match self.value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => kind.default_value(),
        };
        Ok(Query::new(kind, value)?)
    }

    pub fn time_mode(&self) -> ApiResult<TimeMode> {
        match self.time.unwrap_or_default() {
            TimeSelector::Now => Ok(TimeMode::Now),
            TimeSelector::Offset => Ok(TimeMode::offset(self.offset_minutes.unwrap_or(0))?),
            TimeSelector::At => {
                let raw = self
                    .at
                    .as_deref()
                    .ok_or_else(|| ApiError::Validation("'at' is required when time=at".into()))?;
                Ok(TimeMode::At {
                    instant: parse_instant(raw)?,
                })
            }
        }
    }

    pub fn series(&self, now: DateTime<Utc>) -> ApiResult<TimeSeries> {
        let start = self.time_mode()?.resolve(now);
        Ok(TimeSeries::forward_minutes(
            start,
            self.window_minutes.unwrap_or(0),
        )?)
    }

    pub fn frame(&self) -> Frame {
        self.frame.unwrap_or_default()
    }

    pub fn method(&self) -> EarthFixedMethod {
        self.method.unwrap_or_default()
    }
}

pub fn parse_instant(raw: &str) -> ApiResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ApiError::Validation(format!("invalid UTC instant: {}", raw)))
}
