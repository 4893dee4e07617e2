//! Planning configuration.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CityCatalog, CityId, ConfigError, SolveOptions};

/// Default acceptable solver tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;
/// Default solver time budget.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(60);
/// Default occupancy value above which a city counts as selected.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.8;

/// How event revenue is tied to presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttendanceMode {
    /// Being in a city on a day earns that day's revenue.
    #[default]
    Presence,
    /// Attendance is a separate decision that excludes travelling the same
    /// day.
    Explicit,
}

/// Opt-in single retry after a solver timeout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeoutRetry {
    /// Multiplier applied to the time budget for the retry.
    pub budget_factor: f64,
    /// Multiplier applied to the tolerance for the retry.
    pub tolerance_factor: f64,
}

/// Options recognised by the planner.
///
/// # Examples
/// ```
/// use roadie_core::{AttendanceMode, PlanConfig};
///
/// let config = PlanConfig::new(31, "London").with_max_events_per_country(Some(4));
/// assert_eq!(config.attendance, AttendanceMode::Presence);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanConfig {
    /// Number of days in the horizon.
    pub horizon_days: u16,
    /// City the itinerary starts and ends in.
    pub home_city: String,
    /// Acceptable solver tolerance.
    pub tolerance: f64,
    /// Wall-clock budget for one solve.
    pub time_budget: Duration,
    /// Occupancy value above which a city is taken as selected.
    pub acceptance_threshold: f64,
    /// How revenue is tied to presence.
    pub attendance: AttendanceMode,
    /// Upper bound on events attended per country, if any.
    pub max_events_per_country: Option<u32>,
    /// Retry once after a timeout with relaxed limits, if set.
    pub timeout_retry: Option<TimeoutRetry>,
}

impl PlanConfig {
    /// Configuration with default solver settings.
    #[must_use]
    pub fn new(horizon_days: u16, home_city: impl Into<String>) -> Self {
        Self {
            horizon_days,
            home_city: home_city.into(),
            tolerance: DEFAULT_TOLERANCE,
            time_budget: DEFAULT_TIME_BUDGET,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            attendance: AttendanceMode::default(),
            max_events_per_country: None,
            timeout_retry: None,
        }
    }

    /// Replace the attendance mode.
    #[must_use]
    pub const fn with_attendance(mut self, attendance: AttendanceMode) -> Self {
        self.attendance = attendance;
        self
    }

    /// Replace the per-country event cap.
    #[must_use]
    pub const fn with_max_events_per_country(mut self, limit: Option<u32>) -> Self {
        self.max_events_per_country = limit;
        self
    }

    /// Replace the solver time budget.
    #[must_use]
    pub const fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Replace the timeout retry policy.
    #[must_use]
    pub const fn with_timeout_retry(mut self, retry: Option<TimeoutRetry>) -> Self {
        self.timeout_retry = retry;
        self
    }

    /// Check values that do not depend on the input tables.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_days == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if self.time_budget.is_zero() {
            return Err(ConfigError::ZeroTimeBudget);
        }
        if !(self.acceptance_threshold > 0.5 && self.acceptance_threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold {
                value: self.acceptance_threshold,
            });
        }
        if let Some(retry) = self.timeout_retry {
            for factor in [retry.budget_factor, retry.tolerance_factor] {
                if !factor.is_finite() || factor < 1.0 {
                    return Err(ConfigError::InvalidRetryFactor { value: factor });
                }
            }
        }
        Ok(())
    }

    /// Resolve the home city against `catalog`.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownHomeCity`] when the name is unknown.
    pub fn resolve_home(&self, catalog: &CityCatalog) -> Result<CityId, ConfigError> {
        catalog
            .resolve(&self.home_city)
            .map_err(|_| ConfigError::UnknownHomeCity {
                city: self.home_city.clone(),
            })
    }

    /// Solver options derived from this configuration.
    #[must_use]
    pub const fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            tolerance: self.tolerance,
            time_budget: self.time_budget,
        }
    }
}
