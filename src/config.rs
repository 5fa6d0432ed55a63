use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::ThetaBounds;

const DEFAULT_MAX_ITERATIONS: usize = 50;
const DEFAULT_TOLERANCE: f64 = 0.01;
const DEFAULT_MAX_STEP: f64 = 1.0;
const DEFAULT_START_GUARD: f64 = 2.5;
const DEFAULT_START_FALLBACK: f64 = 1.5;

const DEFAULT_MIN_ITEMS: usize = 10;
const DEFAULT_MAX_ITEMS: usize = 20;
const DEFAULT_TARGET_SEM: f64 = 0.3;

/// Newton-Raphson settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub max_iterations: usize,
    /// Stop once |step| falls below this
    pub tolerance: f64,
    /// Per-iteration step cap
    pub max_step: f64,
    pub theta_bounds: ThetaBounds,
    /// Starting thetas at or beyond ±start_guard are moved to ±start_fallback.
    /// A guard outside narrow bounds acts at the bound itself.
    pub start_guard: f64,
    pub start_fallback: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            max_step: DEFAULT_MAX_STEP,
            theta_bounds: ThetaBounds::default(),
            start_guard: DEFAULT_START_GUARD,
            start_fallback: DEFAULT_START_FALLBACK,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = &self.theta_bounds;
        if !(bounds.min.is_finite() && bounds.max.is_finite()) || bounds.min >= bounds.max {
            return Err(ConfigError::Invalid(format!(
                "theta bounds [{}, {}] must be finite and increasing",
                bounds.min, bounds.max
            )));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("max_iterations must be at least 1".into()));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.max_step > 0.0 && self.max_step.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }
        if !(self.start_fallback >= 0.0 && self.start_fallback < self.start_guard) {
            return Err(ConfigError::Invalid(format!(
                "start_fallback {} must lie in [0, start_guard {})",
                self.start_fallback, self.start_guard
            )));
        }
        // both substitutes must be reachable, otherwise a start on a bound stays there
        if !(bounds.min < -self.start_fallback && self.start_fallback < bounds.max) {
            return Err(ConfigError::Invalid(format!(
                "start_fallback ±{} must lie strictly inside theta bounds [{}, {}]",
                self.start_fallback, bounds.min, bounds.max
            )));
        }
        Ok(())
    }
}

/// Stopping rules plus estimator settings for one assessment type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    pub min_items: usize,
    pub max_items: usize,
    pub target_sem: f64,
    pub estimator: EstimatorConfig,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self::placement()
    }
}

impl AssessmentConfig {
    /// Full placement test
    pub fn placement() -> Self {
        Self {
            min_items: DEFAULT_MIN_ITEMS,
            max_items: DEFAULT_MAX_ITEMS,
            target_sem: DEFAULT_TARGET_SEM,
            estimator: EstimatorConfig::default(),
        }
    }

    /// Short practice check: fewer items, looser precision
    pub fn practice() -> Self {
        Self {
            min_items: 5,
            max_items: 10,
            target_sem: 0.4,
            estimator: EstimatorConfig::default(),
        }
    }

    /// Placement defaults overridden by IRT_* environment variables.
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::placement();

        config.min_items = env_parse("IRT_MIN_ITEMS").unwrap_or(config.min_items);
        config.max_items = env_parse("IRT_MAX_ITEMS").unwrap_or(config.max_items);
        config.target_sem = env_parse("IRT_TARGET_SEM").unwrap_or(config.target_sem);

        let est = &mut config.estimator;
        est.max_iterations = env_parse("IRT_MAX_ITERATIONS").unwrap_or(est.max_iterations);
        est.tolerance = env_parse("IRT_TOLERANCE").unwrap_or(est.tolerance);
        est.theta_bounds.min = env_parse("IRT_THETA_MIN").unwrap_or(est.theta_bounds.min);
        est.theta_bounds.max = env_parse("IRT_THETA_MAX").unwrap_or(est.theta_bounds.max);

        config
    }

    /// Parse a (possibly partial) JSON document; missing fields keep defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_items == 0 {
            return Err(ConfigError::Invalid("max_items must be at least 1".into()));
        }
        if self.min_items > self.max_items {
            return Err(ConfigError::Invalid(format!(
                "min_items {} exceeds max_items {}",
                self.min_items, self.max_items
            )));
        }
        if !(self.target_sem > 0.0 && self.target_sem.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "target_sem must be positive, got {}",
                self.target_sem
            )));
        }
        self.estimator.validate()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.parse::<T>().ok())
}
