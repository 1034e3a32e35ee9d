use crate::model::Event;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A threshold that cannot select a well-defined subset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("min_magnitude must be a finite number (got {0})")]
    NonFiniteMinMagnitude(f64),

    #[error("max_depth_km must be a non-negative number (got {0})")]
    InvalidMaxDepth(f64),
}

/// User-chosen thresholds used to derive the filtered subset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterCriteria {
    /// Inclusive lower bound.
    #[serde(default)]
    pub min_magnitude: f64,

    /// Inclusive upper bound on absolute depth. `None` is unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth_km: Option<f64>,

    /// Case-insensitive substring of `place`. Empty is unbounded.
    #[serde(default, rename = "search")]
    pub search_term: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_magnitude: 0.0,
            max_depth_km: None,
            search_term: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn with_min_magnitude(mut self, min_magnitude: f64) -> Self {
        self.min_magnitude = min_magnitude;
        self
    }

    pub fn with_max_depth_km(mut self, max_depth_km: Option<f64>) -> Self {
        self.max_depth_km = max_depth_km;
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Every threshold problem, in field order. Empty when usable.
    ///
    /// A NaN bound would make every comparison false and let events through
    /// that are below it.
    pub fn check(&self) -> Vec<CriteriaError> {
        let mut problems = Vec::new();

        if !self.min_magnitude.is_finite() {
            problems.push(CriteriaError::NonFiniteMinMagnitude(self.min_magnitude));
        }

        if let Some(depth) = self.max_depth_km {
            if !depth.is_finite() || depth < 0.0 {
                problems.push(CriteriaError::InvalidMaxDepth(depth));
            }
        }

        problems
    }

    pub fn matches(&self, event: &Event) -> bool {
        if event.magnitude_value() < self.min_magnitude {
            return false;
        }

        if self
            .max_depth_km
            .is_some_and(|max_depth| event.abs_depth_km() > max_depth)
        {
            return false;
        }

        if !self.search_term.is_empty()
            && !event
                .place
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
        {
            return false;
        }

        true
    }
}
