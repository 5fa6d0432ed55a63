//! Adaptive Session Controller
//!
//! State machine: InProgress -> Complete, evaluated once per answered item.
//!
//! Per evaluation:
//! 1. re-estimate theta from the full history (MLE, starting at the caller's
//!    current theta)
//! 2. fewer than `min_items` answered: continue with the most informative
//!    unanswered item
//! 3. otherwise stop when SEM <= `target_sem`, when `max_items` have been
//!    answered, or when no unanswered item is left
//! 4. otherwise continue
//!
//! The controller keeps no state between calls. The caller owns the
//! `SessionState` snapshot, passes it in, and stores the snapshot returned in
//! `SessionUpdate`. Running out of items always completes the session, even
//! before `min_items`. Pool items whose parameters fail validation are never
//! offered.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::AssessmentConfig;
use crate::error::Result;
use crate::estimator::estimate;
use crate::precision::summarize;
use crate::selector::select_next;
use crate::types::{AbilityEstimate, PoolItem, Response};

/// Caller-owned session snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub current_theta: f64,
    pub answered_item_ids: BTreeSet<String>,
    /// Answer history in administration order
    pub responses: Vec<Response>,
}

impl SessionState {
    pub fn new(initial_theta: f64) -> Self {
        Self {
            current_theta: initial_theta,
            ..Default::default()
        }
    }

    pub fn items_answered(&self) -> usize {
        self.responses.len()
    }

    pub fn has_answered(&self, item_id: &str) -> bool {
        self.answered_item_ids.contains(item_id)
    }

    /// Percentage of correct responses (0 before any answer).
    pub fn accuracy(&self) -> f64 {
        if self.responses.is_empty() {
            return 0.0;
        }
        let correct = self.responses.iter().filter(|r| r.correct).count();
        correct as f64 * 100.0 / self.responses.len() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// SEM reached the target
    PrecisionReached,
    MaxItemsReached,
    /// No unanswered item left in the pool
    PoolExhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionStatus {
    InProgress { next_item: PoolItem },
    Complete { reason: StopReason },
}

impl SessionStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, SessionStatus::Complete { .. })
    }

    pub fn next_item(&self) -> Option<&PoolItem> {
        match self {
            SessionStatus::InProgress { next_item } => Some(next_item),
            SessionStatus::Complete { .. } => None,
        }
    }
}

/// Outcome of one controller call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    /// Snapshot to store for the next call
    pub state: SessionState,
    /// `None` until at least one response exists
    pub estimate: Option<AbilityEstimate>,
    pub status: SessionStatus,
}

/// Stateless controller for one assessment type
#[derive(Debug, Clone)]
pub struct AdaptiveSession {
    config: AssessmentConfig,
}

impl AdaptiveSession {
    pub fn new(config: AssessmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// First item, chosen at the caller's current theta. No estimation yet.
    pub fn start(&self, state: &SessionState, pool: &[PoolItem]) -> SessionUpdate {
        let status = match self.next_candidate(state.current_theta, state, pool) {
            Some(next_item) => SessionStatus::InProgress { next_item },
            None => SessionStatus::Complete {
                reason: StopReason::PoolExhausted,
            },
        };

        SessionUpdate {
            state: state.clone(),
            estimate: None,
            status,
        }
    }

    /// Append one answer, then evaluate the stopping rules.
    pub fn record_response(
        &self,
        state: &SessionState,
        item: &PoolItem,
        correct: bool,
        pool: &[PoolItem],
    ) -> Result<SessionUpdate> {
        item.params.validate()?;
        if state.has_answered(&item.item_id) {
            tracing::warn!(item_id = %item.item_id, "item answered twice in one session");
        }

        let mut next = state.clone();
        next.answered_item_ids.insert(item.item_id.clone());
        next.responses.push(Response::new(item.params, correct));

        self.evaluate(&next, pool)
    }

    /// Decide whether the session is done given its history.
    pub fn evaluate(&self, state: &SessionState, pool: &[PoolItem]) -> Result<SessionUpdate> {
        if state.responses.is_empty() {
            return Ok(self.start(state, pool));
        }

        let estimation = estimate(
            &state.responses,
            state.current_theta,
            &self.config.estimator,
        )?;
        let theta = estimation.theta;
        let summary = summarize(theta, &state.responses);
        let answered = state.items_answered();
        let next_item = self.next_candidate(theta, state, pool);

        let status = if answered < self.config.min_items {
            match next_item {
                Some(next_item) => SessionStatus::InProgress { next_item },
                None => SessionStatus::Complete {
                    reason: StopReason::PoolExhausted,
                },
            }
        } else if summary.standard_error <= self.config.target_sem {
            SessionStatus::Complete {
                reason: StopReason::PrecisionReached,
            }
        } else if answered >= self.config.max_items {
            SessionStatus::Complete {
                reason: StopReason::MaxItemsReached,
            }
        } else {
            match next_item {
                Some(next_item) => SessionStatus::InProgress { next_item },
                None => SessionStatus::Complete {
                    reason: StopReason::PoolExhausted,
                },
            }
        };

        if let SessionStatus::Complete { reason } = &status {
            tracing::info!(
                ?reason,
                theta,
                sem = summary.standard_error,
                items = answered,
                classification = %summary.classification,
                "adaptive session complete"
            );
        }

        let mut next_state = state.clone();
        next_state.current_theta = theta;

        Ok(SessionUpdate {
            state: next_state,
            estimate: Some(summary),
            status,
        })
    }

    /// Unanswered items with valid parameters only; a malformed catalog entry
    /// is skipped rather than offered and then rejected on answer.
    fn next_candidate(&self, theta: f64, state: &SessionState, pool: &[PoolItem]) -> Option<PoolItem> {
        let candidates: Vec<&PoolItem> = pool
            .iter()
            .filter(|item| !state.has_answered(&item.item_id))
            .filter(|item| match item.params.validate() {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(item_id = %item.item_id, error = %err, "skipping invalid pool item");
                    false
                }
            })
            .collect();
        select_next(theta, &candidates).map(|item| (*item).clone())
    }
}
