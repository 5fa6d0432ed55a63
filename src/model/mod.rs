//! 3PL Item Response Model
//!
//! Response probability:
//! - P(θ) = c + (1 - c) / (1 + exp(-a(θ - b)))
//!   - a: discrimination
//!   - b: difficulty
//!   - c: guessing (lower asymptote)
//!
//! Fisher information:
//! - I(θ) = a² · (Q/P) · ((P - c) / (1 - c))², Q = 1 - P
//! - Reduces to a²PQ when c = 0, peaks slightly above b when c > 0
//!
//! Every function here is pure; the estimator, selector and precision
//! modules are built on top of them.

use crate::sanitize::{sanitize_information, sigmoid};
use crate::types::{ItemParameters, Response, MAX_PROBABILITY};

/// Probability of a correct response, saturated into [c, 1).
#[inline]
pub fn probability(theta: f64, item: &ItemParameters) -> f64 {
    let c = item.guessing;
    let z = item.discrimination * (theta - item.difficulty);
    let p = c + (1.0 - c) * sigmoid(z);
    p.min(MAX_PROBABILITY).max(c)
}

/// Item Fisher information at theta. Returns 0 when p == 0.
#[inline]
pub fn information(theta: f64, item: &ItemParameters) -> f64 {
    let p = probability(theta, item);
    if p <= 0.0 {
        return 0.0;
    }
    let a = item.discrimination;
    let c = item.guessing;
    let q = 1.0 - p;
    let logistic = (p - c) / (1.0 - c);
    sanitize_information(a * a * logistic * logistic * q / p)
}

/// Expected number-correct score over a set of items.
pub fn expected_score(theta: f64, items: &[ItemParameters]) -> f64 {
    items.iter().map(|item| probability(theta, item)).sum()
}

/// Expected percentage correct (0 for an empty set).
pub fn expected_score_percentage(theta: f64, items: &[ItemParameters]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    expected_score(theta, items) / items.len() as f64 * 100.0
}

/// Log-likelihood of a response history at theta.
pub fn log_likelihood(theta: f64, responses: &[Response]) -> f64 {
    responses
        .iter()
        .map(|r| {
            let p = probability(theta, &r.item);
            if r.correct {
                p.max(f64::MIN_POSITIVE).ln()
            } else {
                (1.0 - p).max(f64::MIN_POSITIVE).ln()
            }
        })
        .sum()
}

/// Per-response contribution to the log-likelihood gradient and to the
/// expected information at theta: (a(u-p)(p-c) / (p(1-c)), I).
#[inline]
pub(crate) fn score_terms(theta: f64, response: &Response) -> (f64, f64) {
    let item = &response.item;
    let p = probability(theta, item);
    if p <= 0.0 {
        return (0.0, 0.0);
    }
    let a = item.discrimination;
    let c = item.guessing;
    let gradient = a * (response.score() - p) * (p - c) / (p * (1.0 - c));
    (gradient, information(theta, item))
}
