//! Integration tests for the adaptive testing flow.
//!
//! Covers estimator recovery on simulated data, boundary clamping, the
//! stopping rules of the session controller and deterministic item selection.

use adaptive_irt::{
    estimate, select_next, AbilityClassification, AdaptiveSession, AssessmentConfig,
    EstimationStatus, EstimatorConfig, ItemParameters, PoolItem, Response, ResponseSimulator,
    SessionState, SessionStatus, StopReason, ThetaBounds,
};

fn item(a: f64, b: f64, c: f64) -> ItemParameters {
    ItemParameters::new(a, b, c).unwrap()
}

/// Calibrated bank with discriminations cycling 1.2..2.0 and difficulties
/// spread evenly over [b_min, b_max].
fn spread_bank(n: usize, b_min: f64, b_max: f64, guessing: f64) -> Vec<ItemParameters> {
    (0..n)
        .map(|i| {
            let a = 1.2 + (i % 5) as f64 * 0.2;
            let b = b_min + (b_max - b_min) * i as f64 / (n - 1) as f64;
            item(a, b, guessing)
        })
        .collect()
}

fn catalog(bank: &[ItemParameters]) -> Vec<PoolItem> {
    bank.iter()
        .enumerate()
        .map(|(i, params)| PoolItem::new(format!("item-{:03}", i), *params))
        .collect()
}

#[test]
fn test_estimator_recovers_generating_theta() {
    let bank = spread_bank(600, -2.0, 3.0, 0.0);
    let responses = ResponseSimulator::with_seed(2024).simulate(0.5, &bank);

    let est = estimate(&responses, 0.0, &EstimatorConfig::default()).unwrap();
    assert_eq!(est.status, EstimationStatus::Converged);
    assert!((est.theta - 0.5).abs() < 0.3, "estimated {}", est.theta);
}

#[test]
fn test_recovery_tightens_with_more_responses() {
    let config = EstimatorConfig::default();
    // loose at 50 items, tight at 600
    for (n, tolerance) in [(50, 0.8), (200, 0.5), (600, 0.3)] {
        let bank = spread_bank(n, -2.0, 3.0, 0.0);
        let responses = ResponseSimulator::with_seed(2024).simulate(0.5, &bank);
        let est = estimate(&responses, 0.0, &config).unwrap();
        let error = (est.theta - 0.5).abs();
        assert!(error < tolerance, "n = {}: estimated {}", n, est.theta);
    }
}

#[test]
fn test_estimator_recovers_theta_with_guessing() {
    let bank = spread_bank(1200, -2.0, 3.0, 0.15);
    let responses = ResponseSimulator::with_seed(99).simulate(-0.5, &bank);

    let est = estimate(&responses, 0.0, &EstimatorConfig::default()).unwrap();
    assert!((est.theta + 0.5).abs() < 0.3, "estimated {}", est.theta);
}

#[test]
fn test_all_correct_and_all_incorrect_clamp() {
    let easy: Vec<Response> = spread_bank(15, -2.5, -1.0, 0.25)
        .into_iter()
        .map(|it| Response::new(it, true))
        .collect();
    let hard: Vec<Response> = spread_bank(15, 1.0, 2.5, 0.25)
        .into_iter()
        .map(|it| Response::new(it, false))
        .collect();
    let config = EstimatorConfig::default();

    for initial in [-2.9, 0.0, 2.9] {
        let high = estimate(&easy, initial, &config).unwrap();
        let low = estimate(&hard, initial, &config).unwrap();
        assert_eq!(high.theta, 3.0);
        assert_eq!(low.theta, -3.0);
    }
}

#[test]
fn test_stopping_rule_scenario() {
    // minItems 10, maxItems 20, target SEM 0.3 with sharp items at θ ≈ 0
    let session = AdaptiveSession::new(AssessmentConfig::placement()).unwrap();
    let pool: Vec<PoolItem> = (0..40)
        .map(|i| PoolItem::new(format!("sharp-{}", i), item(2.5, 0.0, 0.0)))
        .collect();

    let mut state = SessionState::new(0.0);
    for i in 0..9 {
        let update = session
            .record_response(&state, &pool[i], i % 2 == 0, &pool)
            .unwrap();
        assert!(
            matches!(update.status, SessionStatus::InProgress { .. }),
            "must stay in progress after {} items",
            i + 1
        );
        state = update.state;
    }

    let update = session
        .record_response(&state, &pool[9], false, &pool)
        .unwrap();
    let estimate = update.estimate.unwrap();
    assert!(estimate.standard_error <= 0.3, "sem {}", estimate.standard_error);
    assert_eq!(
        update.status,
        SessionStatus::Complete {
            reason: StopReason::PrecisionReached
        }
    );
}

#[test]
fn test_all_correct_answers_keep_session_open() {
    // same sharp items, every answer correct: theta runs to the upper bound,
    // where these items carry almost no information
    let session = AdaptiveSession::new(AssessmentConfig::placement()).unwrap();
    let pool: Vec<PoolItem> = (0..40)
        .map(|i| PoolItem::new(format!("sharp-{}", i), item(2.5, 0.0, 0.0)))
        .collect();

    let mut state = SessionState::new(0.0);
    for i in 0..9 {
        let update = session.record_response(&state, &pool[i], true, &pool).unwrap();
        assert!(
            matches!(update.status, SessionStatus::InProgress { .. }),
            "must stay in progress after {} items",
            i + 1
        );
        state = update.state;
    }

    let update = session.record_response(&state, &pool[9], true, &pool).unwrap();
    let estimate = update.estimate.unwrap();
    assert_eq!(estimate.theta, 3.0);
    assert!(estimate.standard_error > 0.3, "sem {}", estimate.standard_error);
    assert_eq!(estimate.classification, AbilityClassification::Advanced);
    assert!(matches!(update.status, SessionStatus::InProgress { .. }));
    assert_eq!(update.state.items_answered(), 10);
}

#[test]
fn test_session_with_narrow_bounds() {
    let mut config = AssessmentConfig::placement();
    config.estimator.theta_bounds = ThetaBounds { min: -2.0, max: 2.0 };
    let session = AdaptiveSession::new(config).unwrap();
    let pool = catalog(&spread_bank(60, -3.0, 3.0, 0.2));

    let mut update = session.start(&SessionState::new(0.0), &pool);
    while let SessionStatus::InProgress { next_item } = update.status.clone() {
        update = session
            .record_response(&update.state, &next_item, true, &pool)
            .unwrap();
        assert!((-2.0..=2.0).contains(&update.state.current_theta));
    }

    let estimate = update.estimate.unwrap();
    assert_eq!(estimate.theta, 2.0);
    assert!(update.state.items_answered() <= 20);
    assert!(!matches!(
        update.status,
        SessionStatus::Complete {
            reason: StopReason::PoolExhausted
        }
    ));
}

#[test]
fn test_tie_break_is_deterministic() {
    let twin = item(1.7, 0.2, 0.2);
    let pool = vec![PoolItem::new("a", twin), PoolItem::new("b", twin)];

    for _ in 0..25 {
        assert_eq!(select_next(0.0, &pool).unwrap().item_id, "a");
    }

    let session = AdaptiveSession::new(AssessmentConfig::default()).unwrap();
    let update = session.start(&SessionState::new(0.0), &pool);
    assert_eq!(update.status.next_item().unwrap().item_id, "a");
}

#[test]
fn test_empty_pool_completes_regardless_of_progress() {
    let empty: Vec<ItemParameters> = Vec::new();
    assert!(select_next(0.0, &empty).is_none());

    let session = AdaptiveSession::new(AssessmentConfig::default()).unwrap();
    let mut state = SessionState::new(0.0);
    state.answered_item_ids.insert("seen".to_string());
    state.responses.push(Response::new(item(1.2, 0.0, 0.2), true));

    let update = session.evaluate(&state, &[]).unwrap();
    assert_eq!(
        update.status,
        SessionStatus::Complete {
            reason: StopReason::PoolExhausted
        }
    );
    assert!(update.estimate.is_some());
}

#[test]
fn test_simulated_session_runs_to_completion() {
    let bank = spread_bank(200, -3.0, 3.0, 0.2);
    let pool = catalog(&bank);
    let config = AssessmentConfig::placement();
    let session = AdaptiveSession::new(config.clone()).unwrap();
    let mut simulator = ResponseSimulator::with_seed(7);
    let true_theta = 1.0;

    let mut update = session.start(&SessionState::new(0.0), &pool);
    while let SessionStatus::InProgress { next_item } = update.status.clone() {
        let correct = simulator.respond(true_theta, &next_item.params);
        update = session
            .record_response(&update.state, &next_item, correct, &pool)
            .unwrap();
        assert!(update.state.items_answered() <= config.max_items);
    }

    let answered = update.state.items_answered();
    assert!(answered >= config.min_items && answered <= config.max_items);
    assert_eq!(update.state.answered_item_ids.len(), answered, "no item repeated");
    assert!(!matches!(
        update.status,
        SessionStatus::Complete {
            reason: StopReason::PoolExhausted
        }
    ));

    let estimate = update.estimate.unwrap();
    assert!((estimate.theta - true_theta).abs() < 1.5, "final theta {}", estimate.theta);
    assert!(estimate.classification >= AbilityClassification::Basic);
}

#[test]
fn test_practice_config_ends_sooner() {
    let bank = spread_bank(100, -3.0, 3.0, 0.25);
    let pool = catalog(&bank);
    let session = AdaptiveSession::new(AssessmentConfig::practice()).unwrap();

    // alternate answers so precision alone never ends it early
    let mut update = session.start(&SessionState::new(0.0), &pool);
    let mut n = 0;
    while let SessionStatus::InProgress { next_item } = update.status.clone() {
        update = session
            .record_response(&update.state, &next_item, n % 2 == 0, &pool)
            .unwrap();
        n += 1;
    }
    assert!(update.state.items_answered() <= 10);
    assert!(update.state.items_answered() >= 5);
}
