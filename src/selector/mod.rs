//! Maximum-Information Item Selection
//!
//! The next item is the candidate with the strictly largest Fisher
//! information at the current theta. Ties keep the earliest candidate in pool
//! order, so selection is deterministic for a given pool. An empty pool yields
//! `None`, which callers treat as "no more content".

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::information;
use crate::types::ItemParameters;

/// Pools smaller than this are scored sequentially
const PARALLEL_THRESHOLD: usize = 512;

/// Half-width of the recommended difficulty window
const DIFFICULTY_WINDOW: f64 = 0.5;

/// Information of every candidate at theta, in pool order.
pub fn pool_information<T>(theta: f64, pool: &[T]) -> Vec<f64>
where
    T: AsRef<ItemParameters> + Sync,
{
    if pool.len() < PARALLEL_THRESHOLD {
        pool.iter()
            .map(|item| information(theta, item.as_ref()))
            .collect()
    } else {
        // indexed collect keeps pool order
        pool.par_iter()
            .map(|item| information(theta, item.as_ref()))
            .collect()
    }
}

/// Index of the most informative candidate.
pub fn select_next_index<T>(theta: f64, pool: &[T]) -> Option<usize>
where
    T: AsRef<ItemParameters> + Sync,
{
    let scores = pool_information(theta, pool);

    let mut best: Option<(usize, f64)> = None;
    for (index, &info) in scores.iter().enumerate() {
        match best {
            Some((_, best_info)) if info <= best_info => {}
            _ => best = Some((index, info)),
        }
    }

    if let Some((index, info)) = best {
        tracing::debug!(theta, index, information = info, pool_size = pool.len(), "selected next item");
    }
    best.map(|(index, _)| index)
}

/// Most informative candidate, or `None` for an empty pool.
pub fn select_next<T>(theta: f64, pool: &[T]) -> Option<&T>
where
    T: AsRef<ItemParameters> + Sync,
{
    select_next_index(theta, pool).map(|index| &pool[index])
}

/// Difficulty window centred on theta
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRange {
    pub min: f64,
    pub max: f64,
}

impl DifficultyRange {
    pub fn contains(&self, difficulty: f64) -> bool {
        difficulty >= self.min && difficulty <= self.max
    }
}

pub fn recommended_difficulty_range(theta: f64) -> DifficultyRange {
    DifficultyRange {
        min: theta - DIFFICULTY_WINDOW,
        max: theta + DIFFICULTY_WINDOW,
    }
}
