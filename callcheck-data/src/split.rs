//! Seeded train/dev splitting.

use crate::error::{DataError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Default shuffle seed.
pub const DEFAULT_SEED: u64 = 11711;

/// Default share of rows that go to the training side.
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// A train/dev split.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<T> {
    /// Training rows.
    pub train: Vec<T>,
    /// Development rows.
    pub dev: Vec<T>,
}

/// Index at which `n` shuffled rows are cut: `floor(n * ratio)` clamped so
/// both sides keep at least one row.
pub fn split_index(n: usize, train_ratio: f64) -> usize {
    // `as` saturates: negative and NaN products become 0.
    let raw = (n as f64 * train_ratio).floor() as usize;
    raw.clamp(1, n.saturating_sub(1).max(1))
}

/// Shuffle `rows` with `seed` and split them into train and dev.
///
/// Fails with fewer than two rows. The same rows, ratio and seed always give
/// the same split.
pub fn split_train_dev<T>(mut rows: Vec<T>, train_ratio: f64, seed: u64) -> Result<Split<T>> {
    if rows.len() < 2 {
        return Err(DataError::too_few_rows(rows.len()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let cut = split_index(rows.len(), train_ratio);
    let dev = rows.split_off(cut);
    tracing::debug!(train = rows.len(), dev = dev.len(), seed, "split rows");
    Ok(Split { train: rows, dev })
}
