//! Stratified train/test split
//!
//! Mỗi class được chia theo cùng tỉ lệ để test set luôn có positive cases.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::record::Dataset;
use crate::logic::error::{RiskError, RiskResult};

#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Split `data` so that `test_size` of the rows land in the test set,
/// preserving the outcome ratio in both partitions.
///
/// Same `seed` + same data → same partitions.
pub fn stratified_split(data: &Dataset, test_size: f64, seed: u64) -> RiskResult<TrainTestSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(RiskError::Dataset(format!(
            "test size must be between 0 and 1, got {}",
            test_size
        )));
    }
    if data.len() < 2 {
        return Err(RiskError::Dataset(format!(
            "need at least 2 rows to split, got {}",
            data.len()
        )));
    }

    let n = data.len();
    let n_test_total = ((test_size * n as f64) - 1e-9).ceil() as usize;

    let counts = data.class_counts();
    let allocation = allocate_test_rows(counts, n_test_total);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx = Vec::with_capacity(n - n_test_total);
    let mut test_idx = Vec::with_capacity(n_test_total);

    for class in [0u8, 1u8] {
        let mut members: Vec<usize> = data
            .labels
            .iter()
            .enumerate()
            .filter(|(_, &y)| y == class)
            .map(|(i, _)| i)
            .collect();
        if members.is_empty() {
            continue;
        }

        let n_test = allocation[class as usize];
        members.shuffle(&mut rng);
        test_idx.extend_from_slice(&members[..n_test]);
        train_idx.extend_from_slice(&members[n_test..]);
    }

    if test_idx.is_empty() {
        return Err(RiskError::Dataset(
            "test partition is empty; dataset too small to split".to_string(),
        ));
    }

    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    log::debug!(
        "Stratified split: {} train / {} test (seed {})",
        train_idx.len(),
        test_idx.len(),
        seed
    );

    Ok(TrainTestSplit {
        train: data.select(&train_idx),
        test: data.select(&test_idx),
    })
}

/// Test rows per class, summing to `n_test` whenever the bounds allow.
///
/// Proportional floor shares, leftover rows by largest remainder (ties go
/// to the lower class). A class with >= 2 rows keeps at least one row on
/// each side; a class with a single row stays in train.
fn allocate_test_rows(counts: [usize; 2], n_test: usize) -> [usize; 2] {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return [0, 0];
    }

    let mut alloc = [0usize; 2];
    let mut remainders = [0usize; 2];
    for c in 0..2 {
        alloc[c] = counts[c] * n_test / n;
        remainders[c] = counts[c] * n_test % n;
    }

    let mut order = [0usize, 1];
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));
    let mut leftover = n_test - alloc.iter().sum::<usize>();
    for &c in &order {
        if leftover == 0 {
            break;
        }
        alloc[c] += 1;
        leftover -= 1;
    }

    let bounds = |count: usize| if count >= 2 { (1, count - 1) } else { (0, 0) };
    for c in 0..2 {
        let (lo, hi) = bounds(counts[c]);
        alloc[c] = alloc[c].clamp(lo, hi);
    }

    // Clamping can move the total; shift rows between classes to restore it
    loop {
        let total: usize = alloc.iter().sum();
        let step = if total > n_test {
            (0..2)
                .filter(|&c| alloc[c] > bounds(counts[c]).0)
                .max_by_key(|&c| alloc[c])
                .map(|c| (c, false))
        } else if total < n_test {
            (0..2)
                .filter(|&c| alloc[c] < bounds(counts[c]).1)
                .max_by_key(|&c| bounds(counts[c]).1 - alloc[c])
                .map(|c| (c, true))
        } else {
            None
        };
        match step {
            Some((c, true)) => alloc[c] += 1,
            Some((c, false)) => alloc[c] -= 1,
            None => break,
        }
    }

    alloc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_sums_to_requested_size() {
        // 1.5 + 1.5: the leftover row goes to one class only
        assert_eq!(allocate_test_rows([7, 7], 3), [2, 1]);
        assert_eq!(allocate_test_rows([10, 10], 4), [2, 2]);
        assert_eq!(allocate_test_rows([80, 20], 20), [16, 4]);
        assert_eq!(allocate_test_rows([500, 268], 154).iter().sum::<usize>(), 154);
    }

    #[test]
    fn test_allocation_keeps_small_class_on_both_sides() {
        // Proportional share of the 2-row class is 0; it still gets one test row
        assert_eq!(allocate_test_rows([98, 2], 20), [19, 1]);
        // A single-row class stays in train
        assert_eq!(allocate_test_rows([9, 1], 2), [2, 0]);
    }
}
