//! Group sampling: M distinct agent indices drawn uniformly from [0, N)

use std::collections::BTreeSet;

use riskpool_common::RandomSource;

/// Draw `group_size` distinct indices in `[0, population_size)`, sorted.
///
/// Rejection sampling: draw uniform indices until enough distinct ones have
/// been seen. Expected draws stay close to `group_size` while the group is
/// much smaller than the population.
///
/// Panics if `group_size >= population_size`; parameter validation rejects
/// that before any game is played.
pub fn sample_group(
    population_size: usize,
    group_size: usize,
    rng: &mut impl RandomSource,
) -> Vec<usize> {
    assert!(
        group_size < population_size,
        "group of {group_size} cannot be sampled from {population_size} agents"
    );

    let mut selected = BTreeSet::new();
    while selected.len() < group_size {
        selected.insert(rng.next_index(population_size));
    }
    selected.into_iter().collect()
}
