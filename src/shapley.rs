use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::{
    error::{Result, ShapleyError},
    types::{Coalition, PlayerId, ShapleyValue, ValueFunction},
    utils::{factorial, permutation_from_rank},
    validation::check_inputs,
};

/// Shapley values are per player, keyed by the player identifier
pub type ShapleyOutput<P> = BTreeMap<P, ShapleyValue>;

/// Relative tolerance for the efficiency diagnostic. Floating-point summation
/// order introduces drift, so exact equality is not a safe invariant.
pub const DEFAULT_EFFICIENCY_TOLERANCE: f64 = 1e-9;

/// How the permutation space is covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Enumerate all N! player orderings. Exact, tractable only for small N.
    #[default]
    Exact,
    /// Sample orderings uniformly at random up to the given budget, trading
    /// exactness for tractability at larger player counts. Deterministic
    /// given the seed.
    MonteCarlo { samples: u64, seed: u64 },
}

/// Input parameters for Shapley computation
#[derive(Debug, Clone)]
pub struct ShapleyInput<P: PlayerId> {
    pub players: Vec<P>,
    pub value_function: ValueFunction<P>,
    pub mode: Mode,
    pub efficiency_tolerance: f64,
}

impl<P: PlayerId> ShapleyInput<P> {
    pub fn new(players: Vec<P>, value_function: ValueFunction<P>) -> Self {
        ShapleyInput {
            players,
            value_function,
            mode: Mode::default(),
            efficiency_tolerance: DEFAULT_EFFICIENCY_TOLERANCE,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_efficiency_tolerance(mut self, tolerance: f64) -> Self {
        self.efficiency_tolerance = tolerance;
        self
    }

    /// Compute the Shapley value of every player: the mean of the player's
    /// marginal contribution over all (or, in Monte Carlo mode, sampled)
    /// arrival orderings. Pure over its inputs.
    ///
    /// The sum of the returned values approximates the grand coalition worth;
    /// a drift beyond `efficiency_tolerance` is logged as a warning rather
    /// than failing the call, since summation order alone can introduce it.
    pub fn compute(&self) -> Result<ShapleyOutput<P>> {
        check_inputs(&self.players, &self.value_function, self.mode)?;

        let mut players = self.players.clone();
        players.sort();
        let n = players.len();

        let worth = worth_table(&players, &self.value_function)?;

        let accumulators = match self.mode {
            Mode::Exact => accumulate_exact(&worth, n),
            Mode::MonteCarlo { samples, seed } => accumulate_sampled(&worth, n, samples, seed),
        };

        let values: Vec<f64> = accumulators.iter().map(Accumulator::mean).collect();

        let grand_worth = worth[worth.len() - 1];
        let actual: f64 = values.iter().sum();
        if let Err(e) = verify_efficiency(grand_worth, actual, self.efficiency_tolerance) {
            log::warn!("{e}");
        }

        let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
        let output = players
            .into_iter()
            .zip(values)
            .map(|(player, value)| {
                let proportion = if total > 0.0 { value.max(0.0) / total } else { 0.0 };
                (player, ShapleyValue { value, proportion })
            })
            .collect();

        Ok(output)
    }
}

/// Compute Shapley values by exact enumeration with the default settings.
pub fn compute_shapley_values<P: PlayerId>(
    players: Vec<P>,
    value_function: ValueFunction<P>,
) -> Result<ShapleyOutput<P>> {
    ShapleyInput::new(players, value_function).compute()
}

/// Check the efficiency axiom: the values must sum to the grand coalition
/// worth within a relative tolerance (scaled by max(|expected|, 1)).
pub fn verify_efficiency(expected: f64, actual: f64, tolerance: f64) -> Result<()> {
    let scale = expected.abs().max(1.0);
    if (actual - expected).abs() > tolerance * scale {
        return Err(ShapleyError::EfficiencyCheckFailed {
            expected,
            actual,
            tolerance,
        });
    }
    Ok(())
}

/// Running (sum, count) pair for one player's marginal contributions.
/// Merging is commutative and associative, so partial results from any shard
/// of the permutation space combine in any order.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: u64,
}

impl Accumulator {
    fn add(&mut self, marginal: f64) {
        self.sum += marginal;
        self.count += 1;
    }

    fn merge(&mut self, other: &Accumulator) {
        self.sum += other.sum;
        self.count += other.count;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

fn merge_accumulators(mut left: Vec<Accumulator>, right: Vec<Accumulator>) -> Vec<Accumulator> {
    for (l, r) in left.iter_mut().zip(&right) {
        l.merge(r);
    }
    left
}

/// Dense worth table indexed by coalition bitmask over the sorted players.
/// Index 0 is the empty coalition with implicit worth 0. Validation has
/// already guaranteed completeness, but absence still surfaces as an error
/// rather than a panic.
fn worth_table<P: PlayerId>(
    sorted_players: &[P],
    value_function: &ValueFunction<P>,
) -> Result<Vec<f64>> {
    let n = sorted_players.len();
    let mut worth = vec![0.0; 1 << n];

    for (mask, entry) in worth.iter_mut().enumerate().skip(1) {
        let coalition: Coalition<P> = (0..n)
            .filter(|bit| mask & (1 << bit) != 0)
            .map(|bit| sorted_players[bit].clone())
            .collect();
        *entry = value_function.worth(&coalition)?;
    }

    Ok(worth)
}

/// One permutation's left-to-right prefix walk: the marginal contribution of
/// the player at position i is worth(prefix with them) - worth(prefix
/// without them); at position 0 that is the singleton's own worth.
fn record_marginals(perm: &[usize], worth: &[f64], acc: &mut [Accumulator]) {
    let mut prefix = 0usize;
    for &player in perm {
        let with_player = prefix | (1 << player);
        acc[player].add(worth[with_player] - worth[prefix]);
        prefix = with_player;
    }
}

fn accumulate_exact(worth: &[f64], n: usize) -> Vec<Accumulator> {
    let n_perms = factorial(n);

    (0..n_perms)
        .into_par_iter()
        .fold(
            || vec![Accumulator::default(); n],
            |mut acc, rank| {
                let perm = permutation_from_rank(rank, n);
                record_marginals(&perm, worth, &mut acc);
                acc
            },
        )
        .reduce(|| vec![Accumulator::default(); n], merge_accumulators)
}

fn accumulate_sampled(worth: &[f64], n: usize, samples: u64, seed: u64) -> Vec<Accumulator> {
    (0..samples)
        .into_par_iter()
        .fold(
            || vec![Accumulator::default(); n],
            |mut acc, draw| {
                // One generator per draw keeps the reduction order-free and
                // the whole run reproducible from a single seed.
                let mut rng =
                    SmallRng::seed_from_u64(seed ^ draw.wrapping_mul(0x9E37_79B9_7F4A_7C15));
                let mut perm: Vec<usize> = (0..n).collect();
                perm.shuffle(&mut rng);
                record_marginals(&perm, worth, &mut acc);
                acc
            },
        )
        .reduce(|| vec![Accumulator::default(); n], merge_accumulators)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glove_game() -> (Vec<u32>, ValueFunction<u32>) {
        // Player 1 and 2 hold left gloves, player 3 the right one; only a
        // matched pair earns.
        let mut vf = ValueFunction::new();
        vf.insert(vec![1], 0.0);
        vf.insert(vec![2], 0.0);
        vf.insert(vec![3], 0.0);
        vf.insert(vec![1, 2], 0.0);
        vf.insert(vec![1, 3], 1.0);
        vf.insert(vec![2, 3], 1.0);
        vf.insert(vec![1, 2, 3], 1.0);
        (vec![1, 2, 3], vf)
    }

    #[test]
    fn test_glove_game_values() {
        let (players, vf) = glove_game();
        let output = compute_shapley_values(players, vf).unwrap();

        // Known closed-form result: 1/6, 1/6, 4/6.
        assert!((output[&1].value - 1.0 / 6.0).abs() < 1e-12);
        assert!((output[&2].value - 1.0 / 6.0).abs() < 1e-12);
        assert!((output[&3].value - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_each_player_sees_every_permutation() {
        let (players, vf) = glove_game();
        let n = players.len();
        let mut sorted = players.clone();
        sorted.sort();

        let worth = worth_table(&sorted, &vf).unwrap();
        let acc = accumulate_exact(&worth, n);

        for a in &acc {
            assert_eq!(a.count, factorial(n));
        }
    }

    #[test]
    fn test_sampled_accumulators_carry_budget() {
        let (players, vf) = glove_game();
        let mut sorted = players.clone();
        sorted.sort();

        let worth = worth_table(&sorted, &vf).unwrap();
        let acc = accumulate_sampled(&worth, sorted.len(), 500, 7);

        for a in &acc {
            assert_eq!(a.count, 500);
        }
    }

    #[test]
    fn test_monte_carlo_is_deterministic_given_seed() {
        let (players, vf) = glove_game();
        let mode = Mode::MonteCarlo {
            samples: 1000,
            seed: 42,
        };

        let first = ShapleyInput::new(players.clone(), vf.clone())
            .with_mode(mode)
            .compute()
            .unwrap();
        let second = ShapleyInput::new(players, vf)
            .with_mode(mode)
            .compute()
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_worth_table_layout() {
        let (players, vf) = glove_game();
        let mut sorted = players.clone();
        sorted.sort();

        let worth = worth_table(&sorted, &vf).unwrap();
        assert_eq!(worth.len(), 8);
        assert_eq!(worth[0], 0.0); // empty coalition
        assert_eq!(worth[0b101], 1.0); // {1, 3}
        assert_eq!(worth[0b011], 0.0); // {1, 2}
        assert_eq!(worth[0b111], 1.0); // grand coalition
    }

    #[test]
    fn test_verify_efficiency_tolerance() {
        assert!(verify_efficiency(10.0, 10.0 + 1e-12, 1e-9).is_ok());

        let err = verify_efficiency(10.0, 9.5, 1e-9).unwrap_err();
        assert!(matches!(err, ShapleyError::EfficiencyCheckFailed { .. }));
    }

    #[test]
    fn test_proportions_split_the_positive_total() {
        let (players, vf) = glove_game();
        let output = compute_shapley_values(players, vf).unwrap();

        let total: f64 = output.values().map(|sv| sv.proportion).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(output[&3].proportion > output[&1].proportion);
    }
}
