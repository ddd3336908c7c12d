use std::collections::BTreeSet;

use crate::{
    error::{Result, ShapleyError},
    shapley::Mode,
    types::{Coalition, PlayerId, ValueFunction},
};

/// Exact enumeration walks all N! permutations; 10 players is already 3.6M.
pub(crate) const MAX_EXACT_PLAYERS: usize = 10;

/// Monte Carlo only needs the 2^N worth table, but the characteristic
/// function itself must still be supplied in full.
pub(crate) const MAX_SAMPLED_PLAYERS: usize = 20;

/// Validate the player set and characteristic function before any
/// permutation work: empty or duplicated players, per-mode size limits, and
/// completeness of the value function over all 2^N - 1 non-empty subsets.
/// A missing subset fails fast here instead of deep inside the loop.
pub(crate) fn check_inputs<P: PlayerId>(
    players: &[P],
    value_function: &ValueFunction<P>,
    mode: Mode,
) -> Result<()> {
    if players.is_empty() {
        return Err(ShapleyError::EmptyPlayerSet);
    }

    let player_set: BTreeSet<&P> = players.iter().collect();
    if player_set.len() != players.len() {
        let mut seen = BTreeSet::new();
        for player in players {
            if !seen.insert(player) {
                return Err(ShapleyError::DuplicatePlayer {
                    player: player.to_string(),
                });
            }
        }
    }

    let n = players.len();
    match mode {
        Mode::Exact => {
            if n > MAX_EXACT_PLAYERS {
                return Err(ShapleyError::TooManyPlayers {
                    count: n,
                    limit: MAX_EXACT_PLAYERS,
                });
            }
        }
        Mode::MonteCarlo { samples, .. } => {
            if n > MAX_SAMPLED_PLAYERS {
                return Err(ShapleyError::TooManyPlayers {
                    count: n,
                    limit: MAX_SAMPLED_PLAYERS,
                });
            }
            if samples == 0 {
                return Err(ShapleyError::ZeroSampleBudget);
            }
        }
    }

    // Entries over players outside the declared set are input mistakes, not
    // spare data; reject them before checking completeness.
    for (coalition, _) in value_function.iter() {
        if coalition.members().iter().any(|m| !player_set.contains(m)) {
            return Err(ShapleyError::UnknownCoalition {
                coalition: coalition.to_string(),
            });
        }
    }

    // Every non-empty subset must carry a worth.
    let sorted: Vec<&P> = player_set.into_iter().collect();
    for mask in 1u32..(1u32 << n) {
        let coalition: Coalition<P> = (0..n)
            .filter(|bit| mask & (1 << bit) != 0)
            .map(|bit| sorted[bit].clone())
            .collect();

        if value_function.get(&coalition).is_none() {
            return Err(ShapleyError::MissingCoalitionValue {
                coalition: coalition.to_string(),
            });
        }
    }

    Ok(())
}
