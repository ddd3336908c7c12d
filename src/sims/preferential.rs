use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::{Result, ShapleyError};

/// The preferential attachment model: agents arrive one by one, the first
/// founds a group, and each later agent either founds a new group (with
/// probability `new_group_probability`) or joins an existing one with
/// probability proportional to its current size. The rich get richer; the
/// final group sizes follow a power law.
#[derive(Debug, Clone)]
pub struct PreferentialAttachment {
    pub agents: usize,
    pub new_group_probability: f64,
}

impl PreferentialAttachment {
    pub fn new(agents: usize, new_group_probability: f64) -> Self {
        PreferentialAttachment {
            agents,
            new_group_probability,
        }
    }

    /// Run the model and return the final group sizes. Deterministic given
    /// the seed; the sizes always sum to `agents`.
    pub fn run(&self, seed: u64) -> Result<Vec<usize>> {
        if self.agents == 0 {
            return Err(ShapleyError::EmptyDimension {
                what: "agents".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.new_group_probability) {
            return Err(ShapleyError::InvalidProbability {
                name: "new_group_probability".to_string(),
                value: self.new_group_probability,
            });
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut sizes: Vec<usize> = Vec::new();

        for arrival in 0..self.agents {
            if arrival == 0 || rng.random_bool(self.new_group_probability) {
                sizes.push(1);
                continue;
            }

            // Sizes sum to the number of agents already placed, so a uniform
            // draw below that total lands in a group with probability
            // proportional to its size.
            let mut ticket = rng.random_range(0..arrival);
            for size in sizes.iter_mut() {
                if ticket < *size {
                    *size += 1;
                    break;
                }
                ticket -= *size;
            }
        }

        log::debug!(
            "preferential attachment placed {} agents into {} groups",
            self.agents,
            sizes.len()
        );

        Ok(sizes)
    }
}
