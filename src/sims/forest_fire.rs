use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::{Result, ShapleyError};

/// The forest fire model of self-organized criticality: trees grow on an
/// N x N grid, and occasionally a struck tree ignites its whole 4-connected
/// component. The component sizes observed right before each fire settle
/// into a power-law distribution.
#[derive(Debug, Clone)]
pub struct ForestFire {
    /// Grid side length (the grid is `side * side` cells)
    pub side: usize,
    /// Probability that a struck empty cell grows a tree; a struck tree
    /// ignites with the complementary probability
    pub growth_probability: f64,
    /// Probability that a cell starts with a tree
    pub initial_density: f64,
    /// Number of cell strikes to simulate
    pub steps: usize,
}

/// What a run observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestFireOutcome {
    /// Size of the component burned by each fire, in event order
    pub fire_sizes: Vec<usize>,
    /// Census of all component sizes immediately before each fire; this is
    /// the power-law observable
    pub pre_fire_census: Vec<Vec<usize>>,
    /// Trees standing when the run ended
    pub final_tree_count: usize,
}

impl ForestFire {
    pub fn new(side: usize, growth_probability: f64, initial_density: f64, steps: usize) -> Self {
        ForestFire {
            side,
            growth_probability,
            initial_density,
            steps,
        }
    }

    /// Run the model. Deterministic given the seed.
    pub fn run(&self, seed: u64) -> Result<ForestFireOutcome> {
        if self.side == 0 {
            return Err(ShapleyError::EmptyDimension {
                what: "grid side".to_string(),
            });
        }
        for (name, value) in [
            ("growth_probability", self.growth_probability),
            ("initial_density", self.initial_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ShapleyError::InvalidProbability {
                    name: name.to_string(),
                    value,
                });
            }
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let cells = self.side * self.side;
        let mut grid: Vec<bool> = (0..cells)
            .map(|_| rng.random_bool(self.initial_density))
            .collect();

        let mut fire_sizes = Vec::new();
        let mut pre_fire_census = Vec::new();

        for _ in 0..self.steps {
            let struck = rng.random_range(0..cells);
            let grows = rng.random_bool(self.growth_probability);

            if !grid[struck] {
                if grows {
                    grid[struck] = true;
                }
            } else if !grows {
                pre_fire_census.push(component_sizes(&grid, self.side));
                let burned = burn(&mut grid, self.side, struck);
                log::debug!("fire consumed a component of {burned} trees");
                fire_sizes.push(burned);
            }
        }

        Ok(ForestFireOutcome {
            fire_sizes,
            pre_fire_census,
            final_tree_count: grid.iter().filter(|&&t| t).count(),
        })
    }
}

fn neighbors(side: usize, cell: usize) -> impl Iterator<Item = usize> {
    let (row, col) = (cell / side, cell % side);
    [
        (row.wrapping_sub(1), col),
        (row + 1, col),
        (row, col.wrapping_sub(1)),
        (row, col + 1),
    ]
    .into_iter()
    .filter(move |&(r, c)| r < side && c < side)
    .map(move |(r, c)| r * side + c)
}

/// Clear the whole 4-connected tree component containing `start` and return
/// its size. Iterative flood fill; the stack doubles as the visited queue
/// because cells are cleared on push.
fn burn(grid: &mut [bool], side: usize, start: usize) -> usize {
    let mut stack = vec![start];
    grid[start] = false;
    let mut burned = 0;

    while let Some(cell) = stack.pop() {
        burned += 1;
        for next in neighbors(side, cell) {
            if grid[next] {
                grid[next] = false;
                stack.push(next);
            }
        }
    }

    burned
}

/// Sizes of every 4-connected tree component on the grid.
fn component_sizes(grid: &[bool], side: usize) -> Vec<usize> {
    let mut visited = vec![false; grid.len()];
    let mut sizes = Vec::new();

    for start in 0..grid.len() {
        if !grid[start] || visited[start] {
            continue;
        }

        let mut stack = vec![start];
        visited[start] = true;
        let mut size = 0;

        while let Some(cell) = stack.pop() {
            size += 1;
            for next in neighbors(side, cell) {
                if grid[next] && !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        sizes.push(size);
    }

    sizes
}
