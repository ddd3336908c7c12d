use thiserror::Error;

/// Error types for the Shapley computation system
#[derive(Debug, Error)]
pub enum ShapleyError {
    /// Zero players supplied
    #[error("The player set is empty; at least one player is required.")]
    EmptyPlayerSet,

    /// The same identifier appears twice in the player list
    #[error("Player {player} appears more than once in the player list.")]
    DuplicatePlayer { player: String },

    /// The value function lacks an entry for a coalition the computation needs
    #[error("The value function has no entry for coalition {coalition}.")]
    MissingCoalitionValue { coalition: String },

    /// The value function assigns a worth to players outside the declared set
    #[error("Coalition {coalition} refers to players outside the declared player set.")]
    UnknownCoalition { coalition: String },

    /// Too many players for the requested computation mode
    #[error(
        "There are too many players ({count}); we limit to {limit} to keep the computation tractable."
    )]
    TooManyPlayers { count: usize, limit: usize },

    /// Monte Carlo estimation needs at least one sampled permutation
    #[error("The sample budget must be positive for Monte Carlo estimation.")]
    ZeroSampleBudget,

    /// The sum of Shapley values drifted from the grand coalition worth
    #[error(
        "Shapley values sum to {actual}, but the grand coalition is worth {expected} (tolerance {tolerance})."
    )]
    EfficiencyCheckFailed {
        expected: f64,
        actual: f64,
        tolerance: f64,
    },

    /// A probability parameter is outside [0, 1]
    #[error("{name} must lie in [0, 1]; got {value}.")]
    InvalidProbability { name: String, value: f64 },

    /// A simulation grid or population has zero size
    #[error("{what} must be non-zero.")]
    EmptyDimension { what: String },
}

/// Result type alias for Shapley operations
pub type Result<T> = std::result::Result<T, ShapleyError>;
