//! Cooperative game theory Shapley value computation
//!
//! This library computes the Shapley value of every player in a cooperative
//! game by exact enumeration of arrival orderings, with an optional Monte
//! Carlo mode for player counts where N! enumeration stops being tractable.
//! It also ships two small companion models of power-law emergence
//! (preferential attachment and the forest fire model) as data generators.

pub mod error;
pub mod shapley;
pub mod sims;
pub mod types;
mod utils;
pub mod validation;

// Re-export main types and functions
pub use error::{Result, ShapleyError};
pub use shapley::{
    DEFAULT_EFFICIENCY_TOLERANCE, Mode, ShapleyInput, ShapleyOutput, compute_shapley_values,
    verify_efficiency,
};
pub use sims::{ForestFire, ForestFireOutcome, PreferentialAttachment};
pub use types::{Coalition, PlayerId, ShapleyValue, ValueFunction};

#[cfg(feature = "serde")]
pub use types::{CoalitionWorth, GameSpec};
