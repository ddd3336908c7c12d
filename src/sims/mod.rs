//! Companion power-law toy models: simple random processes whose outcome
//! distributions arrange themselves into heavy tails. Both are data
//! generators only; rendering their output is left to the caller.

pub mod forest_fire;
pub mod preferential;

pub use forest_fire::{ForestFire, ForestFireOutcome};
pub use preferential::PreferentialAttachment;
