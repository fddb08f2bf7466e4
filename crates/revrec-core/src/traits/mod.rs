//! Extension seams.

pub mod weight_provider;

pub use weight_provider::{ConfigWeightProvider, StaticWeightProvider, WeightProvider, WeightTable};
