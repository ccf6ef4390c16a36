mod pruning_sweep;
mod sweep_config;

pub use pruning_sweep::{ImpurityComparison, LevelResult, PruningSweep, SweepOutcome, SweepReport};
pub use sweep_config::{SweepConfig, SweepData};
