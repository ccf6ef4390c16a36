mod wizard;

pub use wizard::prompt_sweep_config;
