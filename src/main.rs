use anyhow::{Context, Result};
use arbor::tasks::{PruningSweep, SweepConfig};
use arbor::ui::cli::drivers::InquireDriver;
use arbor::ui::cli::wizard::prompt_sweep_config;
use log::info;
use std::fs;
use std::path::Path;

fn load_config(path: &Path) -> Result<SweepConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let mut config: SweepConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    if let Some(base) = path.parent() {
        config.resolve_relative_to(base);
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => prompt_sweep_config(&InquireDriver)?,
    };

    let data = config.load_data().context("loading datasets")?;
    let outcome = PruningSweep::new()
        .with_positive_class(config.positive_class.clone())
        .with_impurity(config.impurity)
        .run(&data.train, &data.validation, data.test.as_ref())?;

    print!("{}", outcome.report);
    if config.print_tree {
        println!();
        print!("{}", outcome.best_tree);
    }

    if let Some(path) = &config.report_path {
        let json = serde_json::to_string_pretty(&outcome.report)?;
        fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
        info!("report written to {}", path.display());
    }
    Ok(())
}
