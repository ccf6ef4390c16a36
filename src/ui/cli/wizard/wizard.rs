use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::classifiers::decision_tree::ImpurityMeasure;
use crate::tasks::SweepConfig;
use crate::ui::cli::drivers::PromptDriver;

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn kind_labels<K>() -> Vec<String>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            match k.get_detailed_message() {
                Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
                _ => label.to_string(),
            }
        })
        .collect()
}

/// Asks for everything a sweep needs.
pub fn prompt_sweep_config<D: PromptDriver>(driver: &D) -> Result<SweepConfig> {
    let train_path = prompt_path_until_ok(
        driver,
        "Training data:",
        "Path of a nominal .arff file",
        "",
        &["arff"],
    )?;
    let mut config = SweepConfig::new(train_path);

    if driver.ask_bool(
        "Use a separate validation file?",
        "Otherwise a holdout is drawn from the training data",
        false,
    )? {
        config.validation_path = Some(prompt_path_until_ok(
            driver,
            "Validation data:",
            "Path of a nominal .arff file",
            "",
            &["arff"],
        )?);
    } else {
        config.validation_fraction = driver.ask_f64(
            "Validation fraction:",
            "Share of the training rows held out",
            config.validation_fraction,
            Some(0.05),
            Some(0.95),
        )?;
        config.seed =
            driver.ask_u64("Seed:", "Seed of the holdout shuffle", config.seed, None, None)?;
    }

    config.test_path = prompt_optional_path(driver, "Test data:", "Path of a nominal .arff file")?;

    let class_index = driver.ask_string(
        "Class attribute index:",
        "0-based (leave blank for the last attribute)",
        "",
    )?;
    let class_index = class_index.trim();
    if !class_index.is_empty() {
        config.class_index = Some(
            class_index
                .parse()
                .with_context(|| format!("invalid attribute index '{class_index}'"))?,
        );
    }

    let positive = driver.ask_string(
        "Positive class label:",
        "Leave blank for the first value of the class attribute",
        "",
    )?;
    if !positive.trim().is_empty() {
        config.positive_class = Some(positive.trim().to_string());
    }

    let mut options = vec!["Automatic  pick the lower validation error".to_string()];
    options.extend(kind_labels::<ImpurityMeasure>());
    let choice = driver.select("Impurity measure:", "", &options, 0)?;
    config.impurity = choice
        .checked_sub(1)
        .and_then(|i| ImpurityMeasure::iter().nth(i));

    config.print_tree = driver.ask_bool("Print the best tree?", "", true)?;
    let report = driver.ask_string(
        "Report file:",
        "JSON report destination (leave blank for none)",
        "",
    )?;
    if !report.trim().is_empty() {
        config.report_path = Some(PathBuf::from(report.trim()));
    }

    config.validate()?;
    Ok(config)
}

fn validate_path_str(input: &str, allowed_exts: &[&str]) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !allowed_exts.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if allowed_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", allowed_exts.join(" / ."))),
        }
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    allowed_exts: &[&str],
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer, allowed_exts) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}

fn prompt_optional_path<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
) -> Result<Option<PathBuf>> {
    loop {
        let answer = driver.ask_string(title, &format!("{help}\n(leave blank for none)"), "")?;
        if answer.trim().is_empty() {
            return Ok(None);
        }
        match validate_path_str(&answer, &["arff"]) {
            Ok(()) => return Ok(Some(PathBuf::from(answer.trim()))),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}
