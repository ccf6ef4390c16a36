use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select, Text};
use std::fmt::Display;

pub struct InquireDriver;

fn check_range<T: PartialOrd + Display>(x: &T, min: &Option<T>, max: &Option<T>) -> Validation {
    match (min, max) {
        (Some(lo), Some(hi)) if x < lo || x > hi => {
            Validation::Invalid(format!("Must be between {lo} and {hi}").into())
        }
        (Some(lo), None) if x < lo => Validation::Invalid(format!("Must be ≥ {lo}").into()),
        (None, Some(hi)) if x > hi => Validation::Invalid(format!("Must be ≤ {hi}").into()),
        _ => Validation::Valid,
    }
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        Ok(CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_validator(move |x: &u64| Ok(check_range(x, &min, &max)))
            .prompt()?)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        Ok(CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_validator(move |x: &f64| Ok(check_range(x, &min, &max)))
            .prompt()?)
    }

    fn select(&self, title: &str, help: &str, options: &[String], default: usize) -> Result<usize> {
        let mut select = Select::new(title, options.to_vec()).with_starting_cursor(default);
        if !help.is_empty() {
            select = select.with_help_message(help);
        }
        Ok(select.raw_prompt()?.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_checks() {
        assert!(matches!(check_range(&5u64, &Some(1), &Some(9)), Validation::Valid));
        assert!(matches!(check_range(&0u64, &Some(1), &Some(9)), Validation::Invalid(_)));
        assert!(matches!(check_range(&1.5f64, &None, &Some(1.0)), Validation::Invalid(_)));
        assert!(matches!(check_range(&0.5f64, &Some(0.0), &None), Validation::Valid));
    }
}
