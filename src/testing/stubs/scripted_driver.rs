use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Result, anyhow, bail};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Bool(bool),
    Text(String),
    U64(u64),
    F64(f64),
    Choice(usize),
}

/// Replays canned answers in order; asking for the wrong kind or running out
/// is an error.
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<Answer>>,
}

impl ScriptedDriver {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.borrow().is_empty()
    }

    fn next(&self, title: &str) -> Result<Answer> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer left for '{title}'"))
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, _default: bool) -> Result<bool> {
        match self.next(title)? {
            Answer::Bool(b) => Ok(b),
            other => bail!("'{title}' expected a bool, script has {other:?}"),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, _default: &str) -> Result<String> {
        match self.next(title)? {
            Answer::Text(s) => Ok(s),
            other => bail!("'{title}' expected text, script has {other:?}"),
        }
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        _default: u64,
        _min: Option<u64>,
        _max: Option<u64>,
    ) -> Result<u64> {
        match self.next(title)? {
            Answer::U64(n) => Ok(n),
            other => bail!("'{title}' expected an integer, script has {other:?}"),
        }
    }

    fn ask_f64(
        &self,
        title: &str,
        _help: &str,
        _default: f64,
        _min: Option<f64>,
        _max: Option<f64>,
    ) -> Result<f64> {
        match self.next(title)? {
            Answer::F64(x) => Ok(x),
            other => bail!("'{title}' expected a number, script has {other:?}"),
        }
    }

    fn select(
        &self,
        title: &str,
        _help: &str,
        options: &[String],
        _default: usize,
    ) -> Result<usize> {
        match self.next(title)? {
            Answer::Choice(i) if i < options.len() => Ok(i),
            other => bail!(
                "'{title}' expected one of {} options, script has {other:?}",
                options.len()
            ),
        }
    }
}
