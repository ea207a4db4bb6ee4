//! The interactive collaborator consulted while building commands.

use std::collections::VecDeque;
use std::path::PathBuf;

/// The user dismissed a prompt. Handlers propagate it with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abandoned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
}

pub trait ConfigProvider {
    /// Yes / No / Cancel.
    fn choose(&mut self, title: &str, question: &str) -> Result<Decision, Abandoned>;

    /// Yes / No. Dismissing counts as no.
    fn confirm(&mut self, title: &str, question: &str) -> bool;

    fn text(&mut self, title: &str, prompt: &str, secret: bool) -> Result<String, Abandoned>;

    fn integer(
        &mut self,
        title: &str,
        prompt: &str,
        initial: i64,
        min: Option<i64>,
    ) -> Result<i64, Abandoned>;

    /// An existing file to read from.
    fn open_file(&mut self, title: &str) -> Result<PathBuf, Abandoned>;

    /// A new file to write to.
    fn save_file(&mut self, title: &str, default_extension: Option<&str>)
        -> Result<PathBuf, Abandoned>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Cancel,
    Text(String),
    Int(i64),
    Path(PathBuf),
}

/// Replays a fixed list of answers, for headless use and tests.
///
/// An exhausted queue or an answer of the wrong kind counts as abandonment.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedProvider {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Titles of every prompt shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, title: &str) -> Option<Answer> {
        self.asked.push(title.to_string());
        let answer = self.answers.pop_front();
        if answer.is_none() {
            tracing::warn!(title, "scripted answers exhausted");
        }
        answer
    }
}

impl ConfigProvider for ScriptedProvider {
    fn choose(&mut self, title: &str, _question: &str) -> Result<Decision, Abandoned> {
        match self.next(title) {
            Some(Answer::Yes) => Ok(Decision::Yes),
            Some(Answer::No) => Ok(Decision::No),
            _ => Err(Abandoned),
        }
    }

    fn confirm(&mut self, title: &str, _question: &str) -> bool {
        matches!(self.next(title), Some(Answer::Yes))
    }

    fn text(&mut self, title: &str, _prompt: &str, _secret: bool) -> Result<String, Abandoned> {
        match self.next(title) {
            Some(Answer::Text(s)) => Ok(s),
            _ => Err(Abandoned),
        }
    }

    fn integer(
        &mut self,
        title: &str,
        _prompt: &str,
        _initial: i64,
        min: Option<i64>,
    ) -> Result<i64, Abandoned> {
        match self.next(title) {
            Some(Answer::Int(n)) if min.map_or(true, |m| n >= m) => Ok(n),
            _ => Err(Abandoned),
        }
    }

    fn open_file(&mut self, title: &str) -> Result<PathBuf, Abandoned> {
        match self.next(title) {
            Some(Answer::Path(p)) => Ok(p),
            _ => Err(Abandoned),
        }
    }

    fn save_file(
        &mut self,
        title: &str,
        _default_extension: Option<&str>,
    ) -> Result<PathBuf, Abandoned> {
        match self.next(title) {
            Some(Answer::Path(p)) => Ok(p),
            _ => Err(Abandoned),
        }
    }
}
