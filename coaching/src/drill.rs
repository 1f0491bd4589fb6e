//! Micro-drill grading.
//!
//! Answers and answer keys map question ids to option ids. A question counts
//! as correct only when it was answered and the answer matches the key;
//! unanswered questions and questions missing from the key are incorrect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::types::MicroDrill;

/// Error types for drill grading.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DrillError {
    /// The answer key references a question the drill does not contain
    #[error("Answer key references unknown question: {0}")]
    UnknownQuestion(String),
}

/// Selected option per question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrillAnswers {
    selected: BTreeMap<String, String>,
}

impl DrillAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `option_id` selected for `question_id`, replacing any
    /// earlier choice.
    pub fn select(&self, question_id: &str, option_id: &str) -> Self {
        let mut next = self.clone();
        next.selected
            .insert(question_id.to_string(), option_id.to_string());
        next
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.selected.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Correct option per question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerKey {
    correct: BTreeMap<String, String>,
}

impl AnswerKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the correct option for a question.
    pub fn with(mut self, question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        self.correct.insert(question_id.into(), option_id.into());
        self
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.correct.get(question_id).map(String::as_str)
    }
}

/// Outcome for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question_id: String,
    pub selected: Option<String>,
    pub correct: bool,
}

/// Graded drill, outcomes in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DrillResult {
    pub outcomes: Vec<QuestionOutcome>,
}

impl DrillResult {
    pub fn correct_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.correct).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Share of correct answers in percent. An empty drill scores 0.
    pub fn score_percent(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.correct_count() as f64 * 100.0 / self.total() as f64
    }

    pub fn is_correct(&self, question_id: &str) -> Option<bool> {
        self.outcomes
            .iter()
            .find(|o| o.question_id == question_id)
            .map(|o| o.correct)
    }
}

/// Grade `answers` for `drill` against `key`.
pub fn grade_drill(
    drill: &MicroDrill,
    answers: &DrillAnswers,
    key: &AnswerKey,
) -> Result<DrillResult, DrillError> {
    if let Some(unknown) = key
        .correct
        .keys()
        .find(|id| !drill.questions.iter().any(|q| &q.id == *id))
    {
        return Err(DrillError::UnknownQuestion(unknown.clone()));
    }

    let outcomes: Vec<QuestionOutcome> = drill
        .questions
        .iter()
        .map(|question| {
            let selected = answers.get(&question.id);
            let expected = key.get(&question.id);
            if expected.is_none() {
                tracing::warn!(
                    drill_id = %drill.drill_id,
                    question_id = %question.id,
                    "No answer key entry for drill question"
                );
            }
            QuestionOutcome {
                question_id: question.id.clone(),
                selected: selected.map(str::to_string),
                correct: selected.is_some() && selected == expected,
            }
        })
        .collect();

    let result = DrillResult { outcomes };
    tracing::debug!(
        drill_id = %drill.drill_id,
        correct = result.correct_count(),
        total = result.total(),
        "Graded micro-drill"
    );
    Ok(result)
}
