//! Core types for quiz documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One quiz item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Digits following the `QUESTÃO:` label. Only unique within a list.
    pub number: String,
    pub exam_source: String,
    /// Decimal percentage with a period separator, e.g. `"25.5"`.
    pub guess_probability: String,
    pub statement: String,
    /// Lowercase letter `a`..=`e` to alternative text.
    pub alternatives: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Question {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            ..Self::default()
        }
    }
}

/// A named group of questions with its answer key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub name: String,
    pub proficiency: String,
    pub questions: Vec<Question>,
    /// Question number to lowercase answer letter.
    pub answer_key: BTreeMap<String, String>,
}

impl List {
    /// Copy each answer-key letter into the question with the same number.
    pub fn apply_answer_key(&mut self) {
        for question in &mut self.questions {
            question.answer = self.answer_key.get(&question.number).cloned();
        }
    }
}

/// Body returned by a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub listas: Vec<List>,
}

impl From<Vec<List>> for ConvertResponse {
    fn from(listas: Vec<List>) -> Self {
        Self { listas }
    }
}
