use async_trait::async_trait;

use crate::application::ports::{CardModel, CardModelError};

/// Deterministic test double returning the same question candidates for
/// every passage. Without a fixed answer, answers echo the passage's first
/// words so length filters can be exercised from the passage side.
pub struct MockCardModel {
    questions: Vec<String>,
    answer: Option<String>,
}

impl MockCardModel {
    pub fn new(questions: Vec<String>) -> Self {
        Self {
            questions,
            answer: None,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }
}

#[async_trait]
impl CardModel for MockCardModel {
    async fn generate_questions(&self, _passage: &str) -> Result<Vec<String>, CardModelError> {
        Ok(self.questions.clone())
    }

    async fn generate_answer(
        &self,
        _question: &str,
        passage: &str,
    ) -> Result<String, CardModelError> {
        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => Ok(passage
                .split_whitespace()
                .take(8)
                .collect::<Vec<_>>()
                .join(" ")),
        }
    }
}

/// Test double that fails on the answer pass, after questions succeeded.
pub struct FailingCardModel;

#[async_trait]
impl CardModel for FailingCardModel {
    async fn generate_questions(&self, _passage: &str) -> Result<Vec<String>, CardModelError> {
        Ok(vec!["What does this passage describe?".to_string()])
    }

    async fn generate_answer(
        &self,
        _question: &str,
        _passage: &str,
    ) -> Result<String, CardModelError> {
        Err(CardModelError::InferenceFailed(
            "model backend unavailable".to_string(),
        ))
    }
}
