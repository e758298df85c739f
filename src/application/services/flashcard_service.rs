use std::sync::Arc;

use crate::application::ports::{
    CardModel, CardModelError, RepositoryError, StudyRepository,
};
use crate::domain::{Flashcard, SummaryId};

use super::passage_builder::build_passages;

/// Passages shorter than this many words keep accumulating sentences.
const MIN_PASSAGE_WORDS: usize = 30;
/// Candidate questions shorter than this are discarded.
const MIN_QUESTION_CHARS: usize = 10;
/// Accepted answers must satisfy `MIN < len <= MAX`.
const MIN_ANSWER_CHARS: usize = 5;
const MAX_ANSWER_CHARS: usize = 200;

pub struct FlashcardService<M>
where
    M: CardModel,
{
    model: Arc<M>,
    repository: Arc<dyn StudyRepository>,
}

impl<M> FlashcardService<M>
where
    M: CardModel,
{
    pub fn new(model: Arc<M>, repository: Arc<dyn StudyRepository>) -> Self {
        Self { model, repository }
    }

    /// Regenerate the card set for a summary: at most `num_cards` accepted
    /// question/answer pairs, fewer when passages run out. The summary's
    /// previous cards are replaced in one step once generation has finished;
    /// a model failure mid-run therefore leaves the old set in place.
    #[tracing::instrument(skip(self), fields(summary_id = %summary_id.as_uuid()))]
    pub async fn regenerate(
        &self,
        summary_id: SummaryId,
        num_cards: usize,
    ) -> Result<Vec<Flashcard>, FlashcardError> {
        let summary = self
            .repository
            .get_summary(summary_id)
            .await?
            .ok_or(FlashcardError::SummaryNotFound(summary_id))?;

        let pairs = self.generate_pairs(&summary.content, num_cards).await?;

        let cards: Vec<Flashcard> = pairs
            .into_iter()
            .map(|(question, answer)| Flashcard::new(summary_id, question, answer))
            .collect();

        self.repository
            .replace_flashcards(summary_id, &cards)
            .await?;

        tracing::info!(accepted = cards.len(), requested = num_cards, "Flashcards regenerated");

        Ok(cards)
    }

    async fn generate_pairs(
        &self,
        summary_text: &str,
        num_cards: usize,
    ) -> Result<Vec<(String, String)>, FlashcardError> {
        let mut accepted = Vec::new();

        for passage in build_passages(summary_text, MIN_PASSAGE_WORDS) {
            if accepted.len() >= num_cards {
                break;
            }

            let candidates = self.model.generate_questions(&passage).await?;

            for question in candidates {
                if accepted.len() >= num_cards {
                    break;
                }

                if question.len() < MIN_QUESTION_CHARS || !question.ends_with('?') {
                    tracing::debug!(candidate = %question, "Question candidate rejected");
                    continue;
                }

                let answer = self.model.generate_answer(&question, &passage).await?;

                if answer.len() <= MIN_ANSWER_CHARS || answer.len() > MAX_ANSWER_CHARS {
                    tracing::debug!(
                        question = %question,
                        answer_len = answer.len(),
                        "Answer rejected by length filter"
                    );
                    continue;
                }

                accepted.push((question, answer));
            }
        }

        Ok(accepted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlashcardError {
    #[error("summary {} not found", .0.as_uuid())]
    SummaryNotFound(SummaryId),
    #[error("card model: {0}")]
    Model(#[from] CardModelError),
    #[error("persistence: {0}")]
    Repository(#[from] RepositoryError),
}
