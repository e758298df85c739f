use std::sync::Arc;

use crate::application::ports::{
    DocumentSource, GenerativeModel, GenerativeModelError, PdfSourceError, PromptMessage,
    RepositoryError, StudyRepository,
};
use crate::domain::{Document, Summary, Topic};

use super::reasoning::strip_reasoning;

/// Floor for the requested summary length, in words.
const MIN_TARGET_WORDS: usize = 50;

pub struct SummaryService<S, G>
where
    S: DocumentSource,
    G: GenerativeModel,
{
    source: Arc<S>,
    model: Arc<G>,
    repository: Arc<dyn StudyRepository>,
}

impl<S, G> SummaryService<S, G>
where
    S: DocumentSource,
    G: GenerativeModel,
{
    pub fn new(source: Arc<S>, model: Arc<G>, repository: Arc<dyn StudyRepository>) -> Self {
        Self {
            source,
            model,
            repository,
        }
    }

    /// Extract the topic's pages, condense them to roughly a third of their
    /// length, and persist the result. The target length is advisory: it is
    /// stated in the prompt but never enforced on the output.
    #[tracing::instrument(skip(self, document), fields(document_id = %document.id.as_uuid(), topic = %topic.title))]
    pub async fn generate(
        &self,
        document: &Document,
        topic: &Topic,
    ) -> Result<Summary, SummaryError> {
        let text = self
            .source
            .extract_page_range(&document.path, topic.start_page, topic.end_page)
            .await?;

        if text.trim().is_empty() {
            return Err(SummaryError::EmptyTopic {
                title: topic.title.clone(),
            });
        }

        let word_count = text.split_whitespace().count();
        let target_words = (word_count / 3).max(MIN_TARGET_WORDS);

        let prompt = build_prompt(&text, target_words);
        let completion = self
            .model
            .complete(&[PromptMessage::user(prompt)])
            .await
            .map_err(SummaryError::Model)?;

        let content = strip_reasoning(&completion);

        tracing::info!(
            source_words = word_count,
            target_words,
            summary_chars = content.len(),
            "Topic summary generated"
        );

        let summary = Summary::new(document.id, topic.title.clone(), content);
        self.repository.create_summary(&summary).await?;

        Ok(summary)
    }
}

fn build_prompt(text: &str, target_words: usize) -> String {
    format!(
        "Summarize the following text to approximately 1/3rd of its length while maintaining quality. \
         Ensure key concepts and keywords remain intact but simplify explanations where possible. \
         The summary should be concise yet informative, structured in a professional manner. \
         Do not include greetings, conversational phrases, or additional thoughts. \
         Answer in the style of a professionally trained summarization model.\n\n\
         Original Text:\n{text}\n\n\
         Ensure the summary is about {target_words} words long."
    )
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("document source: {0}")]
    Source(#[from] PdfSourceError),
    #[error("topic '{title}' produced no text")]
    EmptyTopic { title: String },
    #[error("generation: {0}")]
    Model(GenerativeModelError),
    #[error("persistence: {0}")]
    Repository(#[from] RepositoryError),
}
