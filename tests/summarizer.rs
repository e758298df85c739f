use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use studykit::application::services::{strip_reasoning, SummaryError, SummaryService};
use studykit::domain::{Document, Topic};
use studykit::infrastructure::llm::EchoGenerativeModel;
use studykit::infrastructure::pdf::MockDocumentSource;
use studykit::infrastructure::persistence::InMemoryStudyRepository;

fn topic(title: &str, start: u32, end: u32) -> Topic {
    Topic {
        title: title.to_string(),
        start_page: start,
        end_page: end,
    }
}

async fn stored_document(repository: &InMemoryStudyRepository) -> Document {
    let document = Document::new("Biology".to_string(), PathBuf::from("biology.pdf"), None);
    use studykit::application::ports::StudyRepository;
    repository.create_document(&document).await.unwrap();
    document
}

#[test]
fn given_text_with_reasoning_block_when_stripped_then_block_removed() {
    let raw = "<think>first I will\nconsider the text</think>\nThe cell is the basic unit.";

    let cleaned = strip_reasoning(raw);

    assert_eq!(cleaned, "The cell is the basic unit.");
}

#[test]
fn given_multiple_reasoning_blocks_when_stripped_then_all_removed_non_greedily() {
    let raw = "<think>a</think>keep this<think>b</think> and this";

    let cleaned = strip_reasoning(raw);

    assert_eq!(cleaned, "keep this and this");
    assert!(!cleaned.contains("<think>"));
}

#[test]
fn given_text_without_reasoning_when_stripped_then_unchanged() {
    assert_eq!(strip_reasoning("plain answer"), "plain answer");
}

#[tokio::test]
async fn given_short_topic_when_summarizing_then_target_floor_is_fifty_words() {
    let repository: Arc<InMemoryStudyRepository> = Arc::new(InMemoryStudyRepository::new());
    let pages = BTreeMap::from([(1, "short text on one page".to_string())]);
    let service = SummaryService::new(
        Arc::new(MockDocumentSource::with_pages(pages)),
        Arc::new(EchoGenerativeModel),
        repository.clone(),
    );
    let document = stored_document(&repository).await;

    let summary = service
        .generate(&document, &topic("Short", 1, 1))
        .await
        .unwrap();

    assert!(summary.content.contains("about 50 words long"));
}

#[tokio::test]
async fn given_long_topic_when_summarizing_then_target_is_a_third_of_word_count() {
    let repository: Arc<InMemoryStudyRepository> = Arc::new(InMemoryStudyRepository::new());
    let words = vec!["word"; 300].join(" ");
    let pages = BTreeMap::from([(1, words)]);
    let service = SummaryService::new(
        Arc::new(MockDocumentSource::with_pages(pages)),
        Arc::new(EchoGenerativeModel),
        repository.clone(),
    );
    let document = stored_document(&repository).await;

    let summary = service
        .generate(&document, &topic("Long", 1, 1))
        .await
        .unwrap();

    assert!(summary.content.contains("about 100 words long"));
}

#[tokio::test]
async fn given_model_emitting_reasoning_when_summarizing_then_output_has_no_reasoning_block() {
    let repository: Arc<InMemoryStudyRepository> = Arc::new(InMemoryStudyRepository::new());
    let pages = BTreeMap::from([(1, "mitochondria are the powerhouse of the cell".to_string())]);
    let service = SummaryService::new(
        Arc::new(MockDocumentSource::with_pages(pages)),
        Arc::new(EchoGenerativeModel),
        repository.clone(),
    );
    let document = stored_document(&repository).await;

    let summary = service
        .generate(&document, &topic("Cells", 1, 1))
        .await
        .unwrap();

    assert!(!summary.content.contains("<think>"));
    assert!(!summary.content.contains("</think>"));
    assert!(summary.content.contains("mitochondria"));
}

#[tokio::test]
async fn given_empty_page_range_when_summarizing_then_empty_topic_error() {
    let repository: Arc<InMemoryStudyRepository> = Arc::new(InMemoryStudyRepository::new());
    let service = SummaryService::new(
        Arc::new(MockDocumentSource::with_pages(BTreeMap::new())),
        Arc::new(EchoGenerativeModel),
        repository.clone(),
    );
    let document = stored_document(&repository).await;

    let result = service.generate(&document, &topic("Missing", 40, 50)).await;

    assert!(matches!(result, Err(SummaryError::EmptyTopic { .. })));
}

#[tokio::test]
async fn given_successful_summary_when_generated_then_persisted_for_document() {
    use studykit::application::ports::StudyRepository;

    let repository: Arc<InMemoryStudyRepository> = Arc::new(InMemoryStudyRepository::new());
    let pages = BTreeMap::from([(2, "photosynthesis converts light to energy".to_string())]);
    let service = SummaryService::new(
        Arc::new(MockDocumentSource::with_pages(pages)),
        Arc::new(EchoGenerativeModel),
        repository.clone(),
    );
    let document = stored_document(&repository).await;

    let summary = service
        .generate(&document, &topic("Photosynthesis", 2, 2))
        .await
        .unwrap();

    let listed = repository.list_summaries(document.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, summary.id);
    assert_eq!(listed[0].topic_title, "Photosynthesis");
}
