use std::path::PathBuf;

use studykit::application::ports::{RepositoryError, StudyRepository};
use studykit::domain::{ChatMessage, Document, Flashcard, MessageRole, Summary, SummaryId};
use studykit::infrastructure::persistence::InMemoryStudyRepository;

async fn seeded(repository: &InMemoryStudyRepository) -> (Document, Summary) {
    let document = Document::new("History".to_string(), PathBuf::from("history.pdf"), None);
    repository.create_document(&document).await.unwrap();

    let summary = Summary::new(document.id, "Rome".to_string(), "Rome grew.".to_string());
    repository.create_summary(&summary).await.unwrap();

    (document, summary)
}

#[tokio::test]
async fn given_document_when_marked_processed_then_flag_flips_once() {
    let repository = InMemoryStudyRepository::new();
    let (document, _) = seeded(&repository).await;

    assert!(!repository.get_document(document.id).await.unwrap().unwrap().processed);

    repository.mark_processed(document.id).await.unwrap();

    assert!(repository.get_document(document.id).await.unwrap().unwrap().processed);
}

#[tokio::test]
async fn given_missing_document_when_creating_summary_then_constraint_violation() {
    let repository = InMemoryStudyRepository::new();
    let orphan = Summary::new(
        studykit::domain::DocumentId::new(),
        "Nowhere".to_string(),
        "text".to_string(),
    );

    let result = repository.create_summary(&orphan).await;

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[tokio::test]
async fn given_replacement_when_swapping_flashcards_then_old_set_fully_gone() {
    let repository = InMemoryStudyRepository::new();
    let (_, summary) = seeded(&repository).await;

    let old = vec![
        Flashcard::new(summary.id, "Old question one?".to_string(), "answer one".to_string()),
        Flashcard::new(summary.id, "Old question two?".to_string(), "answer two".to_string()),
    ];
    repository.replace_flashcards(summary.id, &old).await.unwrap();

    let new = vec![Flashcard::new(
        summary.id,
        "New question?".to_string(),
        "new answer".to_string(),
    )];
    repository.replace_flashcards(summary.id, &new).await.unwrap();

    let cards = repository.list_flashcards(summary.id).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].question, "New question?");
}

#[tokio::test]
async fn given_unknown_summary_when_replacing_flashcards_then_not_found() {
    let repository = InMemoryStudyRepository::new();

    let result = repository.replace_flashcards(SummaryId::new(), &[]).await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
async fn given_document_when_requesting_session_twice_then_same_session() {
    let repository = InMemoryStudyRepository::new();
    let (document, _) = seeded(&repository).await;

    let first = repository.get_or_create_session(document.id).await.unwrap();
    let second = repository.get_or_create_session(document.id).await.unwrap();

    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn given_deleted_document_when_cascading_then_children_removed() {
    let repository = InMemoryStudyRepository::new();
    let (document, summary) = seeded(&repository).await;

    let cards = vec![Flashcard::new(
        summary.id,
        "What did Rome do?".to_string(),
        "It grew.".to_string(),
    )];
    repository.replace_flashcards(summary.id, &cards).await.unwrap();

    let session = repository.get_or_create_session(document.id).await.unwrap();
    let message = ChatMessage::new(session.id, MessageRole::User, "hello".to_string());
    repository.append_message(&message).await.unwrap();

    repository.delete_document(document.id).await.unwrap();

    assert!(repository.get_document(document.id).await.unwrap().is_none());
    assert!(repository.list_summaries(document.id).await.unwrap().is_empty());
    assert!(repository.list_flashcards(summary.id).await.unwrap().is_empty());
    assert!(repository.list_messages(session.id).await.unwrap().is_empty());
}
