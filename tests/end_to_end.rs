use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use studykit::application::ports::StudyRepository;
use studykit::application::services::{
    ChatOutcome, ChatService, FlashcardService, IndexingService, OutlineService, SummaryService,
};
use studykit::domain::{Document, Heading};
use studykit::infrastructure::index::DiskVectorIndex;
use studykit::infrastructure::llm::{EchoGenerativeModel, HashEmbedder, MockCardModel};
use studykit::infrastructure::pdf::MockDocumentSource;
use studykit::infrastructure::persistence::InMemoryStudyRepository;
use studykit::infrastructure::text_processing::OverlapSplitter;

fn textbook_source() -> MockDocumentSource {
    let headings = vec![
        Heading::new("Intro", 1),
        Heading::new("Methods", 5),
        Heading::new("Results", 12),
    ];

    let mut pages = BTreeMap::new();
    pages.insert(1, "intro overview of the field".to_string());
    for page in 5..=11 {
        pages.insert(
            page,
            format!("methods discussion covering experiment design on page {page}"),
        );
    }
    pages.insert(12, "results tabulated findings on page 12".to_string());

    MockDocumentSource::new(headings, pages)
}

#[tokio::test]
async fn given_textbook_with_headings_when_running_full_study_pipeline_then_each_stage_feeds_the_next(
) {
    let dir = tempfile::tempdir().unwrap();
    let repository: Arc<InMemoryStudyRepository> = Arc::new(InMemoryStudyRepository::new());
    let source = Arc::new(textbook_source());
    let embedder = Arc::new(HashEmbedder::new(256));
    let index = Arc::new(DiskVectorIndex::new(dir.path(), "chunks", embedder.clone()));

    let document = Document::new("Textbook".to_string(), PathBuf::from("textbook.pdf"), None);
    repository.create_document(&document).await.unwrap();

    // segment by outline
    let outline = OutlineService::new(Arc::clone(&source));
    let topics = outline.topics(&document.path).await.unwrap();
    assert_eq!(topics.len(), 3);

    let methods = topics.iter().find(|t| t.title == "Methods").unwrap();
    assert_eq!((methods.start_page, methods.end_page), (5, 11));

    // summarize the selected topic
    let summaries = SummaryService::new(
        Arc::clone(&source),
        Arc::new(EchoGenerativeModel),
        repository.clone(),
    );
    let summary = summaries.generate(&document, methods).await.unwrap();

    assert!(!summary.content.is_empty());
    assert!(summary.content.contains("page 5"));
    assert!(summary.content.contains("page 11"));
    assert!(!summary.content.contains("page 12"));
    assert!(!summary.content.contains("intro overview"));

    // derive flashcards from the stored summary
    let cards_model = Arc::new(MockCardModel::new(vec![
        "What does the methods section cover?".to_string(),
    ]));
    let flashcards = FlashcardService::new(cards_model, repository.clone());
    let cards = flashcards.regenerate(summary.id, 5).await.unwrap();

    assert!(!cards.is_empty());
    assert!(cards.len() <= 5);
    assert_eq!(
        repository.list_flashcards(summary.id).await.unwrap().len(),
        cards.len()
    );

    // build the knowledge base
    let splitter = Arc::new(OverlapSplitter::new(1200, 150));
    let indexing = IndexingService::new(
        Arc::clone(&source),
        splitter,
        embedder.clone(),
        Arc::clone(&index),
        repository.clone(),
    );
    let chunk_count = indexing.build_knowledge_base(&document).await.unwrap();
    assert!(chunk_count >= 1);
    assert!(
        repository
            .get_document(document.id)
            .await
            .unwrap()
            .unwrap()
            .processed
    );

    // chat against the built index
    let chat = ChatService::new(
        Arc::new(EchoGenerativeModel),
        Arc::clone(&index),
        repository.clone(),
        3,
    );
    let outcome = chat
        .ask(document.id, "What does the experiment design cover?")
        .await
        .unwrap();

    match outcome {
        ChatOutcome::Answered { content } => {
            assert!(content.contains("experiment design"));
            assert!(!content.contains("<think>"));
        }
        other => panic!("expected an answer, got {:?}", other),
    }
}

#[tokio::test]
async fn given_unbuilt_knowledge_base_when_chatting_then_user_is_told_to_build_it_first() {
    let dir = tempfile::tempdir().unwrap();
    let repository: Arc<InMemoryStudyRepository> = Arc::new(InMemoryStudyRepository::new());
    let embedder = Arc::new(HashEmbedder::default());
    let index = Arc::new(DiskVectorIndex::new(dir.path(), "chunks", embedder));

    let document = Document::new("Textbook".to_string(), PathBuf::from("textbook.pdf"), None);
    repository.create_document(&document).await.unwrap();

    let chat = ChatService::new(Arc::new(EchoGenerativeModel), index, repository.clone(), 3);
    let outcome = chat.ask(document.id, "anything at all").await.unwrap();

    assert_eq!(outcome, ChatOutcome::KnowledgeBaseMissing);
}
