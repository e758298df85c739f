mod mock_document_source;
mod outline;
mod pdf_adapter;

pub use mock_document_source::MockDocumentSource;
pub use pdf_adapter::PdfAdapter;
