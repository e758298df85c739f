/// A top-level outline entry: section title and its 1-indexed start page.
///
/// Derived on demand from the document's embedded outline, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub title: String,
    pub page: u32,
}

impl Heading {
    pub fn new(title: impl Into<String>, page: u32) -> Self {
        Self {
            title: title.into(),
            page,
        }
    }
}
