use super::Heading;

/// A study topic: a heading plus the inclusive page range it spans.
///
/// The end page is inferred, not read from the document: each topic runs up
/// to the page before the next heading, and the last topic is capped at ten
/// pages past its start. Out-of-range pages are skipped at extraction time,
/// so an overshooting estimate is harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
}

/// Number of pages assumed for the final topic when no later heading bounds it.
const LAST_TOPIC_PAGE_SPAN: u32 = 10;

pub fn topics_from_headings(headings: &[Heading]) -> Vec<Topic> {
    headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let end_page = match headings.get(i + 1) {
                Some(next) => next.page.saturating_sub(1).max(heading.page),
                None => heading.page + LAST_TOPIC_PAGE_SPAN,
            };
            Topic {
                title: heading.title.clone(),
                start_page: heading.page,
                end_page,
            }
        })
        .collect()
}
