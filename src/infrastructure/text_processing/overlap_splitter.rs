use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, DocumentId};

/// Fixed-size character windows with bounded overlap.
///
/// A window prefers to end at a natural break (paragraph, then newline, then
/// space) found in its back half; without one it cuts at the size limit. The
/// next window starts `overlap` characters before the previous end, so
/// neighbouring chunks share a bounded span of text. Deterministic for a
/// fixed input and fixed parameters.
pub struct OverlapSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl OverlapSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    fn natural_break(window: &[char]) -> Option<usize> {
        if window.len() < 2 {
            return None;
        }
        let min_pos = window.len() / 2;

        for i in (min_pos..window.len() - 1).rev() {
            if window[i] == '\n' && window[i + 1] == '\n' {
                return Some(i + 2);
            }
        }
        for i in (min_pos..window.len()).rev() {
            if window[i] == '\n' {
                return Some(i + 1);
            }
        }
        for i in (min_pos..window.len()).rev() {
            if window[i] == ' ' {
                return Some(i + 1);
            }
        }

        None
    }
}

#[async_trait]
impl TextSplitter for OverlapSplitter {
    async fn split(
        &self,
        text: &str,
        document_id: DocumentId,
    ) -> Result<Vec<Chunk>, TextSplitterError> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();

        let mut chunks = Vec::new();
        let mut offset = 0;

        while offset < total {
            let hard_end = (offset + self.chunk_size).min(total);
            let end = if hard_end == total {
                total
            } else {
                Self::natural_break(&chars[offset..hard_end])
                    .map(|rel| offset + rel)
                    .unwrap_or(hard_end)
            };

            let chunk_text: String = chars[offset..end].iter().collect();
            chunks.push(Chunk::new(chunk_text, document_id, None, offset));

            if end == total {
                break;
            }

            // always move forward, even with a degenerate overlap
            let next = end.saturating_sub(self.overlap);
            offset = if next > offset { next } else { end };
        }

        Ok(chunks)
    }
}
