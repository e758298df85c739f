use std::sync::LazyLock;

use regex::Regex;

static REASONING_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

/// Remove internal reasoning blocks some models emit before their answer.
///
/// Non-greedy, so multiple blocks are each removed; `(?s)` lets a block span
/// lines. An unclosed `<think>` is left untouched.
pub fn strip_reasoning(text: &str) -> String {
    REASONING_BLOCK.replace_all(text, "").trim().to_string()
}
