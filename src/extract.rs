use std::sync::LazyLock;

use regex::Regex;

/// Longest answer shown in the transcript, in characters
pub const MAX_ANSWER_CHARS: usize = 8000;

pub const TRUNCATION_MARKER: &str = "\n\n…(truncated)";

pub const NO_ANSWER: &str = "I couldn't find an answer for that query.";

static ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<answer>(.*?)</answer>").expect("ANSWER_RE regex pattern is valid")
});

/// Pull the user-facing answer out of the agent's raw output.
///
/// Only the first `<answer>` block counts. Without one the whole output is
/// used. The result is capped at [`MAX_ANSWER_CHARS`] and never empty.
pub fn extract_answer(raw: &str) -> String {
    let answer = match ANSWER_RE.captures(raw).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => raw.trim(),
    };

    if answer.is_empty() {
        return NO_ANSWER.to_string();
    }

    match answer.char_indices().nth(MAX_ANSWER_CHARS) {
        Some((cut, _)) => format!("{}{}", &answer[..cut], TRUNCATION_MARKER),
        None => answer.to_string(),
    }
}
