//! Markdown code-fence removal.

/// Language-tagged fence openers that are removed along with bare fences.
const FENCE_OPENERS: &[&str] = &["```python3", "```python", "```py"];

/// Remove Markdown code-fence markers and surrounding whitespace.
///
/// Generated replies frequently wrap the program in a fenced block. Every
/// fence marker is dropped wherever it appears, so the result is plain
/// source text.
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = text.to_string();
    for opener in FENCE_OPENERS {
        cleaned = cleaned.replace(opener, "");
    }
    cleaned.replace("```", "").trim().to_string()
}
