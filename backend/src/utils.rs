use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Tried in order; the first capture wins.
    static ref VIDEO_ID_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([^&\n?#]+)"
        )
        .expect("valid video id pattern"),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").expect("valid video id pattern"),
    ];
}

/// Resolve a YouTube video id from a watch, short-link, embed or `/v/` URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Keep at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Like [`truncate_chars`], but marks the cut with `...`.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let truncated = truncate_chars(text, max_chars);
    if truncated.len() < text.len() {
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

/// Byte ranges of the top-level `{...}` spans in free-form text.
///
/// Braces are matched with nesting, and braces inside JSON string literals are
/// ignored. A `{` that never closes is skipped and the scan resumes right after it,
/// so stray braces in prose do not hide a later object.
pub fn json_object_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut from = 0usize;

    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;
        match balanced_object_len(&text[start..]) {
            Some(len) => {
                spans.push((start, start + len));
                from = start + len;
            }
            None => from = start + 1,
        }
    }

    spans
}

/// Length of the balanced object at the start of `text`, which begins with `{`.
fn balanced_object_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// `AKIA***` style preview of a credential, never more than four characters.
pub fn credential_preview(secret: &str) -> String {
    format!("{}***", truncate_chars(secret, 4))
}
