// Content preview generation
//
// Produces a bounded, human-scannable snippet of a node's source slice.
// Every mode runs the raw bytes through lossy UTF-8 conversion first, so an
// invalid sequence degrades to replacement characters instead of failing.
// Truncation counts characters, not bytes, to stay on valid boundaries.

use crate::policy::{PreviewLevel, DEFAULT_PREVIEW_BUDGET};

const SMART_WHOLE_LIMIT: usize = 50;
const SMART_DISPLAY_WIDTH: usize = 80;
const SMART_CUT: usize = 77;
const COMPACT_BUDGET: usize = 60;

/// Render a preview of `slice` under the given mode. `budget` applies to
/// `PreviewLevel::Custom` only; zero falls back to the default budget.
pub fn generate(slice: &[u8], mode: PreviewLevel, budget: usize) -> String {
    if mode == PreviewLevel::None {
        return String::new();
    }
    let text = String::from_utf8_lossy(slice);
    match mode {
        PreviewLevel::None => String::new(),
        PreviewLevel::Full => text.into_owned(),
        PreviewLevel::Line => first_line(&text).to_string(),
        PreviewLevel::Smart => smart(&text),
        PreviewLevel::Compact => compact(&text),
        PreviewLevel::Custom => {
            let effective = if budget == 0 { DEFAULT_PREVIEW_BUDGET } else { budget };
            truncate_chars(&text, effective)
        }
    }
}

fn first_line(text: &str) -> &str {
    match text.find('\n') {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Adaptive preview: short nodes come through whole, long single-line nodes
/// are cut at display width, multi-line nodes show their first line.
fn smart(text: &str) -> String {
    if text.chars().count() <= SMART_WHOLE_LIMIT {
        return text.to_string();
    }
    let line = first_line(text);
    if line.chars().count() > SMART_DISPLAY_WIDTH {
        let mut out = truncate_chars(line, SMART_CUT);
        out.push_str("...");
        out
    } else {
        line.to_string()
    }
}

/// Fixed 60-character budget. Prefers a whitespace boundary past the
/// midpoint of the window so the cut lands between tokens when possible.
fn compact(text: &str) -> String {
    if text.chars().count() <= COMPACT_BUDGET {
        return text.to_string();
    }
    let window: String = text.chars().take(COMPACT_BUDGET).collect();
    let cut = window
        .char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .last()
        .filter(|&i| char_position(&window, i) > COMPACT_BUDGET / 2);
    let mut out = match cut {
        Some(byte_idx) => window[..byte_idx].to_string(),
        None => window,
    };
    out.push_str("...");
    out
}

fn char_position(s: &str, byte_idx: usize) -> usize {
    s[..byte_idx].chars().count()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
