//! Contextual snippet extraction for search results
//!
//! A snippet is a bounded excerpt of a day's text surrounding a match,
//! aligned to word boundaries and marked with ellipses where text was cut
//! off. Offsets are counted in characters, not bytes.

/// Number of characters of context a snippet aims for.
pub const TEXT_RESULT_LENGTH: usize = 50;

/// Sentinel opening a highlighted match inside a snippet.
pub const START_BOLD: &str = "STARTBOLD";

/// Sentinel closing a highlighted match inside a snippet.
pub const END_BOLD: &str = "ENDBOLD";

/// Extract a word-aligned excerpt around the character range `start..end`.
///
/// The excerpt window extends half of [`TEXT_RESULT_LENGTH`] to each side
/// of the range. A window edge that does not coincide with the text's own
/// edge is snapped to a space: forward to the first space on the left
/// side, backward to the last space on the right side, falling back to
/// the raw window edge when the window contains no space. `"... "` and
/// `" ..."` mark a cut-off start and end, and newlines are flattened to
/// spaces.
///
/// When `found_text` is given and non-empty, every literal occurrence of
/// it in the excerpt is wrapped in [`START_BOLD`]/[`END_BOLD`]. The
/// replacement is plain substring substitution: text that already
/// contains the sentinel words, or repeats the match verbatim, is
/// highlighted as-is.
pub fn text_with_dots(text: &str, start: usize, end: usize, found_text: Option<&str>) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let start = start.min(len);
    let end = end.min(len);

    let half = TEXT_RESULT_LENGTH / 2;
    let left_window = start.saturating_sub(half);
    let right_window = (end.saturating_add(half)).min(len);

    let snip_start = if left_window == 0 {
        0
    } else {
        chars[left_window..start]
            .iter()
            .position(|&c| c == ' ')
            .map(|offset| left_window + offset)
            .unwrap_or(left_window)
    };

    let snip_end = if right_window == len {
        len
    } else {
        chars[end..right_window]
            .iter()
            .rposition(|&c| c == ' ')
            .map(|offset| end + offset)
            .unwrap_or(right_window)
    };

    let mut result = String::new();
    if snip_start > 0 {
        result.push_str("... ");
    }
    result.extend(&chars[snip_start..snip_end]);
    if snip_end < len {
        result.push_str(" ...");
    }

    let mut result = result.replace('\n', " ");

    if let Some(found) = found_text {
        if !found.is_empty() {
            result = result.replace(found, &format!("{}{}{}", START_BOLD, found, END_BOLD));
        }
    }

    result
}
