//! Wrapping helpers and dimensions shared by the text areas and the
//! delimiter between them.

/// Focus bar (1) + gap (1) in front of every line
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;
/// Blank rows above and below the text
pub(crate) const VERTICAL_MARGIN: u16 = 1;
/// Rows of the main screen not given to text: the button row above, the
/// translate row below, and the two margins.
const MAIN_CHROME_ROWS: u16 = 4;
const MIN_VISIBLE_LINES: u16 = 3;

/// Stand-in for the cursor while wrapping. A private-use code point; the
/// text area strips it from typed and pasted input.
pub(super) const CURSOR_MARK: char = '\u{E000}';

pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(inner_width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Text columns left after the focus bar. 0 if the cell is too narrow.
pub(super) fn inner_width(cell_width: u16) -> u16 {
    cell_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrap `text` into owned display lines.
///
/// A trailing newline always yields an empty last line so the cursor has
/// somewhere to sit after Enter.
pub(super) fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Text rows available to each pane for a content area `content_height` tall.
pub(crate) fn visible_lines(content_height: u16) -> u16 {
    content_height
        .saturating_sub(MAIN_CHROME_ROWS)
        .max(MIN_VISIBLE_LINES)
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
