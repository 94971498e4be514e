//! Helpers for arranging styled text blocks.
//!
//! A block is a `Text`: a stack of lines, each as wide as its content.
//! Widths are display columns as measured by ratatui (unicode-width).

use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

/// Pad every line of `text` so it spans at least `width` columns.
///
/// Lines already wider than `width` overflow untouched. An empty text still
/// yields one (blank) line so the block reserves its columns.
pub fn place_horizontal(text: Text<'static>, width: u16, alignment: Alignment) -> Text<'static> {
    let block_width = text.width().max(usize::from(width));
    let base = text.style;

    let mut lines: Vec<Line<'static>> = text
        .lines
        .into_iter()
        .map(|line| pad_line(with_base_style(line, base), block_width, alignment))
        .collect();

    if lines.is_empty() {
        lines.push(pad_line(Line::default(), block_width, alignment));
    }

    Text::from(lines)
}

/// Lay blocks out left to right, top-aligned.
///
/// Shorter blocks are padded with blank lines of their own width so the
/// columns to their right stay in place.
pub fn join_horizontal(blocks: Vec<Text<'static>>) -> Text<'static> {
    let height = blocks.iter().map(|b| b.lines.len()).max().unwrap_or(0);
    let widths: Vec<usize> = blocks.iter().map(Text::width).collect();

    let mut columns: Vec<_> = blocks
        .into_iter()
        .map(|block| {
            let base = block.style;
            block
                .lines
                .into_iter()
                .map(move |line| with_base_style(line, base))
        })
        .collect();

    let mut lines = Vec::with_capacity(height);
    for _ in 0..height {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (column, &width) in columns.iter_mut().zip(&widths) {
            match column.next() {
                Some(line) => {
                    let line = pad_line(line, width, Alignment::Left);
                    let line_style = line.style;
                    spans.extend(line.spans.into_iter().map(|mut span| {
                        span.style = line_style.patch(span.style);
                        span
                    }));
                }
                None if width > 0 => spans.push(Span::raw(" ".repeat(width))),
                None => {}
            }
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

/// Stack blocks top to bottom.
pub fn join_vertical(blocks: Vec<Text<'static>>) -> Text<'static> {
    let lines = blocks
        .into_iter()
        .flat_map(|block| {
            let base = block.style;
            block
                .lines
                .into_iter()
                .map(move |line| with_base_style(line, base))
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

/// Whether a block has nothing visible to contribute.
pub fn is_blank(text: &Text<'_>) -> bool {
    text.width() == 0
}

fn with_base_style(mut line: Line<'static>, base: Style) -> Line<'static> {
    line.style = base.patch(line.style);
    line.alignment = None;
    line
}

fn pad_line(mut line: Line<'static>, width: usize, alignment: Alignment) -> Line<'static> {
    let content_width = line.width();
    if content_width >= width {
        return line;
    }

    let gap = width - content_width;
    let (left, right) = match alignment {
        Alignment::Left => (0, gap),
        Alignment::Right => (gap, 0),
        Alignment::Center => (gap / 2, gap - gap / 2),
    };

    let mut spans = Vec::with_capacity(line.spans.len() + 2);
    if left > 0 {
        spans.push(Span::raw(" ".repeat(left)));
    }
    spans.append(&mut line.spans);
    if right > 0 {
        spans.push(Span::raw(" ".repeat(right)));
    }
    line.spans = spans;
    line
}
