/// Word-wrapped text plus the (line, col) of every char boundary, so an
/// editing cursor can be mapped onto the wrapped layout.
#[derive(Debug, Clone)]
pub struct WrappedText {
    pub rendered: String,
    pub positions: Vec<(u16, u16)>,
    pub line_count: u16,
}

impl WrappedText {
    pub fn cursor_line_col(&self, cursor: usize) -> (u16, u16) {
        let index = cursor.min(self.positions.len().saturating_sub(1));
        self.positions.get(index).copied().unwrap_or((0, 0))
    }
}

struct LayoutCursor {
    rendered: String,
    line: u16,
    col: u16,
}

impl LayoutCursor {
    fn break_line(&mut self) {
        self.rendered.push('\n');
        self.line = self.line.saturating_add(1);
        self.col = 0;
    }
}

pub fn wrap_word_with_positions(text: &str, width: u16) -> WrappedText {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut cursor = LayoutCursor {
        rendered: String::with_capacity(text.len()),
        line: 0,
        col: 0,
    };
    let mut positions = Vec::with_capacity(chars.len() + 1);
    positions.push((0, 0));

    for (idx, &ch) in chars.iter().enumerate() {
        if ch == '\n' {
            cursor.break_line();
            positions.push((cursor.line, cursor.col));
            continue;
        }
        if cursor.col >= width || starts_overflowing_word(&chars, idx, cursor.col, width) {
            cursor.break_line();
        }
        cursor.rendered.push(ch);
        cursor.col = cursor.col.saturating_add(1);
        if cursor.col >= width {
            cursor.break_line();
        }
        positions.push((cursor.line, cursor.col));
    }

    WrappedText {
        line_count: cursor.line.saturating_add(1),
        rendered: cursor.rendered,
        positions,
    }
}

/// Wraps `text` and returns its display lines with trailing blank lines
/// trimmed. Always yields at least one line.
pub fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let rendered = wrap_word_with_positions(text, width).rendered;
    let mut lines: Vec<String> = rendered.split('\n').map(str::to_string).collect();
    while lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

fn starts_overflowing_word(chars: &[char], idx: usize, col: u16, width: u16) -> bool {
    if col == 0 || chars[idx].is_whitespace() {
        return false;
    }
    if idx > 0 && !chars[idx - 1].is_whitespace() {
        return false;
    }
    let word_len = chars[idx..]
        .iter()
        .take_while(|c| !c.is_whitespace())
        .count();
    let word_len = u16::try_from(word_len).unwrap_or(u16::MAX);
    word_len <= width && col.saturating_add(word_len) > width
}
