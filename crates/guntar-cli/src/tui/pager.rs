//! Scrollable view of one file's content.

use std::fmt::Write;

use guntar_core::browse::Action;

const TAB_WIDTH: usize = 4;
const HEX_WIDTH: usize = 16;

/// File viewer state. Text is shown as-is; content holding a NUL byte is
/// shown as a hex dump.
#[derive(Debug, Default)]
pub struct Pager {
    title: String,
    lines: Vec<String>,
    offset: usize,
    height: usize,
    binary: bool,
}

impl Pager {
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            ..Self::default()
        }
    }

    /// Replaces the content and scrolls to the top.
    pub fn load(&mut self, title: &str, data: &[u8]) {
        self.title = title.to_string();
        self.binary = data.contains(&0);
        self.lines = if self.binary {
            hex_dump(data)
        } else {
            text_lines(data)
        };
        self.offset = 0;
        tracing::debug!(file = title, lines = self.lines.len(), binary = self.binary, "pager loaded");
    }

    /// Applies a movement action. Returns `false` for actions the pager does
    /// not handle.
    pub fn scroll(&mut self, action: Action) -> bool {
        let max = self.max_offset();
        self.offset = match action {
            Action::Up => self.offset.saturating_sub(1),
            Action::Down => (self.offset + 1).min(max),
            Action::PageUp => self.offset.saturating_sub(self.height),
            Action::PageDown => (self.offset + self.height).min(max),
            Action::First => 0,
            Action::Last => max,
            _ => return false,
        };
        true
    }

    pub fn resize(&mut self, height: usize) {
        self.height = height.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    /// Lines currently on screen.
    pub fn visible(&self) -> &[String] {
        let end = (self.offset + self.height).min(self.lines.len());
        &self.lines[self.offset..end]
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn is_binary(&self) -> bool {
        self.binary
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

fn text_lines(data: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(data)
        .lines()
        .map(|line| {
            let mut out = String::with_capacity(line.len());
            let mut column = 0;
            for c in line.chars() {
                if c == '\t' {
                    let pad = TAB_WIDTH - column % TAB_WIDTH;
                    out.extend(std::iter::repeat_n(' ', pad));
                    column += pad;
                } else {
                    out.push(if c.is_control() { '.' } else { c });
                    column += 1;
                }
            }
            out
        })
        .collect()
}

/// `hexdump -C` style rows: offset, 16 bytes, printable ASCII.
fn hex_dump(data: &[u8]) -> Vec<String> {
    data.chunks(HEX_WIDTH)
        .enumerate()
        .map(|(row, chunk)| {
            let mut line = format!("{:08x}  ", row * HEX_WIDTH);
            for i in 0..HEX_WIDTH {
                match chunk.get(i) {
                    Some(b) => {
                        let _ = write!(line, "{b:02x} ");
                    }
                    None => line.push_str("   "),
                }
                if i == HEX_WIDTH / 2 - 1 {
                    line.push(' ');
                }
            }
            line.push_str(" |");
            line.extend(chunk.iter().map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    char::from(b)
                } else {
                    '.'
                }
            }));
            line.push('|');
            line
        })
        .collect()
}
