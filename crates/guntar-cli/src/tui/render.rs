//! Drawing the shell with ratatui.

use guntar_core::browse::Action;
use guntar_core::selection;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;

use super::keymap::KeyMap;
use super::shell::Shell;
use super::shell::View;
use crate::output::format_size;

pub fn ui(frame: &mut ratatui::Frame<'_>, shell: &Shell, keys: &KeyMap) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], shell);
    match shell.view() {
        View::Lister => render_lister(frame, chunks[1], shell),
        View::Pager => render_pager(frame, chunks[1], shell),
    }
    render_footer(frame, chunks[2], shell, keys);
}

fn render_header(frame: &mut ratatui::Frame<'_>, area: Rect, shell: &Shell) {
    let tree = shell.tree();
    let nav = shell.navigator();
    let selected = selection::selected_count(tree, tree.root());

    let line = Line::from(vec![
        Span::styled(
            "guntar ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(shell.archive().display().to_string()),
        Span::styled(
            format!("  /{}", display_dir(tree[nav.current()].path().as_str())),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  {selected} selected"),
            Style::default().fg(Color::Magenta),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn display_dir(path: &str) -> &str {
    if path == "." { "" } else { path }
}

fn render_lister(frame: &mut ratatui::Frame<'_>, area: Rect, shell: &Shell) {
    let tree = shell.tree();
    let nav = shell.navigator();
    let current = &tree[nav.current()];

    let lines: Vec<Line> = if current.child_count() == 0 {
        vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        nav.visible(tree)
            .map(|(row, id)| {
                let node = &tree[id];
                let glyph = selection::resolve(tree, id).glyph();
                let mut name = node.name().to_string();
                if node.is_dir() {
                    name.push('/');
                }
                if let Some(target) = &node.meta().link_target {
                    name.push_str(" -> ");
                    name.push_str(target);
                }
                let size = if node.is_dir() {
                    String::new()
                } else {
                    format_size(node.meta().size)
                };

                let mut style = if node.is_dir() {
                    Style::default().fg(Color::LightBlue)
                } else {
                    Style::default()
                };
                if row == nav.cursor() {
                    style = style.add_modifier(Modifier::REVERSED);
                }

                Line::from(Span::styled(
                    format!("{glyph} {} {name:<40} {size:>10}", node.meta().mode_string()),
                    style,
                ))
            })
            .collect()
    };

    let title = format!(" {}/{} ", nav.cursor() + 1, current.child_count());
    let block = Block::default()
        .title(title)
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(Color::Gray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_pager(frame: &mut ratatui::Frame<'_>, area: Rect, shell: &Shell) {
    let pager = shell.pager();
    let lines: Vec<Line> = pager
        .visible()
        .iter()
        .map(|l| Line::raw(l.as_str()))
        .collect();

    let kind = if pager.is_binary() { "hex" } else { "text" };
    let title = format!(
        " {} ({kind}, {}/{}) ",
        pager.title(),
        (pager.offset() + 1).min(pager.line_count()),
        pager.line_count()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(Color::Gray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut ratatui::Frame<'_>, area: Rect, shell: &Shell, keys: &KeyMap) {
    let line = if let Some(status) = shell.status() {
        Line::from(Span::styled(status, Style::default().fg(Color::Green)))
    } else {
        let actions: &[(Action, &str)] = match shell.view() {
            View::Lister => &[
                (Action::Open, "open"),
                (Action::Back, "back"),
                (Action::ToggleSelect, "select"),
                (Action::Extract, "extract"),
                (Action::Quit, "quit"),
            ],
            View::Pager => &[
                (Action::PageDown, "page"),
                (Action::Back, "back"),
                (Action::Quit, "quit"),
            ],
        };
        let help = actions
            .iter()
            .map(|(action, label)| format!("{} {label}", keys.hint(*action)))
            .collect::<Vec<_>>()
            .join("  ");
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tui::shell::ShellEvent;
    use guntar_core::scan;
    use guntar_core::selection::Selection;
    use guntar_core::test_utils::TarTestBuilder;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::convert::Infallible;
    use std::path::Path;

    fn screen(shell: &Shell) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|frame| ui(frame, shell, &KeyMap::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(80)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn shell() -> Shell {
        let data = TarTestBuilder::new()
            .add_directory("docs/")
            .add_file("docs/readme.txt", b"hello\nworld")
            .add_file("top.txt", b"top")
            .build();
        let (tree, _) = scan(data.as_slice(), |_| Ok::<_, Infallible>(Selection::default())).unwrap();
        Shell::new(Path::new("test.tar"), tree, None, 12)
    }

    #[test]
    fn test_lister_screen() {
        let shell = shell();
        let text = screen(&shell);
        assert!(text.contains("guntar test.tar"));
        assert!(text.contains("[ ] drwxr-xr-x docs/"));
        assert!(text.contains("top.txt"));
        assert!(text.contains("3 B"));
        assert!(text.contains("0 selected"));
    }

    #[test]
    fn test_pager_screen() {
        let mut shell = shell();
        shell.handle(ShellEvent::Key(Action::Open));
        shell.handle(ShellEvent::Key(Action::Open));
        let text = screen(&shell);
        assert!(text.contains("docs/readme.txt (text, 1/2)"));
        assert!(text.contains("hello"));
        assert!(text.contains("world"));
    }

    #[test]
    fn test_empty_directory_screen() {
        let data = TarTestBuilder::new().add_directory("empty/").build();
        let (tree, _) = scan(data.as_slice(), |_| Ok::<_, Infallible>(Selection::default())).unwrap();
        let mut shell = Shell::new(Path::new("e.tar"), tree, None, 12);
        shell.handle(ShellEvent::Key(Action::Open));
        assert!(screen(&shell).contains("(empty)"));
    }
}
