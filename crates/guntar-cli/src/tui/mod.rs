//! Full-screen archive browser.

mod keymap;
mod pager;
mod render;
mod shell;

pub use keymap::KeyMap;
pub use shell::Shell;

use std::io;

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use guntar_core::browse::Action;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use shell::ShellEvent;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode, alternate screen, mouse capture.
fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn translate(event: &Event, keys: &KeyMap) -> Option<ShellEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            keys.lookup(key).map(ShellEvent::Key)
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(ShellEvent::Key(Action::Up)),
            MouseEventKind::ScrollDown => Some(ShellEvent::Key(Action::Down)),
            _ => None,
        },
        Event::Resize(_, rows) => Some(ShellEvent::Resize { rows: *rows }),
        _ => None,
    }
}

/// Runs the browser until the user quits or extraction fails. Returns the
/// shell so the caller can report how the session ended.
pub fn run(mut shell: Shell, keys: &KeyMap) -> Result<Shell> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut shell, keys);
    restore_terminal(&mut terminal)?;
    result.map(|()| shell)
}

fn event_loop(terminal: &mut Term, shell: &mut Shell, keys: &KeyMap) -> Result<()> {
    let rows = terminal.size()?.height;
    shell.handle(ShellEvent::Resize { rows });

    while !shell.is_quitting() {
        terminal.draw(|frame| render::ui(frame, shell, keys))?;

        let event = event::read()?;
        if let Some(event) = translate(&event, keys) {
            shell.handle(event);
        }
    }

    tracing::debug!("browser closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseEvent;

    #[test]
    fn test_translate() {
        let keys = KeyMap::default();

        let key = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(translate(&key, &keys), Some(ShellEvent::Key(Action::Quit)));

        let wheel = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(&wheel, &keys), Some(ShellEvent::Key(Action::Down)));

        assert_eq!(
            translate(&Event::Resize(80, 30), &keys),
            Some(ShellEvent::Resize { rows: 30 })
        );
        assert_eq!(translate(&Event::FocusGained, &keys), None);
    }
}
