//! Interactive navigation engine.
//!
//! [`Navigator`] is a reducer: it receives one [`Event`] at a time and answers
//! with at most one [`Command`] the host must carry out. The host feeds the
//! outcome back as a new event (for example `LoadDir` is answered with
//! `DirLoaded`), which keeps the engine free of I/O and terminal concerns.

mod navigator;
mod window;

pub use navigator::Navigator;
pub use window::Frame;

use crate::tree::NodeId;

/// User intents, decoupled from concrete keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Cursor one row up.
    Up,
    /// Cursor one row down.
    Down,
    /// One page up.
    PageUp,
    /// One page down.
    PageDown,
    /// First row.
    First,
    /// Last row.
    Last,
    /// Enter a directory or view a file.
    Open,
    /// Leave the current directory.
    Back,
    /// Flip selection of the row under the cursor.
    ToggleSelect,
    /// Write the selection to disk.
    Extract,
    /// Leave the program.
    Quit,
}

impl Action {
    /// Every action, in the order help screens list them.
    pub const ALL: [Self; 11] = [
        Self::Up,
        Self::Down,
        Self::PageUp,
        Self::PageDown,
        Self::First,
        Self::Last,
        Self::Open,
        Self::Back,
        Self::ToggleSelect,
        Self::Extract,
        Self::Quit,
    ];

    /// Stable name used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
            Self::First => "first",
            Self::Last => "last",
            Self::Open => "open",
            Self::Back => "back",
            Self::ToggleSelect => "toggle_select",
            Self::Extract => "extract",
            Self::Quit => "quit",
        }
    }

    /// Parses a configuration name. Dashes and underscores are equivalent.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().replace('-', "_").to_ascii_lowercase();
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// Input to [`Navigator::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A user action.
    Key(Action),
    /// The host finished loading a directory requested by `LoadDir`.
    DirLoaded(NodeId),
    /// The viewport now shows `height` rows.
    Resize {
        /// Visible rows for the list.
        height: usize,
    },
}

/// Work requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Load a directory and answer with [`Event::DirLoaded`].
    LoadDir(NodeId),
    /// Show a file's content.
    ViewFile(NodeId),
    /// Extract starting at the given node.
    Extract(NodeId),
    /// Stop the program.
    Quit,
}
