//! Interactive session state: routes actions to the browser or the pager
//! and carries out the commands they return.

use std::path::Path;
use std::path::PathBuf;

use guntar_core::ArchiveTree;
use guntar_core::DEFAULT_EXTRACT_DIR;
use guntar_core::ExtractOptions;
use guntar_core::NodeId;
use guntar_core::NoopProgress;
use guntar_core::browse::Action;
use guntar_core::browse::Command;
use guntar_core::browse::Event;
use guntar_core::browse::Navigator;
use guntar_core::extract;
use guntar_core::selection::Selection;

use super::pager::Pager;
use crate::error::convert_extraction_error;
use crate::output::format_size;

/// Rows taken by the header, the list borders and the footer.
pub const CHROME: u16 = 4;

/// Which panel receives actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Lister,
    Pager,
}

/// Input delivered by the terminal loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    Key(Action),
    Resize { rows: u16 },
}

pub struct Shell {
    archive: PathBuf,
    tree: ArchiveTree<Selection>,
    nav: Navigator,
    pager: Pager,
    view: View,
    dest: Option<PathBuf>,
    status: Option<String>,
    error: Option<anyhow::Error>,
    quitting: bool,
}

impl Shell {
    pub fn new(
        archive: &Path,
        tree: ArchiveTree<Selection>,
        dest: Option<PathBuf>,
        rows: u16,
    ) -> Self {
        let height = body_height(rows);
        Self {
            archive: archive.to_path_buf(),
            nav: Navigator::new(tree.root(), height),
            tree,
            pager: Pager::new(height),
            view: View::Lister,
            dest,
            status: None,
            error: None,
            quitting: false,
        }
    }

    pub fn handle(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Resize { rows } => {
                let height = body_height(rows);
                self.nav.update(&mut self.tree, Event::Resize { height });
                self.pager.resize(height);
            }
            ShellEvent::Key(action) => match self.view {
                View::Pager => {
                    self.status = None;
                    match action {
                        Action::Back => self.view = View::Lister,
                        Action::Quit => self.quitting = true,
                        other => {
                            if !self.pager.scroll(other) {
                                tracing::trace!(?other, "ignored in pager");
                                self.status = Some("Not available while viewing a file".to_string());
                            }
                        }
                    }
                }
                View::Lister => {
                    self.status = None;
                    let command = self.nav.update(&mut self.tree, Event::Key(action));
                    self.follow(command);
                }
            },
        }
    }

    fn follow(&mut self, mut next: Option<Command>) {
        while let Some(command) = next.take() {
            tracing::trace!(?command, "command");
            next = match command {
                Command::LoadDir(id) => self.nav.update(&mut self.tree, Event::DirLoaded(id)),
                Command::ViewFile(id) => {
                    let node = &self.tree[id];
                    self.pager.load(node.path().as_str(), node.data());
                    self.view = View::Pager;
                    None
                }
                Command::Extract(start) => {
                    self.extract(start);
                    None
                }
                Command::Quit => {
                    self.quitting = true;
                    None
                }
            };
        }
    }

    fn extract(&mut self, start: NodeId) {
        let tree = &self.tree;
        let nav = &self.nav;
        let result = extract(
            tree,
            start,
            self.dest.as_deref(),
            |id| nav.should_skip(tree, id),
            &ExtractOptions::default(),
            &mut NoopProgress,
        );

        match result {
            Ok(report) => {
                let dest = self
                    .dest
                    .as_deref()
                    .unwrap_or_else(|| Path::new(DEFAULT_EXTRACT_DIR));
                self.status = Some(format!(
                    "Extracted {} files ({}) to {}",
                    report.files_extracted,
                    format_size(report.bytes_written),
                    dest.display()
                ));
            }
            Err(err) => {
                tracing::error!(error = %err, "extraction failed");
                self.error = Some(convert_extraction_error(err, &self.archive));
                self.quitting = true;
            }
        }
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    pub const fn tree(&self) -> &ArchiveTree<Selection> {
        &self.tree
    }

    pub const fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub const fn pager(&self) -> &Pager {
        &self.pager
    }

    pub const fn view(&self) -> View {
        self.view
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub const fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Consumes the shell, returning the error that ended the session.
    pub fn into_error(self) -> Option<anyhow::Error> {
        self.error
    }
}

fn body_height(rows: u16) -> usize {
    usize::from(rows.saturating_sub(CHROME)).max(1)
}
