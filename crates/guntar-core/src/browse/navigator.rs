use super::Action;
use super::Command;
use super::Event;
use super::Frame;
use crate::selection;
use crate::selection::Marks;
use crate::selection::Selectable;
use crate::tree::ArchiveTree;
use crate::tree::NodeId;

/// List browser over the children of one directory at a time.
///
/// # Examples
///
/// ```
/// use guntar_core::browse::{Action, Command, Event, Navigator};
/// use guntar_core::scan;
/// use guntar_core::selection::Selection;
/// use guntar_core::test_utils::TarTestBuilder;
///
/// let data = TarTestBuilder::new()
///     .add_directory("docs/")
///     .add_file("docs/readme.txt", b"hi")
///     .build();
/// let (mut tree, _) = scan(data.as_slice(), |_| Ok::<_, String>(Selection::default()))?;
///
/// let mut nav = Navigator::new(tree.root(), 10);
/// let cmd = nav.update(&mut tree, Event::Key(Action::Open));
/// let docs = tree.find_str("docs").unwrap();
/// assert_eq!(cmd, Some(Command::LoadDir(docs)));
///
/// nav.update(&mut tree, Event::DirLoaded(docs));
/// assert_eq!(nav.current(), docs);
/// # Ok::<(), guntar_core::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Navigator {
    current: NodeId,
    frame: Frame,
    height: usize,
    history: Vec<Frame>,
    marks: Marks,
}

impl Navigator {
    /// Starts at `root` with the cursor on the first row and a window of
    /// `height` rows (at least one).
    #[must_use]
    pub fn new(root: NodeId, height: usize) -> Self {
        let height = height.max(1);
        Self {
            current: root,
            frame: Frame::top(height),
            height,
            history: Vec::new(),
            marks: Marks::new(),
        }
    }

    /// Applies one event and returns the follow-up work, if any.
    pub fn update<T: Selectable>(
        &mut self,
        tree: &mut ArchiveTree<T>,
        event: Event,
    ) -> Option<Command> {
        match event {
            Event::Key(action) => self.on_action(tree, action),
            Event::DirLoaded(id) => {
                self.current = id;
                self.frame.clamp(tree[id].child_count(), self.height);
                tracing::debug!(path = %tree[id].path(), depth = self.history.len(), "directory loaded");
                None
            }
            Event::Resize { height } => {
                self.height = height.max(1);
                self.frame.clamp(tree[self.current].child_count(), self.height);
                None
            }
        }
    }

    fn on_action<T: Selectable>(
        &mut self,
        tree: &mut ArchiveTree<T>,
        action: Action,
    ) -> Option<Command> {
        let len = tree[self.current].child_count();
        let h = self.height;

        match action {
            Action::Extract => return Some(Command::Extract(tree.root())),
            Action::Quit => return Some(Command::Quit),
            Action::Back => return Some(self.back(tree)),
            _ if len == 0 => return None,
            Action::Up => self.frame.up(len, h),
            Action::Down => self.frame.down(len, h),
            Action::PageUp => self.frame.page_up(len, h),
            Action::PageDown => self.frame.page_down(len, h),
            Action::First => self.frame.first(len, h),
            Action::Last => self.frame.last(len, h),
            Action::Open => return self.open(tree),
            Action::ToggleSelect => {
                if let Some(id) = self.selected(tree) {
                    selection::toggle(tree, id);
                    self.marks.touch();
                }
            }
        }
        None
    }

    fn open<T>(&mut self, tree: &ArchiveTree<T>) -> Option<Command> {
        let id = self.selected(tree)?;
        let node = &tree[id];
        if node.is_dir() {
            self.history.push(self.frame);
            self.frame = Frame::top(self.height);
            Some(Command::LoadDir(id))
        } else if node.is_file() {
            Some(Command::ViewFile(id))
        } else {
            None
        }
    }

    fn back<T>(&mut self, tree: &ArchiveTree<T>) -> Command {
        self.frame = self
            .history
            .pop()
            .unwrap_or_else(|| Frame::top(self.height));
        Command::LoadDir(tree.parent_or_self(self.current))
    }

    /// Directory whose children are listed.
    #[must_use]
    pub const fn current(&self) -> NodeId {
        self.current
    }

    /// Cursor and window.
    #[must_use]
    pub const fn frame(&self) -> Frame {
        self.frame
    }

    /// Index of the highlighted child.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.frame.cursor
    }

    /// Visible window `(low, high)`.
    #[must_use]
    pub const fn window(&self) -> (usize, usize) {
        (self.frame.low, self.frame.high)
    }

    /// Rows in the viewport.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of saved frames, equal to the depth below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Selection tracker.
    #[must_use]
    pub const fn marks(&self) -> Marks {
        self.marks
    }

    /// Child under the cursor, `None` in an empty directory.
    #[must_use]
    pub fn selected<T>(&self, tree: &ArchiveTree<T>) -> Option<NodeId> {
        tree[self.current].children().get(self.frame.cursor).copied()
    }

    /// Visible children with their row index.
    pub fn visible<'a, T>(
        &self,
        tree: &'a ArchiveTree<T>,
    ) -> impl Iterator<Item = (usize, NodeId)> + 'a {
        let children = tree[self.current].children();
        let range = self.frame.visible(children.len());
        range.clone().zip(children[range].iter().copied())
    }

    /// Extraction skip predicate derived from the current selection.
    #[must_use]
    pub fn should_skip<T: Selectable>(&self, tree: &ArchiveTree<T>, id: NodeId) -> bool {
        self.marks.should_skip(tree, id)
    }
}
