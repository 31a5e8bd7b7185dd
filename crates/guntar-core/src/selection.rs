//! Tri-state hierarchical selection over an [`ArchiveTree`].
//!
//! State is stored in each node's payload through [`Selectable`]. Files carry
//! the authoritative value; a directory's state is read through [`resolve`],
//! which aggregates its children. Writes through [`toggle`] only ever mark
//! ancestors [`Selection::Partial`], so callers must always go through
//! [`resolve`] when they need a directory's real state.

use crate::tree::ArchiveTree;
use crate::tree::NodeId;

/// Selection state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    /// Not marked.
    #[default]
    Unselected,
    /// Some, but not all, descendants are marked.
    Partial,
    /// Marked, together with every descendant.
    Selected,
}

impl Selection {
    /// Returns `true` unless the state is `Unselected`.
    #[must_use]
    pub const fn is_marked(self) -> bool {
        !matches!(self, Self::Unselected)
    }

    /// Checkbox-style glyph used by list renderers.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Unselected => "[ ]",
            Self::Partial => "[~]",
            Self::Selected => "[x]",
        }
    }
}

/// Payloads that carry a stored [`Selection`].
pub trait Selectable {
    /// Stored state.
    fn selection(&self) -> Selection;

    /// Overwrites the stored state.
    fn set_selection(&mut self, selection: Selection);
}

impl Selectable for Selection {
    fn selection(&self) -> Selection {
        *self
    }

    fn set_selection(&mut self, selection: Selection) {
        *self = selection;
    }
}

/// Resolved state of `id`.
///
/// Leaves and childless directories report their stored state. A directory
/// with children is `Selected` iff every child resolves `Selected`, `Partial`
/// iff at least one child resolves to anything but `Unselected`, and
/// `Unselected` otherwise.
#[must_use]
pub fn resolve<T: Selectable>(tree: &ArchiveTree<T>, id: NodeId) -> Selection {
    let node = &tree[id];
    if node.children().is_empty() {
        return node.payload().selection();
    }

    let mut all_selected = true;
    let mut any_marked = false;
    for &child in node.children() {
        match resolve(tree, child) {
            Selection::Selected => any_marked = true,
            Selection::Partial => {
                any_marked = true;
                all_selected = false;
            }
            Selection::Unselected => all_selected = false,
        }
        if any_marked && !all_selected {
            return Selection::Partial;
        }
    }

    if all_selected {
        Selection::Selected
    } else {
        Selection::Unselected
    }
}

/// Stores `selection` on `id` and every descendant.
pub fn set_subtree<T: Selectable>(tree: &mut ArchiveTree<T>, id: NodeId, selection: Selection) {
    let targets: Vec<NodeId> = std::iter::once(id).chain(tree.descendants(id)).collect();
    for target in targets {
        tree[target].payload_mut().set_selection(selection);
    }
}

/// Stores `Partial` on every strict ancestor of `id`.
pub fn mark_ancestors_partial<T: Selectable>(tree: &mut ArchiveTree<T>, id: NodeId) {
    let ancestors: Vec<NodeId> = tree.ancestors(id).collect();
    for ancestor in ancestors {
        tree[ancestor].payload_mut().set_selection(Selection::Partial);
    }
}

/// Flips the selection of `id` and its subtree.
///
/// The target is `Selected` when `id` currently resolves `Unselected`, and
/// `Unselected` otherwise. Returns the target state.
pub fn toggle<T: Selectable>(tree: &mut ArchiveTree<T>, id: NodeId) -> Selection {
    let target = if resolve(tree, id) == Selection::Unselected {
        Selection::Selected
    } else {
        Selection::Unselected
    };

    set_subtree(tree, id, target);
    mark_ancestors_partial(tree, id);
    tracing::trace!(path = %tree[id].path(), ?target, "selection toggled");
    target
}

/// Number of regular files below `id` (or `id` itself) that resolve
/// `Selected`.
#[must_use]
pub fn selected_count<T: Selectable>(tree: &ArchiveTree<T>, id: NodeId) -> usize {
    std::iter::once(id)
        .chain(tree.descendants(id))
        .filter(|&n| tree[n].is_file() && tree[n].payload().selection() == Selection::Selected)
        .count()
}

/// Tracks whether the user has marked anything yet.
///
/// Until the first toggle nothing is skipped, so extracting an untouched tree
/// writes everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Marks {
    touched: bool,
}

impl Marks {
    /// Creates an untouched tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { touched: false }
    }

    /// Records that a toggle happened.
    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Returns `true` once any node has been toggled.
    #[must_use]
    pub const fn is_touched(self) -> bool {
        self.touched
    }

    /// Extraction skip predicate.
    #[must_use]
    pub fn should_skip<T: Selectable>(self, tree: &ArchiveTree<T>, id: NodeId) -> bool {
        self.touched && resolve(tree, id) == Selection::Unselected
    }
}
