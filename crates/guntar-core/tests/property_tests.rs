//! Property-based tests for tree construction and navigation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use guntar_core::EntryPath;
use guntar_core::browse::Frame;
use guntar_core::scan_plain;
use guntar_core::test_utils::TarTestBuilder;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Move {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

fn any_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        Just(Move::Up),
        Just(Move::Down),
        Just(Move::PageUp),
        Just(Move::PageDown),
        Just(Move::First),
        Just(Move::Last),
    ]
}

/// Raw entry names built from plain, `.`, `..` and empty segments.
fn raw_name() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => "[a-c]{1,2}",
            1 => Just(".".to_string()),
            1 => Just("..".to_string()),
            1 => Just(String::new()),
        ],
        1..5,
    )
    .prop_map(|segments| segments.join("/"))
    .prop_filter("fits in a v7 name field", |name| name.len() <= 100)
}

proptest! {
    /// Cursor and window stay consistent under any move sequence.
    #[test]
    fn prop_window_invariants(
        len in 1usize..60,
        height in 1usize..15,
        moves in prop::collection::vec(any_move(), 0..80),
    ) {
        let mut frame = Frame::top(height);
        frame.clamp(len, height);
        for m in moves {
            match m {
                Move::Up => frame.up(len, height),
                Move::Down => frame.down(len, height),
                Move::PageUp => frame.page_up(len, height),
                Move::PageDown => frame.page_down(len, height),
                Move::First => frame.first(len, height),
                Move::Last => frame.last(len, height),
            }
            prop_assert!(frame.cursor <= len - 1);
            prop_assert!(frame.low <= frame.cursor && frame.cursor <= frame.high);
            prop_assert_eq!(frame.high - frame.low + 1, height);
            if height <= len {
                prop_assert!(frame.high <= len - 1);
            }
        }
    }

    /// Resizing keeps the cursor where it was.
    #[test]
    fn prop_resize_keeps_cursor(
        len in 1usize..60,
        height in 1usize..15,
        new_height in 1usize..15,
        downs in 0usize..60,
    ) {
        let mut frame = Frame::top(height);
        for _ in 0..downs {
            frame.down(len, height);
        }
        let cursor = frame.cursor;
        frame.clamp(len, new_height);
        prop_assert_eq!(frame.cursor, cursor);
        prop_assert!(frame.low <= cursor && cursor <= frame.high);
        prop_assert_eq!(frame.high - frame.low + 1, new_height);
    }

    /// Normalized paths are relative and free of `.` and `..` segments.
    #[test]
    fn prop_normalized_paths_are_confined(raw in raw_name()) {
        let path = EntryPath::normalize(&raw);
        if !path.is_root() {
            prop_assert!(!path.as_str().starts_with('/'));
            prop_assert!(path.as_str().split('/').all(|s| !s.is_empty() && s != "." && s != ".."));
        }
    }

    /// Every node hangs off the directory at its parent path that was
    /// already in the tree when the node was read, or off the root.
    #[test]
    fn prop_parent_is_parent_path_or_root(
        names in prop::collection::vec((raw_name(), any::<bool>()), 0..25),
    ) {
        let mut builder = TarTestBuilder::new();
        for (name, is_dir) in &names {
            builder = if *is_dir {
                builder.add_raw_directory(name)
            } else {
                builder.add_raw(name, b"x")
            };
        }
        let (tree, _) = scan_plain(builder.build().as_slice()).unwrap();

        let roots = tree.iter().filter(|(_, n)| n.is_root()).count();
        prop_assert_eq!(roots, 1);

        for (id, node) in tree.iter().skip(1) {
            let parent = node.parent().unwrap();
            let expected = tree
                .find(&node.path().parent())
                .filter(|&p| p < id && tree[p].is_dir())
                .unwrap_or(tree.root());
            prop_assert_eq!(parent, expected);
            prop_assert!(tree[parent].children().contains(&id));
        }
    }
}
