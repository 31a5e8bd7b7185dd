//! End-to-end tests: scan, browse, select and extract.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use guntar_core::ArchiveTree;
use guntar_core::ExtractOptions;
use guntar_core::NoopProgress;
use guntar_core::browse::Action;
use guntar_core::browse::Command;
use guntar_core::browse::Event;
use guntar_core::browse::Navigator;
use guntar_core::extract;
use guntar_core::extract_all;
use guntar_core::scan;
use guntar_core::scan_plain;
use guntar_core::selection::Selection;
use guntar_core::selection::resolve;
use guntar_core::test_utils::TarTestBuilder;
use tempfile::TempDir;

fn sample_archive() -> Vec<u8> {
    TarTestBuilder::new()
        .add_directory("test/")
        .add_file_with_mode("test/readme.txt", b"hi", 0o600)
        .add_file_with_mode("gopher.txt", b"go", 0o600)
        .build()
}

fn selection_tree(data: &[u8]) -> ArchiveTree<Selection> {
    scan(data, |_| Ok::<_, String>(Selection::Unselected))
        .unwrap()
        .0
}

/// Drives the navigator like a host: answers `LoadDir` with `DirLoaded`.
fn press(nav: &mut Navigator, tree: &mut ArchiveTree<Selection>, action: Action) -> Option<Command> {
    let mut event = Event::Key(action);
    loop {
        match nav.update(tree, event)? {
            Command::LoadDir(id) => event = Event::DirLoaded(id),
            other => return Some(other),
        }
    }
}

#[test]
fn test_list_then_extract_round_trip() {
    let data = sample_archive();
    let (tree, report) = scan_plain(data.as_slice()).unwrap();

    let paths: Vec<&str> = tree.paths().map(|p| p.as_str()).collect();
    assert_eq!(paths, vec![".", "test", "test/readme.txt", "gopher.txt"]);
    assert!(!report.has_skipped());

    let temp = TempDir::new().unwrap();
    extract_all(&tree, Some(temp.path())).unwrap();
    assert_eq!(
        std::fs::read(temp.path().join("test/readme.txt")).unwrap(),
        b"hi"
    );
    assert_eq!(std::fs::read(temp.path().join("gopher.txt")).unwrap(), b"go");
}

#[test]
fn test_scan_is_idempotent() {
    let data = TarTestBuilder::new()
        .add_directory("a/")
        .add_file("a/one", b"1")
        .add_raw("a/../b/two", b"2")
        .add_file("a/one", b"dup")
        .build();

    let (first, _) = scan_plain(data.as_slice()).unwrap();
    let (second, _) = scan_plain(data.as_slice()).unwrap();

    let dump = |tree: &ArchiveTree<()>| -> Vec<(String, Vec<u8>)> {
        tree.iter()
            .map(|(_, n)| (n.path().to_string(), n.data().to_vec()))
            .collect()
    };
    assert_eq!(dump(&first), dump(&second));
}

#[test]
fn test_untouched_selection_extracts_everything() {
    let data = sample_archive();
    let mut tree = selection_tree(&data);
    let mut nav = Navigator::new(tree.root(), 10);

    let cmd = press(&mut nav, &mut tree, Action::Extract).unwrap();
    let Command::Extract(start) = cmd else {
        panic!("expected extract command, got {cmd:?}");
    };

    let temp = TempDir::new().unwrap();
    let report = extract(
        &tree,
        start,
        Some(temp.path()),
        |id| nav.should_skip(&tree, id),
        &ExtractOptions::default(),
        &mut NoopProgress,
    )
    .unwrap();

    assert_eq!(report.files_extracted, 2);
    assert!(temp.path().join("gopher.txt").exists());
}

#[test]
fn test_selected_subset_extracts_only_selection() {
    let data = sample_archive();
    let mut tree = selection_tree(&data);
    let mut nav = Navigator::new(tree.root(), 10);

    // Enter "test", select readme, go back.
    press(&mut nav, &mut tree, Action::Open);
    press(&mut nav, &mut tree, Action::ToggleSelect);
    press(&mut nav, &mut tree, Action::Back);
    assert_eq!(nav.current(), tree.root());

    let test_dir = tree.find_str("test").unwrap();
    assert_eq!(resolve(&tree, test_dir), Selection::Selected);
    assert_eq!(resolve(&tree, tree.root()), Selection::Partial);

    let temp = TempDir::new().unwrap();
    let report = extract(
        &tree,
        tree.root(),
        Some(temp.path()),
        |id| nav.should_skip(&tree, id),
        &ExtractOptions::default(),
        &mut NoopProgress,
    )
    .unwrap();

    assert!(temp.path().join("test/readme.txt").exists());
    assert!(!temp.path().join("gopher.txt").exists());
    assert_eq!(report.files_extracted, 1);
    assert_eq!(report.files_skipped, 1);
}

#[test]
fn test_select_directory_then_deselect_one_child() {
    let data = TarTestBuilder::new()
        .add_directory("dir/")
        .add_file("dir/a", b"a")
        .add_file("dir/b", b"b")
        .build();
    let mut tree = selection_tree(&data);
    let mut nav = Navigator::new(tree.root(), 10);

    press(&mut nav, &mut tree, Action::ToggleSelect);
    let dir = tree.find_str("dir").unwrap();
    let a = tree.find_str("dir/a").unwrap();
    let b = tree.find_str("dir/b").unwrap();
    assert_eq!(resolve(&tree, a), Selection::Selected);
    assert_eq!(resolve(&tree, b), Selection::Selected);

    press(&mut nav, &mut tree, Action::Open);
    press(&mut nav, &mut tree, Action::Down);
    press(&mut nav, &mut tree, Action::ToggleSelect);

    assert_eq!(resolve(&tree, dir), Selection::Partial);
    assert_eq!(resolve(&tree, a), Selection::Selected);
    assert_eq!(resolve(&tree, b), Selection::Unselected);
}

#[test]
fn test_open_back_restores_position_across_levels() {
    let mut builder = TarTestBuilder::new();
    for i in 0..8 {
        builder = builder.add_file(&format!("f{i}"), b"x");
    }
    let data = builder
        .add_directory("outer/")
        .add_directory("outer/inner/")
        .add_file("outer/inner/leaf", b"leaf")
        .build();
    let mut tree = selection_tree(&data);
    let mut nav = Navigator::new(tree.root(), 3);

    press(&mut nav, &mut tree, Action::Last);
    let at_root = nav.frame();
    press(&mut nav, &mut tree, Action::Open);
    let at_outer = nav.frame();
    press(&mut nav, &mut tree, Action::Open);
    assert_eq!(nav.depth(), 2);

    press(&mut nav, &mut tree, Action::Back);
    assert_eq!(nav.frame(), at_outer);
    press(&mut nav, &mut tree, Action::Back);
    assert_eq!(nav.frame(), at_root);
    assert_eq!(nav.current(), tree.root());
}

#[test]
fn test_view_file_command() {
    let data = sample_archive();
    let mut tree = selection_tree(&data);
    let mut nav = Navigator::new(tree.root(), 10);

    press(&mut nav, &mut tree, Action::Down);
    let cmd = press(&mut nav, &mut tree, Action::Open);
    let gopher = tree.find_str("gopher.txt").unwrap();
    assert_eq!(cmd, Some(Command::ViewFile(gopher)));
    assert_eq!(tree[gopher].data(), b"go");
}
