use std::fs;

use tempfile::TempDir;

use super::*;
use crate::structure::{Structure, instantiated_at};

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

#[test]
fn captures_files_and_directories_sorted() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "src/main.c");
    touch(temp.path(), "Makefile");
    fs::create_dir_all(temp.path().join("build")).unwrap();

    let node = capture_directory(temp.path(), &IgnoreList::default(), &CaptureOptions::default())
        .unwrap();

    let names: Vec<_> = node.children.iter().map(|c| c.pattern.as_str()).collect();
    assert_eq!(names, vec!["Makefile", "build", "src"]);
    assert!(node.children[1].is_directory);
    assert!(node.children[1].children.is_empty());
    assert_eq!(node.children[2].children[0].pattern.as_str(), "main.c");
}

#[test]
fn captured_template_matches_its_source() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("proj");
    touch(&project, "src/main.c");
    touch(&project, "include/util.h");

    let node = capture_directory(&project, &IgnoreList::default(), &CaptureOptions::default())
        .unwrap();

    assert!(instantiated_at(&Structure::new("captured", node), &project));
}

#[test]
fn honours_ignore_list() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), ".git/HEAD");
    touch(temp.path(), "main.c");

    let ignore = IgnoreList::new([".git"]);
    let node = capture_directory(temp.path(), &ignore, &CaptureOptions::default()).unwrap();

    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].pattern.as_str(), "main.c");
}

#[test]
fn depth_limit_stops_descent() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "a/b/c.txt");

    let options = CaptureOptions {
        max_depth: Some(1),
        ..CaptureOptions::default()
    };
    let node = capture_directory(temp.path(), &IgnoreList::default(), &options).unwrap();

    assert_eq!(node.children.len(), 1);
    assert!(node.children[0].children.is_empty());
}

#[test]
fn metacharacters_are_escaped() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "notes[1].txt");

    let node = capture_directory(temp.path(), &IgnoreList::default(), &CaptureOptions::default())
        .unwrap();
    let pattern = &node.children[0].pattern;

    assert!(pattern.is_match("notes[1].txt"));
    assert!(!pattern.is_match("notes1.txt"));
}

#[test]
fn custom_root_pattern() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "x");
    let options = CaptureOptions {
        root_pattern: "TP*".to_string(),
        max_depth: None,
    };

    let node = capture_directory(temp.path(), &IgnoreList::default(), &options).unwrap();
    assert_eq!(node.pattern.as_str(), "TP*");
}

#[test]
fn invalid_root_pattern_is_rejected() {
    let temp = TempDir::new().unwrap();
    let options = CaptureOptions {
        root_pattern: "[".to_string(),
        max_depth: None,
    };
    let result = capture_directory(temp.path(), &IgnoreList::default(), &options);
    assert!(matches!(result, Err(InsekiError::InvalidPattern { .. })));
}
