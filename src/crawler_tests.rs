use std::fs;

use tempfile::TempDir;

use super::*;
use crate::index::IndexOptions;
use crate::structure::{Node, Structure, TemplateLibrary};

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn library() -> TemplateLibrary {
    TemplateLibrary::from_structures(vec![
        Structure::new(
            "t1",
            Node::dir(
                "*",
                vec![Node::dir("src", vec![Node::file("main.c").unwrap()]).unwrap()],
            )
            .unwrap(),
        ),
        Structure::new(
            "t2",
            Node::dir("*", vec![Node::file("main.c").unwrap()]).unwrap(),
        ),
        Structure::new(
            "tp",
            Node::dir("TP*", vec![Node::file("notes.txt").unwrap()]).unwrap(),
        ),
    ])
}

fn crawl(root: &Path, ignore: &IgnoreList) -> Vec<PathBuf> {
    let library = library();
    let index = PatternIndex::build(&library, IndexOptions::default()).unwrap();
    let outcome = Crawler::new(&index, CrawlOptions::default())
        .crawl(root, ignore)
        .unwrap();
    outcome
        .targets
        .into_iter()
        .map(|t| t.path.strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

#[test]
fn emits_targets_in_sorted_preorder() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "b/main.c");
    touch(temp.path(), "a/main.c");
    touch(temp.path(), "a/other.txt");

    let targets = crawl(temp.path(), &IgnoreList::default());
    assert_eq!(
        targets,
        vec![PathBuf::from("a/main.c"), PathBuf::from("b/main.c")]
    );
}

#[test]
fn matched_directory_is_not_descended() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "proj/src/main.c");
    touch(temp.path(), "proj/src/src/deeper.c");

    let targets = crawl(temp.path(), &IgnoreList::default());
    assert_eq!(targets, vec![PathBuf::from("proj/src")]);
}

#[test]
fn ignored_directory_is_pruned() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "node_modules/pkg/main.c");
    touch(temp.path(), "app/main.c");

    let targets = crawl(temp.path(), &IgnoreList::new(["node_modules"]));
    assert_eq!(targets, vec![PathBuf::from("app/main.c")]);
}

#[test]
fn ignored_file_is_skipped() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "app/main.c");

    let targets = crawl(temp.path(), &IgnoreList::new(["main.c"]));
    assert!(targets.is_empty());
}

#[test]
fn ignored_crawl_root_yields_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("skipme");
    touch(&root, "main.c");

    let targets = crawl(&root, &IgnoreList::new(["skipme"]));
    assert!(targets.is_empty());
}

#[test]
fn crawl_root_can_be_a_target() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("TP3");
    touch(&root, "notes.txt");
    touch(&root, "main.c");

    let library = library();
    let index = PatternIndex::build(&library, IndexOptions::default()).unwrap();
    let outcome = Crawler::new(&index, CrawlOptions::default())
        .crawl(&root, &IgnoreList::default())
        .unwrap();

    assert_eq!(outcome.targets.len(), 1);
    assert_eq!(outcome.targets[0].path, root);
    assert!(outcome.targets[0].is_dir);
}

#[test]
fn target_carries_every_matching_association() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "p/notes.txt");

    let library = TemplateLibrary::from_structures(vec![
        Structure::new(
            "exact",
            Node::dir("*", vec![Node::file("notes.txt").unwrap()]).unwrap(),
        ),
        Structure::new(
            "glob",
            Node::dir("*", vec![Node::file("*.txt").unwrap()]).unwrap(),
        ),
    ]);
    let index = PatternIndex::build(&library, IndexOptions::default()).unwrap();
    let outcome = Crawler::new(&index, CrawlOptions::default())
        .crawl(temp.path(), &IgnoreList::default())
        .unwrap();

    assert_eq!(outcome.targets.len(), 1);
    let patterns: Vec<_> = outcome.targets[0]
        .associations
        .iter()
        .map(|a| a.pattern.as_str())
        .collect();
    assert_eq!(patterns, vec!["notes.txt", "*.txt"]);
}

#[test]
fn stats_are_counted() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "a/main.c");
    touch(temp.path(), "a/readme.md");
    touch(temp.path(), ".git/HEAD");

    let library = library();
    let index = PatternIndex::build(&library, IndexOptions::default()).unwrap();
    let outcome = Crawler::new(&index, CrawlOptions::default())
        .crawl(temp.path(), &IgnoreList::new([".git"]))
        .unwrap();

    // root, a, a/main.c, a/readme.md
    assert_eq!(outcome.stats.entries_visited, 4);
    assert_eq!(outcome.stats.files_visited, 2);
    assert_eq!(outcome.stats.ignored, 1);
    assert_eq!(outcome.stats.targets, 1);
}

#[test]
fn missing_root_is_a_walk_error() {
    let temp = TempDir::new().unwrap();
    let library = library();
    let index = PatternIndex::build(&library, IndexOptions::default()).unwrap();

    let result = Crawler::new(&index, CrawlOptions::default())
        .crawl(&temp.path().join("absent"), &IgnoreList::default());
    assert!(matches!(result, Err(InsekiError::Walk { .. })));
}
