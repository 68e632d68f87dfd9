use std::fs;

use tempfile::TempDir;

use super::*;
use crate::config::mock_fs::MockFileSystem;

#[test]
fn parse_skips_blank_lines() {
    let list = IgnoreList::parse("node_modules\n\n.git\n   \ntarget\n");
    assert_eq!(list.len(), 3);
    assert!(list.is_ignored_name("node_modules"));
    assert!(list.is_ignored_name(".git"));
    assert!(list.is_ignored_name("target"));
}

#[test]
fn parse_handles_crlf() {
    let list = IgnoreList::parse("build\r\nvendor\r\n");
    assert!(list.is_ignored_name("build"));
    assert!(list.is_ignored_name("vendor"));
}

#[test]
fn matches_basename_only() {
    let list = IgnoreList::new(["target"]);
    assert!(list.is_ignored(Path::new("/work/proj/target")));
    assert!(!list.is_ignored(Path::new("/work/target/proj")));
    assert!(!list.is_ignored(Path::new("/work/targets")));
}

#[test]
fn empty_list_ignores_nothing() {
    let list = IgnoreList::default();
    assert!(list.is_empty());
    assert!(!list.is_ignored(Path::new("/anything")));
}

#[test]
fn load_missing_file_is_empty() {
    let temp = TempDir::new().unwrap();
    let list = IgnoreList::load(&temp.path().join(".insekiignore")).unwrap();
    assert!(list.is_empty());
}

#[test]
fn load_reads_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(IGNORE_FILE_NAME);
    fs::write(&path, ".git\nnode_modules\n").unwrap();

    let list = IgnoreList::load(&path).unwrap();
    assert_eq!(list.iter().collect::<Vec<_>>(), vec![".git", "node_modules"]);
}

#[test]
fn load_directory_is_read_error() {
    let temp = TempDir::new().unwrap();
    let result = IgnoreList::load(temp.path());
    assert!(matches!(result, Err(InsekiError::FileRead { .. })));
}

#[test]
fn load_with_reads_through_filesystem() {
    let fs = MockFileSystem::new().with_file("/home/user/.insekiignore", "target\n\n.git\n");

    let list = IgnoreList::load_with(&fs, Path::new("/home/user/.insekiignore")).unwrap();

    assert_eq!(list.iter().collect::<Vec<_>>(), vec![".git", "target"]);
}

#[test]
fn load_with_missing_file_is_empty() {
    let list = IgnoreList::load_with(&MockFileSystem::new(), Path::new("/none")).unwrap();
    assert!(list.is_empty());
}

#[test]
fn load_with_permission_denied_is_read_error() {
    let fs = MockFileSystem::new().with_unreadable("/etc/inseki/.insekiignore");

    let err = IgnoreList::load_with(&fs, Path::new("/etc/inseki/.insekiignore")).unwrap_err();

    assert!(matches!(err, InsekiError::FileRead { ref path, .. } if path.ends_with(".insekiignore")));
}
