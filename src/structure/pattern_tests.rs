use super::*;

#[test]
fn literal_name_matches_itself_only() {
    let pattern = NamePattern::new("main.c").unwrap();
    assert!(pattern.is_match("main.c"));
    assert!(!pattern.is_match("main.h"));
    assert!(!pattern.is_match("xmain.c"));
}

#[test]
fn star_matches_any_single_segment() {
    let pattern = NamePattern::new("*.c").unwrap();
    assert!(pattern.is_match("main.c"));
    assert!(pattern.is_match(".c"));
    assert!(!pattern.is_match("main.cpp"));
}

#[test]
fn star_does_not_cross_separator() {
    let pattern = NamePattern::new("*").unwrap();
    assert!(pattern.is_match("anything"));
    assert!(!pattern.is_match("a/b"));
}

#[test]
fn question_mark_and_class() {
    let pattern = NamePattern::new("TP[0-9]?").unwrap();
    assert!(pattern.is_match("TP1a"));
    assert!(!pattern.is_match("TPx1"));
}

#[test]
fn invalid_glob_is_rejected() {
    let result = NamePattern::new("[abc");
    assert!(matches!(result, Err(InsekiError::InvalidPattern { .. })));
}

#[test]
fn literal_escapes_metacharacters() {
    let pattern = NamePattern::literal("notes[1].txt").unwrap();
    assert!(pattern.is_match("notes[1].txt"));
    assert!(!pattern.is_match("notes1.txt"));
}

#[test]
fn covers_compares_pattern_text() {
    let glob = NamePattern::new("*.c").unwrap();
    let literal = NamePattern::new("main.c").unwrap();
    assert!(glob.covers(&literal));
    assert!(glob.covers(&glob));
    assert!(!literal.covers(&glob));
}

#[test]
fn wildcard_detection() {
    assert!(NamePattern::new("*").unwrap().is_wildcard());
    assert!(!NamePattern::new("*.c").unwrap().is_wildcard());
}

#[test]
fn equality_is_by_text() {
    assert_eq!(
        NamePattern::new("src").unwrap(),
        NamePattern::new("src").unwrap()
    );
    assert_ne!(
        NamePattern::new("src").unwrap(),
        NamePattern::new("Src").unwrap()
    );
}
