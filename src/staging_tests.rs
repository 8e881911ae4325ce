use super::publish_changes;
use crate::tree::FileChange;
use std::collections::BTreeMap;

#[test]
fn failed_change_reverts_changes_already_published() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("a.js"), "old a").expect("seed a.js");
    std::fs::write(root.join("b.js"), "old b").expect("seed b.js");
    // A directory where a file is expected makes the third change fail.
    std::fs::create_dir_all(root.join("c.js/nested")).expect("seed c.js dir");

    let mut changes = BTreeMap::new();
    changes.insert("a.js".to_string(), FileChange::Write("new a".to_string()));
    changes.insert("b.js".to_string(), FileChange::Delete);
    changes.insert("c.js".to_string(), FileChange::Delete);

    let err = publish_changes(root, &changes).expect_err("c.js cannot be deleted");
    assert!(format!("{err:#}").contains("c.js"));

    assert_eq!(
        std::fs::read_to_string(root.join("a.js")).expect("read a.js"),
        "old a"
    );
    assert_eq!(
        std::fs::read_to_string(root.join("b.js")).expect("read b.js"),
        "old b"
    );
    assert!(root.join("c.js/nested").is_dir());
}

#[test]
fn new_files_are_removed_on_rollback() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::create_dir_all(root.join("z.js/nested")).expect("seed z.js dir");

    let mut changes = BTreeMap::new();
    changes.insert(
        "libs/a/.storybook/main.js".to_string(),
        FileChange::Write("module.exports = {};".to_string()),
    );
    changes.insert("z.js".to_string(), FileChange::Write("x".to_string()));

    publish_changes(root, &changes).expect_err("z.js is a directory");
    assert!(!root.join("libs/a/.storybook/main.js").exists());
}
