use super::{join_path_fragments, normalize_path, FileChange, Tree};

#[test]
fn join_path_fragments_handles_empty_and_dot_roots() {
    assert_eq!(
        join_path_fragments("", ".storybook/main.js"),
        ".storybook/main.js"
    );
    assert_eq!(
        join_path_fragments(".", ".storybook/main.js"),
        ".storybook/main.js"
    );
    assert_eq!(
        join_path_fragments("libs/home/ui-react/", ".storybook/main.js"),
        "libs/home/ui-react/.storybook/main.js"
    );
    assert_eq!(normalize_path("./apps\\web//src"), "apps/web/src");
}

#[test]
fn overlay_tracks_writes_and_deletes_before_commit() {
    let mut tree = Tree::in_memory();
    tree.write("libs/a/.storybook/main.js", "module.exports = {};");
    tree.write("libs/a/.storybook/webpack.config.js", "module.exports = {};");
    tree.commit().expect("commit seed files");
    assert!(!tree.has_changes());

    tree.write("./libs/a/.storybook/main.js", "changed");
    tree.delete("libs/a/.storybook/webpack.config.js");

    assert!(tree.exists("libs/a/.storybook/main.js"));
    assert!(!tree.exists("libs/a/.storybook/webpack.config.js"));
    assert_eq!(
        tree.read_to_string("libs/a/.storybook/main.js")
            .expect("read overlay"),
        "changed"
    );
    assert!(tree
        .read_to_string("libs/a/.storybook/webpack.config.js")
        .is_err());

    let changes: Vec<_> = tree.changes().collect();
    assert_eq!(
        changes,
        vec![
            (
                "libs/a/.storybook/main.js",
                &FileChange::Write("changed".to_string())
            ),
            ("libs/a/.storybook/webpack.config.js", &FileChange::Delete),
        ]
    );
    assert_eq!(tree.written_paths(), vec!["libs/a/.storybook/main.js"]);
}

#[test]
fn deleting_an_unpublished_write_drops_the_change() {
    let mut tree = Tree::in_memory();
    tree.write("scratch.js", "x");
    tree.delete("scratch.js");
    assert!(!tree.exists("scratch.js"));
    assert!(!tree.has_changes());
}

#[test]
fn disk_commit_writes_and_deletes_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::create_dir_all(root.join(".storybook")).expect("create .storybook");
    std::fs::write(root.join(".storybook/webpack.config.js"), "old").expect("seed webpack");

    let mut tree = Tree::on_disk(root.to_path_buf());
    assert!(tree.exists(".storybook/webpack.config.js"));
    tree.write("libs/a/.storybook/main.js", "module.exports = {};\n");
    tree.delete(".storybook/webpack.config.js");

    // nothing is published before commit
    assert!(root.join(".storybook/webpack.config.js").is_file());
    assert!(!root.join("libs/a/.storybook/main.js").exists());

    let applied = tree.commit().expect("commit to disk");
    assert_eq!(applied.len(), 2);
    assert!(!root.join(".storybook/webpack.config.js").exists());
    assert_eq!(
        std::fs::read_to_string(root.join("libs/a/.storybook/main.js")).expect("read main"),
        "module.exports = {};\n"
    );
    assert!(!tree.has_changes());
}

#[test]
fn failed_disk_commit_leaves_disk_and_overlay_intact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("a.js"), "old").expect("seed a.js");
    std::fs::create_dir_all(root.join("b.js/nested")).expect("seed b.js dir");

    let mut tree = Tree::on_disk(root.to_path_buf());
    tree.write("a.js", "new");
    tree.write("b.js", "cannot replace a directory");

    assert!(tree.commit().is_err());
    assert_eq!(
        std::fs::read_to_string(root.join("a.js")).expect("read a.js"),
        "old"
    );
    assert_eq!(tree.written_paths(), vec!["a.js", "b.js"]);
    assert_eq!(tree.read_to_string("a.js").expect("read overlay"), "new");
}
