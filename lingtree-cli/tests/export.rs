use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use lingtree_lff::{Languoid, Level};

fn node(parent: &Path, id: &str, name: &str, level: Level) -> PathBuf {
    let languoid = Languoid::new(id, name, level);
    let dir = parent.join(languoid.fname());
    fs::create_dir(&dir).unwrap();
    languoid.write_info(&dir).unwrap();
    dir
}

fn fixture_tree(root: &Path) {
    let fam = node(root, "Fam1", "family", Level::Family);
    node(&fam, "Lang1", "lang1", Level::Language);
}

#[test]
fn export_prints_count_and_writes_listings_to_cwd() {
    let tree = tempfile::tempdir().unwrap();
    fixture_tree(tree.path());
    let cwd = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("lingtree").unwrap();
    cmd.current_dir(cwd.path()).arg("export").arg(tree.path());
    cmd.assert().success().stdout(predicate::str::diff("2\n"));

    let lff = fs::read_to_string(cwd.path().join("lff.txt")).unwrap();
    assert!(lff.starts_with("# -*- coding: utf-8 -*-\n"));
    assert!(lff.contains("family.Fam1\n    lang1.Lang1\n"));
    assert!(cwd.path().join("dff.txt").is_file());
}

#[test]
fn bare_tree_argument_defaults_to_export() {
    let tree = tempfile::tempdir().unwrap();
    fixture_tree(tree.path());
    let cwd = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("lingtree").unwrap();
    cmd.current_dir(cwd.path()).arg(tree.path());
    cmd.assert().success().stdout(predicate::str::diff("2\n"));
    assert!(cwd.path().join("lff.txt").is_file());
}

#[test]
fn export_honors_outdir_flag() {
    let tree = tempfile::tempdir().unwrap();
    fixture_tree(tree.path());
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("lingtree").unwrap();
    cmd.arg("export")
        .arg(tree.path())
        .arg("--outdir")
        .arg(out.path());
    cmd.assert().success();
    assert!(out.path().join("lff.txt").is_file());
}

#[test]
fn export_of_broken_tree_fails_loudly() {
    let tree = tempfile::tempdir().unwrap();
    // A node directory without an info file.
    fs::create_dir(tree.path().join("ghost.ghos1234")).unwrap();
    let cwd = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("lingtree").unwrap();
    cmd.current_dir(cwd.path()).arg("export").arg(tree.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Structural error"));
}
