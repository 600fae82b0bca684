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

fn fixture_listings(dir: &Path) -> (PathBuf, PathBuf) {
    let lff = dir.join("lff.txt");
    fs::write(
        &lff,
        "# -*- coding: utf-8 -*-\nfamily.Fam1\n    lang1.Lang1\n",
    )
    .unwrap();
    let dff = dir.join("dff.txt");
    fs::write(&dff, "# -*- coding: utf-8 -*-\n").unwrap();
    (lff, dff)
}

#[test]
fn import_rebuilds_tree_and_prints_count() {
    let old = tempfile::tempdir().unwrap();
    let fam = node(old.path(), "Fam1", "family", Level::Family);
    node(&fam, "Lang1", "lang1", Level::Language);

    let work = tempfile::tempdir().unwrap();
    let (lff, dff) = fixture_listings(work.path());
    let outdir = work.path().join("fromlff");

    let mut cmd = Command::cargo_bin("lingtree").unwrap();
    cmd.arg("import")
        .arg(&lff)
        .arg(&dff)
        .arg("--tree")
        .arg(old.path())
        .arg("--outdir")
        .arg(&outdir);
    cmd.assert().success().stdout(predicate::str::diff("2\n"));

    assert!(outdir.join("family.Fam1").join("lang1.Lang1").is_dir());
}

#[test]
fn import_json_emits_the_full_report() {
    let old = tempfile::tempdir().unwrap();
    let fam = node(old.path(), "Fam1", "family", Level::Family);
    node(&fam, "Lang1", "lang1", Level::Language);
    node(&fam, "Lang2", "lang2", Level::Language);

    let work = tempfile::tempdir().unwrap();
    let (lff, dff) = fixture_listings(work.path());
    let outdir = work.path().join("fromlff");

    let mut cmd = Command::cargo_bin("lingtree").unwrap();
    cmd.arg("import")
        .arg(&lff)
        .arg(&dff)
        .arg("--tree")
        .arg(old.path())
        .arg("--outdir")
        .arg(&outdir)
        .arg("--json");

    // Lang2 is in the old tree but not in the listings: orphaned.
    let output_pred = predicate::str::contains("\"placed\": 2")
        .and(predicate::str::contains("\"orphaned\""))
        .and(predicate::str::contains("Lang2"));
    cmd.assert().success().stdout(output_pred);
}

#[test]
fn import_of_unknown_leaf_fails_without_allow_new_languages() {
    let work = tempfile::tempdir().unwrap();
    let (lff, dff) = fixture_listings(work.path());
    let outdir = work.path().join("fromlff");

    let mut cmd = Command::cargo_bin("lingtree").unwrap();
    cmd.arg("import").arg(&lff).arg(&dff).arg("--outdir").arg(&outdir);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Consistency error"));
}

#[test]
fn import_with_allow_new_languages_synthesizes_nodes() {
    let work = tempfile::tempdir().unwrap();
    let (lff, dff) = fixture_listings(work.path());
    let outdir = work.path().join("fromlff");

    let mut cmd = Command::cargo_bin("lingtree").unwrap();
    cmd.arg("import")
        .arg(&lff)
        .arg(&dff)
        .arg("--outdir")
        .arg(&outdir)
        .arg("--allow-new-languages");
    cmd.assert().success().stdout(predicate::str::diff("2\n"));
    assert!(outdir.join("family.Fam1").join("lang1.Lang1").join("md.ini").is_file());
}
