//! Tree -> lff -> tree round trip.

mod common;

use std::collections::BTreeSet;
use std::fs;

use lingtree_lff::{languoids_from_tree, lff2tree, tree2lff, BuildOptions, Level};
use tempfile::tempdir;

use common::{node, node_with_iso};

/// Fam.fam1 { Sub.sub1 { Alpha [alp] { Alphon dialect } }, Beta }, plus the
/// isolate Solo at the root.
fn build_fixture_tree(root: &std::path::Path) {
    let fam = node(root, "fam1", "Fam", Level::Family);
    let sub = node(&fam, "sub1", "Sub", Level::Family);
    let alpha = node_with_iso(&sub, "lang1", "Alpha", Level::Language, Some("alp"));
    node(&alpha, "dial1", "Alphon", Level::Dialect);
    node(&fam, "lang2", "Beta", Level::Language);
    node(root, "isol1", "Solo", Level::Language);
}

fn fingerprint(root: &std::path::Path) -> BTreeSet<(String, String, String, Option<String>)> {
    languoids_from_tree(root)
        .map(|r| r.unwrap())
        .map(|l| (l.id, l.name, l.level.to_string(), l.iso))
        .collect()
}

#[test]
fn writer_emits_sorted_grouped_listings() {
    let tree = tempdir().unwrap();
    build_fixture_tree(tree.path());
    let out = tempdir().unwrap();

    let count = tree2lff(tree.path(), out.path()).unwrap();
    assert_eq!(count, 6);

    let lff = fs::read_to_string(out.path().join("lff.txt")).unwrap();
    assert_eq!(
        lff,
        concat!(
            "# -*- coding: utf-8 -*-\n",
            "-isolates-\n",
            "    Solo.isol1\n",
            "Fam.fam1\n",
            "    Beta.lang2\n",
            "Fam.fam1 / Sub.sub1\n",
            "    Alpha.lang1 [alp]\n",
        )
    );

    let dff = fs::read_to_string(out.path().join("dff.txt")).unwrap();
    assert_eq!(
        dff,
        concat!(
            "# -*- coding: utf-8 -*-\n",
            "Alpha.lang1\n",
            "    Alphon.dial1\n",
        )
    );
}

#[test]
fn writer_is_idempotent() {
    let tree = tempdir().unwrap();
    build_fixture_tree(tree.path());
    let out1 = tempdir().unwrap();
    let out2 = tempdir().unwrap();

    tree2lff(tree.path(), out1.path()).unwrap();
    tree2lff(tree.path(), out2.path()).unwrap();

    for name in ["lff.txt", "dff.txt"] {
        let a = fs::read(out1.path().join(name)).unwrap();
        let b = fs::read(out2.path().join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn rebuild_from_own_listings_reproduces_the_tree() {
    let tree = tempdir().unwrap();
    build_fixture_tree(tree.path());
    let work = tempdir().unwrap();
    tree2lff(tree.path(), work.path()).unwrap();

    let options = BuildOptions {
        outdir: work.path().join("fromlff"),
        ..BuildOptions::default()
    };
    let report = lff2tree(
        &work.path().join("lff.txt"),
        &work.path().join("dff.txt"),
        Some(tree.path()),
        &options,
    )
    .unwrap();

    assert_eq!(report.placed, 6);
    assert!(report.skipped.is_empty());
    assert!(report.orphaned.is_empty());
    assert_eq!(fingerprint(tree.path()), fingerprint(&options.outdir));
}
