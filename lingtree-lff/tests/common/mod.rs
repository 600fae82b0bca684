//! Shared fixture helpers: build small trees and listings on disk.
#![allow(dead_code)] // not every test binary uses every helper

use std::fs;
use std::path::{Path, PathBuf};

use lingtree_lff::{Languoid, Level};

/// Materialize one node directory (dir + info file) under `parent`.
pub fn node(parent: &Path, id: &str, name: &str, level: Level) -> PathBuf {
    node_with_iso(parent, id, name, level, None)
}

pub fn node_with_iso(
    parent: &Path,
    id: &str,
    name: &str,
    level: Level,
    iso: Option<&str>,
) -> PathBuf {
    let mut languoid = Languoid::new(id, name, level);
    languoid.iso = iso.map(str::to_string);
    let dir = parent.join(languoid.fname());
    fs::create_dir(&dir).unwrap();
    languoid.write_info(&dir).unwrap();
    dir
}

/// Write a listing file with the standard encoding header.
pub fn listing(dir: &Path, filename: &str, body: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, format!("# -*- coding: utf-8 -*-\n{body}")).unwrap();
    path
}

/// An empty-but-valid listing (header only).
pub fn empty_listing(dir: &Path, filename: &str) -> PathBuf {
    listing(dir, filename, "")
}
