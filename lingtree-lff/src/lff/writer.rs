//! Directory tree -> sorted flat-format text
//!
//! Flattens one tree into its two listings: `lff.txt` for languages and
//! `dff.txt` for dialects. Families appear only inside group paths. Groups
//! are emitted sorted by path and members sorted within each group, so the
//! output is canonical: flattening the same tree twice yields byte-identical
//! files regardless of filesystem walk order.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::error::ConvertError;
use crate::languoid::Level;
use crate::tree::reader::languoids_from_tree;

/// Encoding declaration emitted as the first line of every listing.
const ENCODING_COMMENT: &str = "# -*- coding: utf-8 -*-";

/// Flatten the tree rooted at `tree` into `lff.txt` and `dff.txt` under
/// `outdir`, and return the number of nodes walked (families included).
pub fn tree2lff(tree: &Path, outdir: &Path) -> Result<usize, ConvertError> {
    let mut languages: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut dialects: BTreeMap<String, Vec<String>> = BTreeMap::new();

    let mut count = 0;
    for node in languoids_from_tree(tree) {
        let node = node?;
        count += 1;
        let groups = match node.level {
            Level::Language => &mut languages,
            Level::Dialect => &mut dialects,
            Level::Family => continue,
        };
        groups
            .entry(node.lff_group())
            .or_default()
            .push(node.lff_language());
    }

    write_ff(&outdir.join(Level::Language.ff_filename()), &mut languages)?;
    write_ff(&outdir.join(Level::Dialect.ff_filename()), &mut dialects)?;
    debug!("flattened {count} nodes from {}", tree.display());
    Ok(count)
}

fn write_ff(path: &Path, groups: &mut BTreeMap<String, Vec<String>>) -> Result<(), ConvertError> {
    let mut out = Vec::new();
    writeln!(out, "{ENCODING_COMMENT}")?;
    for (group, members) in groups.iter_mut() {
        writeln!(out, "{group}")?;
        members.sort();
        for member in members.iter() {
            writeln!(out, "    {member}")?;
        }
    }
    fs::write(path, out).map_err(|e| ConvertError::Io(format!("writing {}: {e}", path.display())))
}
