//! Flat listings + old tree -> new directory tree
//!
//! # The High-Level Concept
//!
//! The flat listings carry the *shape* of the new classification but only a
//! `name.id` per node; everything else (level agreement, info-file metadata)
//! has to be recovered from a snapshot of the previous tree. The builder
//! streams the language listing and then the dialect listing, descends each
//! entry's lineage under a fresh output root, and materializes every directory
//! exactly once: group directories on first reference, leaf directories when
//! their own entry arrives.
//!
//! # Identity resolution
//!
//! Each id met for the first time is resolved against the old-tree index:
//!
//! - found there: the levels must agree (the old tree is ground truth; a
//!   mismatch aborts the run), and a differing name is a rename, applied
//!   copy-on-write to the index so later references see the new name.
//! - absent: the node is synthesized from the listing itself. For groups that
//!   is always legal (subgrouping is reshuffled freely in the listings); for
//!   leaf languages and dialects it is refused unless
//!   [`BuildOptions::allow_new_languages`] is set, because a bare leaf token
//!   is usually a typo for an existing id rather than a new language.
//!
//! # Accounting
//!
//! Every id placed into the new tree enters the consumed set once, however
//! many lineages reference it. Entries that cannot be placed (unclassified,
//! dialects with no lineage) and old-tree ids the listings never mention are
//! not silently dropped: they come back in the [`BuildReport`].
//!
//! Dialect lineages are spelled relative to their language (`language /
//! dialect...`); the family chain is spliced back in from the language's own
//! entry in this run's language listing.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use crate::error::ConvertError;
use crate::languoid::{Languoid, Level, LineageEntry};
use crate::lff::reader::{read_lff, LffRecord};
use crate::slug::slug;
use crate::tree::reader::languoids_from_tree;

/// Knobs for a build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Root of the tree being built. Must not pre-exist.
    pub outdir: PathBuf,
    /// Synthesize leaf languages/dialects whose id the old tree lacks,
    /// instead of aborting with a consistency error.
    pub allow_new_languages: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            outdir: PathBuf::from("fromlff"),
            allow_new_languages: false,
        }
    }
}

/// Why an input entry was not placed into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Filed under the reserved unclassified path.
    Unclassified,
    /// A dialect attached to no language.
    OrphanDialect,
}

/// One input entry that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub id: String,
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of a build run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Distinct identities placed into the new tree.
    pub placed: usize,
    /// Input entries that could not be placed.
    pub skipped: Vec<Skipped>,
    /// Old-tree identities the listings never mentioned, sorted.
    pub orphaned: Vec<String>,
}

/// Identity -> Languoid lookup over the previous tree snapshot.
///
/// Built once before any directory is written and read-mostly afterwards:
/// the only mutation is the copy-on-write name update of [`rename`], which
/// stores the updated value back under its own key so the builder's effects
/// stay auditable.
///
/// [`rename`]: OldTreeIndex::rename
pub struct OldTreeIndex {
    nodes: HashMap<String, Languoid>,
}

impl OldTreeIndex {
    pub fn empty() -> Self {
        OldTreeIndex {
            nodes: HashMap::new(),
        }
    }

    /// Index every node of the tree rooted at `root`.
    pub fn from_tree(root: &Path) -> Result<Self, ConvertError> {
        let mut nodes = HashMap::new();
        for node in languoids_from_tree(root) {
            let node = node?;
            nodes.insert(node.id.clone(), node);
        }
        Ok(OldTreeIndex { nodes })
    }

    pub fn get(&self, id: &str) -> Option<&Languoid> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }

    /// Apply a rename and return the updated node.
    fn rename(&mut self, id: &str, name: &str) -> Option<Languoid> {
        let mut node = self.nodes.get(id)?.clone();
        node.name = name.to_string();
        self.nodes.insert(id.to_string(), node.clone());
        Some(node)
    }
}

/// How an id from the listing was resolved against the old tree.
enum NodePlacement {
    /// Found in the old tree (name possibly already updated by a rename).
    Existing(Languoid),
    /// Unknown to the old tree; synthesized from the listing entry.
    New(Languoid),
}

/// Build a new tree under `options.outdir` from a language listing, its
/// companion dialect listing, and (optionally) the previous tree snapshot.
pub fn lff2tree(
    lff: &Path,
    dff: &Path,
    old_tree: Option<&Path>,
    options: &BuildOptions,
) -> Result<BuildReport, ConvertError> {
    fs::create_dir(&options.outdir).map_err(|e| {
        ConvertError::Io(format!(
            "creating output directory {}: {e}",
            options.outdir.display()
        ))
    })?;
    let mut index = match old_tree {
        Some(root) => OldTreeIndex::from_tree(root)?,
        None => OldTreeIndex::empty(),
    };

    let mut consumed: HashSet<String> = HashSet::new();
    let mut skipped: Vec<Skipped> = Vec::new();
    let mut languages: HashMap<String, Languoid> = HashMap::new();

    for record in read_lff(lff, Level::Language)? {
        match record? {
            LffRecord::Unclassified(node) => skip(&mut skipped, node, SkipReason::Unclassified),
            LffRecord::Classified(lang) => {
                let groupdir =
                    place_lineage(&options.outdir, &lang.lineage, &mut index, &mut consumed)?;
                place_leaf(&groupdir, &lang, &mut index, &mut consumed, options)?;
                languages.insert(lang.id.clone(), lang);
            }
        }
    }

    for record in read_lff(dff, Level::Dialect)? {
        match record? {
            LffRecord::Unclassified(node) => skip(&mut skipped, node, SkipReason::Unclassified),
            LffRecord::Classified(dialect) => {
                if dialect.lineage.is_empty() {
                    skip(&mut skipped, dialect, SkipReason::OrphanDialect);
                    continue;
                }
                let lang_id = &dialect.lineage[0].id;
                let lang = languages.get(lang_id).ok_or_else(|| {
                    ConvertError::Consistency(format!(
                        "dialect '{}' is filed under language '{lang_id}' which the \
                         language listing does not contain",
                        dialect.id
                    ))
                })?;
                let full: Vec<LineageEntry> = lang
                    .lineage
                    .iter()
                    .chain(dialect.lineage.iter())
                    .cloned()
                    .collect();
                let groupdir = place_lineage(&options.outdir, &full, &mut index, &mut consumed)?;
                place_leaf(&groupdir, &dialect, &mut index, &mut consumed, options)?;
            }
        }
    }

    let mut orphaned: Vec<String> = index
        .ids()
        .filter(|id| !consumed.contains(id.as_str()))
        .cloned()
        .collect();
    orphaned.sort();
    for id in &orphaned {
        warn!("old-tree node '{id}' does not appear in the new listings");
    }

    Ok(BuildReport {
        placed: consumed.len(),
        skipped,
        orphaned,
    })
}

fn skip(skipped: &mut Vec<Skipped>, node: Languoid, reason: SkipReason) {
    warn!("skipping '{}.{}': {reason:?}", node.name, node.id);
    skipped.push(Skipped {
        id: node.id,
        name: node.name,
        reason,
    });
}

/// Descend the lineage from the output root, creating each group directory
/// the first time it is referenced, and return the innermost directory.
fn place_lineage(
    out: &Path,
    lineage: &[LineageEntry],
    index: &mut OldTreeIndex,
    consumed: &mut HashSet<String>,
) -> Result<PathBuf, ConvertError> {
    let mut groupdir = out.to_path_buf();
    for entry in lineage {
        groupdir.push(format!("{}.{}", slug(&entry.name), entry.id));
        if !groupdir.exists() {
            fs::create_dir(&groupdir).map_err(|e| {
                ConvertError::Io(format!("creating {}: {e}", groupdir.display()))
            })?;
            let node = match resolve(index, &entry.id, &entry.name, entry.level)? {
                NodePlacement::Existing(node) => node,
                NodePlacement::New(node) => {
                    debug!("synthesizing new group '{}.{}'", node.name, node.id);
                    node
                }
            };
            node.write_info(&groupdir)?;
        }
        consumed.insert(entry.id.clone());
    }
    Ok(groupdir)
}

/// Materialize a language/dialect entry itself under its group directory.
///
/// The directory may already exist when the node was referenced earlier as
/// an ancestor of a nested dialect; the info file is (re)written either way.
fn place_leaf(
    groupdir: &Path,
    leaf: &Languoid,
    index: &mut OldTreeIndex,
    consumed: &mut HashSet<String>,
    options: &BuildOptions,
) -> Result<(), ConvertError> {
    let node = match resolve(index, &leaf.id, &leaf.name, leaf.level)? {
        NodePlacement::Existing(mut node) => {
            // The listing is authoritative for the iso code.
            if leaf.iso.is_some() {
                node.iso = leaf.iso.clone();
            }
            node
        }
        NodePlacement::New(mut node) => {
            if !options.allow_new_languages {
                return Err(ConvertError::Consistency(format!(
                    "{} '{}.{}' does not exist in the old tree \
                     (set allow_new_languages to create it)",
                    leaf.level, leaf.name, leaf.id
                )));
            }
            debug!("synthesizing new {} '{}.{}'", leaf.level, leaf.name, leaf.id);
            node.iso = leaf.iso.clone();
            node
        }
    };

    let leafdir = groupdir.join(node.fname());
    if !leafdir.exists() {
        fs::create_dir(&leafdir)
            .map_err(|e| ConvertError::Io(format!("creating {}: {e}", leafdir.display())))?;
    }
    node.write_info(&leafdir)?;
    consumed.insert(node.id.clone());
    Ok(())
}

/// Resolve one id from the listing against the old-tree index, applying a
/// rename when the names differ and checking the level invariant.
fn resolve(
    index: &mut OldTreeIndex,
    id: &str,
    name: &str,
    level: Level,
) -> Result<NodePlacement, ConvertError> {
    match index.get(id) {
        Some(old) => {
            if old.level != level {
                return Err(ConvertError::Consistency(format!(
                    "'{id}' is a {} in the old tree but a {level} in the listing",
                    old.level
                )));
            }
            let node = if old.name != name {
                debug!("renaming '{id}': '{}' -> '{name}'", old.name);
                index
                    .rename(id, name)
                    .unwrap_or_else(|| Languoid::new(id, name, level))
            } else {
                old.clone()
            };
            Ok(NodePlacement::Existing(node))
        }
        None => Ok(NodePlacement::New(Languoid::new(id, name, level))),
    }
}
