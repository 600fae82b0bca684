//! Conversion between the two representations of a languoid classification
//!
//!     A classification lives in two forms. The authoritative one is a directory
//!     tree: every node (family, subgroup, language, dialect) is a directory named
//!     `slug(name).id` holding one info file with that node's metadata. The
//!     editable one is a pair of flat listings, `lff.txt` (languages) and
//!     `dff.txt` (dialects): a non-indented line gives a full group path as
//!     `name.id` segments, and each 4-space-indented line below it is one node.
//!
//!     This crate implements the round trip between the two. Flattening is the
//!     easy direction. Rebuilding is the hard one, because the flat form drops
//!     per-node identity context that has to be recovered by cross-referencing a
//!     snapshot of the previous tree: renames must be propagated, levels must
//!     still agree, every node must be re-created exactly once, and anything the
//!     listing does not account for must be reported rather than silently lost.
//!
//! Architecture
//!
//!     The representations each get a reader, and each direction of the
//!     conversion gets an orchestrator that consumes one reader and produces the
//!     other representation:
//!
//!     .
//!     ├── error.rs        # ConvertError taxonomy
//!     ├── languoid.rs     # the node model and the lff token grammar
//!     ├── slug.rs         # filesystem-safe name normalization
//!     ├── infofile.rs     # per-directory md.ini reader/writer
//!     ├── tree
//!     │   ├── reader.rs   # directory tree -> lazy Languoid stream
//!     │   └── builder.rs  # lff + dff + old tree -> new tree (the core)
//!     └── lff
//!         ├── reader.rs   # lff/dff text -> lazy Languoid stream
//!         └── writer.rs   # tree -> sorted lff/dff text
//!
//!     This is a pure library: it powers the lingtree CLI but is shell agnostic.
//!     Nothing here prints to stdout or reads environment variables; diagnostics
//!     go through the `log` facade and results come back as values.
//!
//! Error policy
//!
//!     Every inconsistency is fatal. The old tree is ground truth for identity
//!     and level, so a mismatch aborts the run instead of diverging silently;
//!     the output goes to a fresh directory, so a partial tree left behind by an
//!     abort costs nothing. What is *not* fatal is incompleteness of the input:
//!     unclassified entries, orphan dialects, and old-tree nodes missing from
//!     the listing are collected into the build report as diagnostics.

pub mod error;
pub mod infofile;
pub mod languoid;
pub mod lff;
pub mod slug;
pub mod tree;

pub use error::ConvertError;
pub use languoid::{Languoid, Level, LineageEntry};
pub use lff::reader::{read_lff, LffRecord};
pub use lff::writer::tree2lff;
pub use slug::slug;
pub use tree::builder::{lff2tree, BuildOptions, BuildReport, OldTreeIndex, SkipReason, Skipped};
pub use tree::reader::languoids_from_tree;
