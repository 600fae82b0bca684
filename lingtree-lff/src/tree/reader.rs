//! Directory tree -> lazy Languoid stream
//!
//! Walks a classification tree depth-first and yields one [`Languoid`] per
//! node directory, with the lineage resolved from the directory nesting.
//! Display names in the lineage come from the ancestors' own info files, not
//! from their slugged directory names; the walk visits parents before
//! children, so a stack of the currently open ancestors is enough.
//!
//! The stream is lazy and finite, and the traversal order is whatever the
//! filesystem yields. Consumers that need determinism sort explicitly (the
//! lff writer does).

use std::path::Path;

use walkdir::WalkDir;

use crate::error::ConvertError;
use crate::infofile;
use crate::languoid::{Languoid, LineageEntry};

/// Walk the tree rooted at `root`, yielding every languoid in it.
///
/// The root directory itself carries no info file and is not yielded.
pub fn languoids_from_tree(root: impl AsRef<Path>) -> TreeWalk {
    TreeWalk {
        inner: WalkDir::new(root).into_iter(),
        stack: Vec::new(),
    }
}

/// Iterator over the nodes of a directory tree.
///
/// Not restartable: re-invoke [`languoids_from_tree`] for another pass.
pub struct TreeWalk {
    inner: walkdir::IntoIter,
    /// Open ancestors of the directory being visited, as (depth, entry).
    stack: Vec<(usize, LineageEntry)>,
}

impl Iterator for TreeWalk {
    type Item = Result<Languoid, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(ConvertError::Io(e.to_string()))),
            };
            if !entry.file_type().is_dir() || entry.depth() == 0 {
                continue;
            }
            let dirname = entry.file_name().to_string_lossy().into_owned();
            if dirname.starts_with('.') {
                self.inner.skip_current_dir();
                continue;
            }

            match self.read_node(entry.path(), &dirname, entry.depth()) {
                Ok(node) => return Some(Ok(node)),
                Err(e) => {
                    // A bad directory poisons its subtree too; don't descend.
                    self.inner.skip_current_dir();
                    return Some(Err(e));
                }
            }
        }
    }
}

impl TreeWalk {
    fn read_node(
        &mut self,
        path: &Path,
        dirname: &str,
        depth: usize,
    ) -> Result<Languoid, ConvertError> {
        let (_, id) = dirname.rsplit_once('.').ok_or_else(|| {
            ConvertError::Structural(format!(
                "directory '{}' is not named slug.id",
                path.display()
            ))
        })?;

        let info = infofile::read(path)?;
        if info.id != id {
            return Err(ConvertError::Structural(format!(
                "info file in '{}' declares id '{}' but the directory suffix is '{id}'",
                path.display(),
                info.id
            )));
        }

        while matches!(self.stack.last(), Some((d, _)) if *d >= depth) {
            self.stack.pop();
        }
        let lineage: Vec<LineageEntry> =
            self.stack.iter().map(|(_, entry)| entry.clone()).collect();
        self.stack.push((
            depth,
            LineageEntry {
                name: info.name.clone(),
                id: info.id.clone(),
                level: info.level,
            },
        ));

        Ok(Languoid {
            id: info.id,
            name: info.name,
            level: info.level,
            lineage,
            iso: info.iso,
        })
    }
}
