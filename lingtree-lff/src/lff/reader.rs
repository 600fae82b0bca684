//! Flat-format text -> lazy Languoid stream
//!
//! The format is line-oriented. A non-indented, non-comment line sets the
//! current group path; every 4-space-indented line below it is one entry
//! parsed against that path. `#` lines and blank lines are skipped. An
//! indented line with no preceding path line is a structural error.
//!
//! Entries filed under the reserved `-unclassified-` path are deliberately
//! outside the classification. They used to be dropped on the floor here;
//! instead they are yielded tagged as [`LffRecord::Unclassified`] so the
//! builder can account for every input node in its report.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::languoid::{Languoid, Level};

/// Reserved group path for entries that are deliberately not classified.
pub const UNCLASSIFIED_PATH: &str = "-unclassified-";

/// Indentation marking an entry line.
const INDENT: &str = "    ";

/// One record of a flat listing.
#[derive(Debug, Clone, PartialEq)]
pub enum LffRecord {
    /// A regular entry, to be placed into the tree.
    Classified(Languoid),
    /// An entry under [`UNCLASSIFIED_PATH`]; excluded from tree building,
    /// surfaced in the build report.
    Unclassified(Languoid),
}

/// Open a flat-format file for streaming at the given level.
pub fn read_lff(path: impl AsRef<Path>, level: Level) -> Result<LffReader, ConvertError> {
    let path = path.as_ref().to_path_buf();
    let file = File::open(&path)
        .map_err(|e| ConvertError::Io(format!("opening {}: {e}", path.display())))?;
    Ok(LffReader {
        lines: BufReader::new(file).lines(),
        level,
        path: None,
        source: path,
    })
}

/// Streaming reader over one lff/dff file.
///
/// Lazy and finite; not restartable without re-invoking [`read_lff`].
pub struct LffReader {
    lines: Lines<BufReader<File>>,
    level: Level,
    /// Group path currently in effect, once the first path line was seen.
    path: Option<String>,
    source: PathBuf,
}

impl Iterator for LffReader {
    type Item = Result<LffRecord, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(ConvertError::Io(format!(
                        "reading {}: {e}",
                        self.source.display()
                    ))))
                }
            };
            if line.starts_with('#') {
                continue;
            }
            if let Some(entry) = line.strip_prefix(INDENT) {
                let entry = entry.trim();
                if entry.is_empty() {
                    continue;
                }
                let Some(path) = self.path.clone() else {
                    return Some(Err(ConvertError::Structural(format!(
                        "{}: entry '{entry}' before any group path (path must be set)",
                        self.source.display()
                    ))));
                };
                let record = if path == UNCLASSIFIED_PATH {
                    Languoid::from_lff("", entry, self.level).map(LffRecord::Unclassified)
                } else {
                    Languoid::from_lff(&path, entry, self.level).map(LffRecord::Classified)
                };
                return Some(record);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                self.path = Some(trimmed.to_string());
            }
        }
    }
}
