//! Reader/writer for the per-directory info file
//!
//! Every directory of a tree except the root holds exactly one `md.ini`
//! keyed to the directory's identity suffix. The carrier syntax is ours, so
//! the serializer is ours too; the `[core]` section holds the fields the
//! conversion needs and unknown sections or keys are ignored on read.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConvertError;
use crate::languoid::{Languoid, Level};

/// File name of the info file inside a node directory.
pub const INFO_FILENAME: &str = "md.ini";

/// The fields read back from an info file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRecord {
    pub id: String,
    pub name: String,
    pub level: Level,
    pub iso: Option<String>,
}

/// Write `node`'s metadata into `dir/md.ini`, replacing any existing file.
pub fn write(dir: &Path, node: &Languoid) -> Result<(), ConvertError> {
    let mut out = String::new();
    out.push_str("[core]\n");
    out.push_str(&format!("id = {}\n", node.id));
    out.push_str(&format!("name = {}\n", node.name));
    out.push_str(&format!("level = {}\n", node.level));
    if let Some(iso) = &node.iso {
        out.push_str(&format!("iso = {iso}\n"));
    }
    let path = dir.join(INFO_FILENAME);
    fs::write(&path, out)
        .map_err(|e| ConvertError::Io(format!("writing {}: {e}", path.display())))
}

/// Read the info file of `dir`.
///
/// Missing file or missing `[core]` fields are structural errors: a directory
/// without a well-formed info file is not a languoid directory.
pub fn read(dir: &Path) -> Result<InfoRecord, ConvertError> {
    let path = dir.join(INFO_FILENAME);
    let text = fs::read_to_string(&path).map_err(|e| {
        ConvertError::Structural(format!("missing info file {}: {e}", path.display()))
    })?;

    let mut in_core = false;
    let mut id = None;
    let mut name = None;
    let mut level = None;
    let mut iso = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_core = section == "core";
            continue;
        }
        if !in_core {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| {
            ConvertError::Structural(format!("malformed line '{line}' in {}", path.display()))
        })?;
        match key.trim() {
            "id" => id = Some(value.trim().to_string()),
            "name" => name = Some(value.trim().to_string()),
            "level" => level = Some(Level::from_str(value.trim()).map_err(|e| {
                ConvertError::Structural(format!("{} in {}", e, path.display()))
            })?),
            "iso" => iso = Some(value.trim().to_string()),
            _ => {}
        }
    }

    let missing = |field: &str| {
        ConvertError::Structural(format!("{}: no '{field}' in [core]", path.display()))
    };
    Ok(InfoRecord {
        id: id.ok_or_else(|| missing("id"))?,
        name: name.ok_or_else(|| missing("name"))?,
        level: level.ok_or_else(|| missing("level"))?,
        iso,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let mut node = Languoid::new("dani1285", "Danish", Level::Language);
        node.iso = Some("dan".to_string());
        write(dir.path(), &node).unwrap();

        let record = read(dir.path()).unwrap();
        assert_eq!(record.id, "dani1285");
        assert_eq!(record.name, "Danish");
        assert_eq!(record.level, Level::Language);
        assert_eq!(record.iso.as_deref(), Some("dan"));
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        write(dir.path(), &Languoid::new("x1", "Old", Level::Family)).unwrap();
        write(dir.path(), &Languoid::new("x1", "New", Level::Family)).unwrap();
        assert_eq!(read(dir.path()).unwrap().name, "New");
    }

    #[test]
    fn unknown_keys_and_sections_are_ignored() {
        let dir = tempdir().unwrap();
        let text = "[core]\nid = abc1\nname = Abc\nlevel = dialect\nextra = yes\n\n[sources]\nref = none\n";
        fs::write(dir.path().join(INFO_FILENAME), text).unwrap();
        let record = read(dir.path()).unwrap();
        assert_eq!(record.id, "abc1");
        assert_eq!(record.level, Level::Dialect);
    }

    #[test]
    fn missing_file_is_structural() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read(dir.path()),
            Err(ConvertError::Structural(_))
        ));
    }

    #[test]
    fn missing_field_is_structural() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(INFO_FILENAME), "[core]\nid = abc1\n").unwrap();
        assert!(matches!(
            read(dir.path()),
            Err(ConvertError::Structural(_))
        ));
    }

    #[test]
    fn bad_level_is_structural() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(INFO_FILENAME),
            "[core]\nid = a1\nname = A\nlevel = macrofamily\n",
        )
        .unwrap();
        assert!(matches!(
            read(dir.path()),
            Err(ConvertError::Structural(_))
        ));
    }
}
