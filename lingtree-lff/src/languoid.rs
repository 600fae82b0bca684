//! The languoid model and the lff token grammar
//!
//! A languoid is any node of the classification: family, language, or dialect.
//! Identity is an opaque alphanumeric code that stays stable across
//! reconstructions; the display name may change between runs (a rename), the
//! level may not.
//!
//! The flat format spells a node as a `name.id` token. The id is everything
//! after the *last* dot, so names containing dots survive the round trip. Two
//! optional suffixes are understood: a `:family`/`:language`/`:dialect` level
//! marker overriding the positional level of a path segment, and a trailing
//! `[iso]` ISO 639-3 code on language lines. Group paths join tokens with
//! `" / "`.
//!
//! Lineage levels are positional. In a language listing every ancestor is a
//! family. In a dialect listing the first path segment is the language and the
//! rest are dialects; the family chain is not repeated there and is recovered
//! from the language's own lff entry during tree building.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConvertError;
use crate::infofile;
use crate::slug::slug;

/// Separator between `name.id` segments of a group path.
pub const PATH_SEPARATOR: &str = " / ";

/// Group path standing in for an empty lineage (isolates and top-level
/// families have no ancestors, but the flat format needs a path line).
pub const ISOLATES_PATH: &str = "-isolates-";

/// Classification level of a node. Immutable for a given identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Family,
    Language,
    Dialect,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Family => "family",
            Level::Language => "language",
            Level::Dialect => "dialect",
        }
    }

    /// Flat-format file name for listings of this level: `lff.txt`, `dff.txt`.
    pub fn ff_filename(&self) -> String {
        let first = self.as_str().chars().next().unwrap_or('x');
        format!("{first}ff.txt")
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "family" => Ok(Level::Family),
            "language" => Ok(Level::Language),
            "dialect" => Ok(Level::Dialect),
            other => Err(ConvertError::Parse(format!(
                "'{other}' is not a level (family, language or dialect)"
            ))),
        }
    }
}

/// One ancestor in a lineage: `(name, id, level)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageEntry {
    pub name: String,
    pub id: String,
    pub level: Level,
}

impl LineageEntry {
    fn token(&self) -> String {
        format!("{}.{}", self.name, self.id)
    }
}

/// One classification node with its resolved ancestor chain.
///
/// `lineage` runs from the root ancestor down to the immediate parent and
/// never includes the node itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languoid {
    pub id: String,
    pub name: String,
    pub level: Level,
    pub lineage: Vec<LineageEntry>,
    /// ISO 639-3 code, carried on language-level nodes when known.
    pub iso: Option<String>,
}

impl Languoid {
    /// A fresh node with no ancestry and no metadata beyond the identity
    /// itself. Used when the listing introduces an id the old tree never had.
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: Level) -> Self {
        Languoid {
            id: id.into(),
            name: name.into(),
            level,
            lineage: Vec::new(),
            iso: None,
        }
    }

    /// Parse one flat-format entry: the current group path plus the node's own
    /// line, at the level the listing is declared for.
    pub fn from_lff(path: &str, line: &str, level: Level) -> Result<Languoid, ConvertError> {
        let token = parse_token(line.trim())?;
        if let Some(marker) = token.marker {
            if marker != level {
                return Err(ConvertError::Parse(format!(
                    "entry '{}' carries level marker '{marker}' in a {level} listing",
                    line.trim()
                )));
            }
        }

        let path = path.trim();
        let mut lineage = Vec::new();
        if !path.is_empty() && path != ISOLATES_PATH {
            for (pos, segment) in path.split(PATH_SEPARATOR).enumerate() {
                let seg = parse_token(segment.trim())?;
                if seg.iso.is_some() {
                    return Err(ConvertError::Parse(format!(
                        "path segment '{}' must not carry an iso code",
                        segment.trim()
                    )));
                }
                let positional = match level {
                    Level::Dialect if pos == 0 => Level::Language,
                    Level::Dialect => Level::Dialect,
                    _ => Level::Family,
                };
                lineage.push(LineageEntry {
                    name: seg.name,
                    id: seg.id,
                    level: seg.marker.unwrap_or(positional),
                });
            }
        }

        Ok(Languoid {
            id: token.id,
            name: token.name,
            level,
            lineage,
            iso: token.iso,
        })
    }

    /// Render the lineage as a flat-format group path.
    ///
    /// Dialect lineages drop their family prefix: the dialect listing only
    /// spells the language and any intermediate dialects, exactly what
    /// [`Languoid::from_lff`] expects back.
    pub fn lff_group(&self) -> String {
        let tokens: Vec<String> = self
            .lineage
            .iter()
            .filter(|entry| self.level != Level::Dialect || entry.level != Level::Family)
            .map(LineageEntry::token)
            .collect();
        if tokens.is_empty() {
            ISOLATES_PATH.to_string()
        } else {
            tokens.join(PATH_SEPARATOR)
        }
    }

    /// Render the node itself as a flat-format line token.
    pub fn lff_language(&self) -> String {
        match &self.iso {
            Some(iso) => format!("{}.{} [{iso}]", self.name, self.id),
            None => format!("{}.{}", self.name, self.id),
        }
    }

    /// Deterministic directory name: `slug(name).id`.
    pub fn fname(&self) -> String {
        format!("{}.{}", slug(&self.name), self.id)
    }

    /// Persist this node's metadata as the info file of `dir`, overwriting
    /// any existing one.
    pub fn write_info(&self, dir: &Path) -> Result<(), ConvertError> {
        infofile::write(dir, self)
    }
}

struct Token {
    name: String,
    id: String,
    marker: Option<Level>,
    iso: Option<String>,
}

/// Parse a `name.id[:level][ [iso]]` token.
fn parse_token(token: &str) -> Result<Token, ConvertError> {
    let original = token;

    let (token, iso) = match token.strip_suffix(']') {
        Some(head) => match head.rsplit_once('[') {
            Some((body, iso)) => {
                if iso.len() != 3 || !iso.chars().all(|c| c.is_ascii_lowercase()) {
                    return Err(ConvertError::Parse(format!(
                        "token '{original}': '[{iso}]' is not an ISO 639-3 code"
                    )));
                }
                (body.trim_end(), Some(iso.to_string()))
            }
            None => (token, None),
        },
        None => (token, None),
    };

    // A marker tail is only ever a bare level word; for a well-formed
    // name.id token the text after the last ':' still contains the id dot,
    // so names containing colons do not false-positive here.
    let (token, marker) = match token.rsplit_once(':') {
        Some((head, tail)) => match Level::from_str(tail) {
            Ok(level) => (head, Some(level)),
            Err(_) => (token, None),
        },
        None => (token, None),
    };

    let (name, id) = token.rsplit_once('.').ok_or_else(|| {
        ConvertError::Parse(format!("token '{original}' does not match name.id"))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ConvertError::Parse(format!(
            "token '{original}' has an empty name"
        )));
    }
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConvertError::Parse(format!(
            "token '{original}': id '{id}' must be non-empty ASCII alphanumeric"
        )));
    }

    Ok(Token {
        name: name.to_string(),
        id: id.to_string(),
        marker,
        iso,
    })
}
