//! Whitelists of field names and how field keys are matched against them.

use serde::{Deserialize, Serialize};

use crate::fields::KEY_SEPARATOR;

/// How a whitelist entry matches a field key beyond the top-level segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The key must start with the entry.
    #[default]
    Exact,
    /// The key must contain the entry anywhere.
    Fuzzy,
}

impl MatchMode {
    /// Maps the boolean `fuzzy` flag used by named checks.
    #[must_use]
    pub const fn from_fuzzy(fuzzy: bool) -> Self {
        if fuzzy { Self::Fuzzy } else { Self::Exact }
    }
}

/// One field name or an ordered list of field names.
///
/// Deserializes from either a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "OneOrMany", into = "Vec<String>")]
pub struct Whitelist(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Whitelist {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(entry) => Self(vec![entry]),
            OneOrMany::Many(entries) => Self(entries),
        }
    }
}

impl From<Whitelist> for Vec<String> {
    fn from(value: Whitelist) -> Self {
        value.0
    }
}

impl Whitelist {
    /// Creates a whitelist from any list of names.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(Into::into).collect())
    }

    /// The entries in their original order and case.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Whether the whitelist names no usable field.
    ///
    /// A list made only of empty strings counts as blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(String::is_empty)
    }

    /// A copy with every entry lower-cased.
    #[must_use]
    pub fn to_lowercase(&self) -> Self {
        Self(self.0.iter().map(|entry| entry.to_lowercase()).collect())
    }
}

impl From<&str> for Whitelist {
    fn from(entry: &str) -> Self {
        Self(vec![entry.to_string()])
    }
}

impl From<String> for Whitelist {
    fn from(entry: String) -> Self {
        Self(vec![entry])
    }
}

impl From<Vec<String>> for Whitelist {
    fn from(entries: Vec<String>) -> Self {
        Self(entries)
    }
}

impl<const N: usize> From<[&str; N]> for Whitelist {
    fn from(entries: [&str; N]) -> Self {
        Self::new(entries)
    }
}

/// Whether a field key is selected by a whitelist.
///
/// The key's first segment is compared with every entry ignoring case. When
/// none matches, the entries are tried as prefixes of the whole key
/// ([`MatchMode::Exact`]) or as substrings of it ([`MatchMode::Fuzzy`]).
/// Prefix and substring matches are case-sensitive, so callers that want
/// case-insensitive selection pass a lower-cased whitelist.
#[must_use]
pub fn in_whitelist(key: &str, whitelist: &Whitelist, mode: MatchMode) -> bool {
    let top = key.split(KEY_SEPARATOR).next().unwrap_or(key).to_lowercase();
    if whitelist.entries().iter().any(|entry| entry.to_lowercase() == top) {
        return true;
    }

    whitelist.entries().iter().any(|entry| match mode {
        MatchMode::Fuzzy => key.contains(entry.as_str()),
        MatchMode::Exact => key.starts_with(entry.as_str()),
    })
}

/// Whether a field name appears in a list of generated keys.
///
/// The field is found when it is itself one of the keys, or when some key has
/// it as an inner segment (`a.field.b`) or as its last segment (`a.field`).
/// A key that merely starts with `field.` does not count on its own.
#[must_use]
pub fn find_field_in_keys<S: AsRef<str>>(field: &str, keys: &[S]) -> bool {
    let inner = format!(".{field}.");
    let suffix = format!(".{field}");

    let root_level = keys.iter().any(|key| key.as_ref() == field);
    root_level
        || keys.iter().any(|key| {
            let key = key.as_ref();
            key.contains(&inner) || key.ends_with(&suffix)
        })
}
