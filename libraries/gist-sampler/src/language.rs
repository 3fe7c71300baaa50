use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Language labels that never make a good quiz answer: data, markup and config formats,
/// plus a few labels GitHub assigns to files that are rarely code.
///
/// Entries are stored normalized (trimmed, lowercase).
pub const IGNORED_LANGUAGES: &[&str] = &[
    "markdown",
    "json",
    "text",
    "ignore list",
    "xml",
    "jupyter notebook",
    "csv",
    "maven pom",
    "yaml",
    "autohotkey",
    "tsv",
    "restructuredtext",
    "vcl",
    "diff",
    "tex",
    "toml",
    "windows registry entries",
    "svg",
    "ballerina",
    "org",
];

static IGNORED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| IGNORED_LANGUAGES.iter().copied().collect());

/// A normalized programming language label that is allowed as a quiz answer.
///
/// The only way to get one is [`Language::parse`], so a `Language` is never empty and
/// never on the ignore-list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(String);

impl Language {
    /// Trim and lowercase `label`, rejecting empty and ignored labels.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        if normalized.is_empty() || IGNORED.contains(normalized.as_str()) {
            return None;
        }
        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether a declared language label can be used as a quiz answer.
pub fn is_valid_language(label: &str) -> bool {
    Language::parse(label).is_some()
}
