use indexmap::IndexMap;
use serde::Deserialize;

use crate::Language;

/// A gist as returned by the public gist listing.
///
/// Only the fields the quiz looks at are modelled; anything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGist {
    pub id: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Files keyed by filename, in the order the listing returned them.
    #[serde(default)]
    pub files: IndexMap<String, FileDescriptor>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileDescriptor {
    #[serde(default)]
    pub filename: Option<String>,
    /// Free-text language label; GitHub sends `null` when it cannot tell.
    #[serde(default)]
    pub language: Option<String>,
    /// Missing on some listing entries; such files cannot be shown.
    #[serde(default)]
    pub raw_url: Option<String>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// A gist whose first file has a usable language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedGist {
    pub id: String,
    pub filename: String,
    pub language: Language,
    pub raw_url: String,
    pub html_url: Option<String>,
    pub owner: Option<String>,
    /// Raw text of the first file. Empty until the round's content is fetched.
    pub content: String,
}

impl ValidatedGist {
    /// Validate a raw gist by looking at its first file only.
    pub fn from_raw(gist: RawGist) -> Option<Self> {
        let (key, file) = gist.files.into_iter().next()?;
        let language = Language::parse(file.language.as_deref()?)?;
        let raw_url = file.raw_url.filter(|url| !url.trim().is_empty())?;

        Some(Self {
            id: gist.id,
            filename: file.filename.unwrap_or(key),
            language,
            raw_url,
            html_url: gist.html_url,
            owner: gist.owner.map(|owner| owner.login),
            content: String::new(),
        })
    }
}

/// Keep the gists whose first file declares a valid language.
pub fn filter_gists(gists: Vec<RawGist>) -> Vec<ValidatedGist> {
    let total = gists.len();
    let validated: Vec<ValidatedGist> = gists
        .into_iter()
        .filter_map(ValidatedGist::from_raw)
        .collect();

    log::debug!("{} of {total} gists have a usable language", validated.len());
    validated
}

/// Run the language check again over an already validated pool.
pub fn refilter(pool: Vec<ValidatedGist>) -> Vec<ValidatedGist> {
    pool.into_iter()
        .filter(|gist| crate::is_valid_language(gist.language.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::raw_gist;

    #[test]
    fn test_only_first_file_counts() {
        let gist: RawGist = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "files": {
                "README.md": {"language": "Markdown", "raw_url": "https://x/readme"},
                "main.rs": {"language": "Rust", "raw_url": "https://x/main"}
            }
        }))
        .unwrap();

        assert_eq!(ValidatedGist::from_raw(gist), None);

        let gist: RawGist = serde_json::from_value(serde_json::json!({
            "id": "def",
            "files": {
                "main.rs": {"filename": "main.rs", "language": "Rust", "raw_url": "https://x/main"},
                "README.md": {"language": "Markdown", "raw_url": "https://x/readme"}
            }
        }))
        .unwrap();

        let validated = ValidatedGist::from_raw(gist).unwrap();
        assert_eq!(validated.language.as_str(), "rust");
        assert_eq!(validated.filename, "main.rs");
        assert_eq!(validated.raw_url, "https://x/main");
        assert!(validated.content.is_empty());
    }

    #[test]
    fn test_discards_missing_languages_and_empty_gists() {
        let no_files: RawGist =
            serde_json::from_value(serde_json::json!({"id": "empty", "files": {}})).unwrap();

        let gists = vec![
            raw_gist("1", Some("Go")),
            raw_gist("2", None),
            raw_gist("3", Some("")),
            raw_gist("4", Some("JSON")),
            no_files,
            raw_gist("5", Some(" Python ")),
        ];

        let ids: Vec<String> = filter_gists(gists).into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn test_null_fields_deserialize() {
        let gist: RawGist = serde_json::from_value(serde_json::json!({
            "id": "n",
            "description": null,
            "owner": {"login": "octocat", "id": 1},
            "files": {
                "x": {"filename": "x", "language": null, "raw_url": "https://x/x", "size": 3}
            },
            "comments": 0,
            "truncated": false
        }))
        .unwrap();

        assert_eq!(gist.owner.unwrap().login, "octocat");
        assert!(gist.files["x"].language.is_none());
    }

    #[test]
    fn test_missing_raw_url_drops_only_that_gist() {
        let page: Vec<RawGist> = serde_json::from_value(serde_json::json!([
            {"id": "a", "files": {"a.rs": {"language": "Rust"}}},
            {"id": "b", "files": {"b.go": {"language": "Go", "raw_url": null}}},
            {"id": "c", "files": {"c.py": {"language": "Python", "raw_url": ""}}},
            {"id": "d", "files": {"d.rb": {"language": "Ruby", "raw_url": "https://x/d"}}}
        ]))
        .unwrap();

        let ids: Vec<String> = filter_gists(page).into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["d"]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let gists = vec![
            raw_gist("1", Some("Rust")),
            raw_gist("2", Some("yaml")),
            raw_gist("3", Some("Kotlin")),
            raw_gist("4", None),
        ];

        let once = filter_gists(gists);
        let twice = refilter(once.clone());
        assert_eq!(once, twice);
    }
}
