//! Alias table
//!
//! Side-loaded mapping from request path to redirect target, decoded from a
//! flat JSON object of strings. A missing or malformed alias file must never
//! keep the server from serving direct content.

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

/// Immutable mapping from source path to redirect target.
#[derive(Debug, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    /// Load aliases from a JSON file.
    ///
    /// An empty `path` means no alias file is configured and yields an empty
    /// table without an error. A non-empty path that cannot be opened or
    /// does not decode as a string-to-string object is an error; the caller
    /// is expected to log it and continue with an empty table.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        if path.is_empty() {
            return Ok(Self::default());
        }
        let file = File::open(path).map_err(|e| format!("opening alias file {path:?}: {e}"))?;
        let aliases: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("alias json decoding: {e}"))?;
        Ok(Self { aliases })
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.aliases.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            aliases: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn empty_path_means_no_aliases_configured() {
        let table = AliasTable::load("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn loads_flat_json_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aliases.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(br#"{"/old": "/new", "/feed": "https://example.com/rss.xml"}"#)
            .unwrap();

        let table = AliasTable::load(path.to_str().unwrap()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/old"), Some("/new"));
        assert_eq!(table.get("/feed"), Some("https://example.com/rss.xml"));
        assert_eq!(table.get("/missing"), None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(AliasTable::load(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aliases.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(br#"["not", "an", "object"]"#).unwrap();

        assert!(AliasTable::load(path.to_str().unwrap()).is_err());
    }
}
