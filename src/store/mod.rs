//! In-memory content store
//!
//! Loads the whole site directory into a path-to-bytes map at startup.
//! Serving never touches the file system after this.

mod alias;

pub use alias::AliasTable;

use hyper::body::Bytes;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

/// Immutable mapping from request path to file content.
///
/// Keys always start with `/` and are the file paths relative to the site
/// root, e.g. `<root>/blog/post.html` becomes `/blog/post.html`.
pub struct ContentStore {
    files: HashMap<String, Bytes>,
}

impl ContentStore {
    /// Walk `root` recursively and read every regular file into memory.
    ///
    /// Directories whose base name matches an entry in `skip_dirs` are
    /// pruned entirely, at any depth. Any single unreadable file aborts the
    /// whole load; the server must not start with a partial store.
    pub fn load(root: &Path, skip_dirs: &[&str]) -> io::Result<Self> {
        let mut files = HashMap::new();
        walk(root, root, skip_dirs, &mut files)?;
        Ok(Self { files })
    }

    pub fn get(&self, path: &str) -> Option<&Bytes> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_entries<I, P, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, B)>,
        P: Into<String>,
        B: Into<Bytes>,
    {
        Self {
            files: entries
                .into_iter()
                .map(|(p, b)| (p.into(), b.into()))
                .collect(),
        }
    }
}

fn walk(
    dir: &Path,
    root: &Path,
    skip_dirs: &[&str],
    files: &mut HashMap<String, Bytes>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            let name = entry.file_name();
            if skip_dirs.iter().any(|skip| name == OsStr::new(skip)) {
                continue;
            }
            walk(&path, root, skip_dirs, files)?;
        } else {
            let content = fs::read(&path).map_err(|e| {
                io::Error::new(e.kind(), format!("couldn't read {}: {e}", path.display()))
            })?;
            files.insert(request_key(root, &path), Bytes::from(content));
        }
    }
    Ok(())
}

/// Derive the request path for a file: strip the root prefix and keep a
/// leading separator.
fn request_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut key = String::new();
    for component in relative.components() {
        key.push('/');
        key.push_str(&component.as_os_str().to_string_lossy());
    }
    key
}
