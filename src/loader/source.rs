//! Image sources and file selections
//!
//! A host shell (desktop picker, test harness, import script) hands the
//! loader a [`FileSelection`]. Each entry implements [`ImageSource`], which
//! abstracts over where the bytes actually live:
//! - [`PathSource`]: a file on disk, read without blocking the runtime
//! - [`BytesSource`]: bytes already in memory

use async_trait::async_trait;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Common trait for anything the loader can read an image from
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Display name of the source, if it has one (file name for paths)
    fn name(&self) -> Option<String>;

    /// Read the full contents of the source
    async fn read(&self) -> io::Result<Vec<u8>>;
}

/// A file on disk
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImageSource for PathSource {
    fn name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Bytes already held in memory
///
/// Hosts that receive picked file contents directly (web shells, tests)
/// wrap them here instead of round-tripping through the filesystem.
#[derive(Debug, Clone)]
pub struct BytesSource {
    name: Option<String>,
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { name: None, bytes }
    }

    pub fn named(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: Some(name.into()),
            bytes,
        }
    }
}

#[async_trait]
impl ImageSource for BytesSource {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// A file-selection event: the files a user picked, in selection order
///
/// Selections may be empty (the user cancelled the dialog). The loader
/// only ever reads the first entry; the rest are carried so hosts can
/// report how much of the selection was ignored.
#[derive(Default)]
pub struct FileSelection {
    sources: Vec<Box<dyn ImageSource>>,
}

impl FileSelection {
    /// A selection with no files (cancelled dialog)
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// A selection containing exactly one source
    pub fn single(source: impl ImageSource + 'static) -> Self {
        Self {
            sources: vec![Box::new(source)],
        }
    }

    /// Build a selection from filesystem paths, preserving order
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: paths
                .into_iter()
                .map(|path| Box::new(PathSource::new(path)) as Box<dyn ImageSource>)
                .collect(),
        }
    }

    /// Append a source to the selection
    pub fn push(&mut self, source: impl ImageSource + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// The first source in the selection, if any
    pub fn first(&self) -> Option<&dyn ImageSource> {
        self.sources.first().map(|source| source.as_ref())
    }

    /// Take the first source out of the selection, dropping the rest
    pub(crate) fn into_first(self) -> Option<Box<dyn ImageSource>> {
        self.sources.into_iter().next()
    }
}

impl fmt::Debug for FileSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSelection")
            .field("files", &self.sources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_path_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let source = PathSource::new(&path);
        assert_eq!(source.name().as_deref(), Some("sample.png"));
        assert_eq!(source.read().await.unwrap(), b"not really a png");
    }

    #[tokio::test]
    async fn test_path_source_missing_file_is_io_error() {
        let source = PathSource::new("/nonexistent/picked.png");
        assert!(source.read().await.is_err());
    }

    #[tokio::test]
    async fn test_bytes_source() {
        let anonymous = BytesSource::new(vec![1, 2, 3]);
        assert_eq!(anonymous.name(), None);
        assert_eq!(anonymous.read().await.unwrap(), vec![1, 2, 3]);

        let named = BytesSource::named("clipboard.png", vec![9]);
        assert_eq!(named.name().as_deref(), Some("clipboard.png"));
    }

    #[test]
    fn test_selection_first_preserves_order() {
        let mut selection = FileSelection::empty();
        selection.push(BytesSource::named("first.png", vec![1]));
        selection.push(BytesSource::named("second.png", vec![2]));

        assert_eq!(selection.len(), 2);
        assert_eq!(
            selection.first().unwrap().name().as_deref(),
            Some("first.png")
        );

        let first = selection.into_first().unwrap();
        assert_eq!(first.name().as_deref(), Some("first.png"));
    }

    #[test]
    fn test_empty_selection_has_no_first() {
        let selection = FileSelection::empty();
        assert!(selection.is_empty());
        assert!(selection.into_first().is_none());
    }

    #[test]
    fn test_from_paths_keeps_selection_order() {
        let selection = FileSelection::from_paths(["a.png", "b.png", "c.png"]);
        assert_eq!(selection.len(), 3);
        assert_eq!(
            selection.into_first().unwrap().name().as_deref(),
            Some("a.png")
        );
    }
}
