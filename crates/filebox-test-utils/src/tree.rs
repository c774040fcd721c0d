//! [`TestTree`] builder for file store test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree with helpers for setup and assertion.
///
/// The store root lives in a `root/` subdirectory of the temp dir so that
/// tests can also place files *next to* the root, where a successful path
/// traversal would land.
///
/// # Example
///
/// ```rust,no_run
/// use filebox_test_utils::TestTree;
///
/// let tree = TestTree::new()
///     .with_file("docs/readme.md", "hello")
///     .with_dir("empty");
/// tree.assert_file_exists("docs/readme.md");
/// tree.assert_outside_untouched();
/// ```
pub struct TestTree {
    temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty root plus a `sentinel.txt` beside it.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::write(temp_dir.path().join("sentinel.txt"), "outside").unwrap();
        Self { temp_dir, root }
    }

    /// The directory to open a store on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory containing the root.
    pub fn outside(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` at `path` relative to the root, creating parents.
    pub fn with_file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.write(path, content);
        self
    }

    /// Create directory `path` relative to the root.
    pub fn with_dir(self, path: &str) -> Self {
        fs::create_dir_all(self.root.join(path)).unwrap();
        self
    }

    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    pub fn read(&self, path: &str) -> Vec<u8> {
        let full_path = self.root.join(path);
        fs::read(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) is a file.
    ///
    /// # Panics
    /// Panics with a descriptive message if it is not.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root.join(path);
        assert!(
            full_path.is_file(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) is a directory.
    pub fn assert_dir_exists(&self, path: &str) {
        let full_path = self.root.join(path);
        assert!(
            full_path.is_dir(),
            "Expected directory to exist: {}",
            full_path.display()
        );
    }

    /// Assert that nothing exists at `path` (relative to the root).
    pub fn assert_not_exists(&self, path: &str) {
        let full_path = self.root.join(path);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the only thing beside the root is still the untouched
    /// sentinel file.
    ///
    /// # Panics
    /// Panics if anything was created, removed or modified outside the root.
    pub fn assert_outside_untouched(&self) {
        let mut names: Vec<String> = fs::read_dir(self.outside())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["root".to_string(), "sentinel.txt".to_string()],
            "Unexpected entries beside the root"
        );

        let sentinel = fs::read_to_string(self.outside().join("sentinel.txt")).unwrap();
        assert_eq!(sentinel, "outside", "Sentinel file outside the root was modified");
    }
}
