//! Existence probing abstraction for testability
//!
//! The resolver only ever asks whether an entry exists at a path. This module
//! puts that question behind a trait so the probe order can be observed in
//! tests without touching the filesystem.

use std::path::Path;

/// Abstraction over "does something exist at this path", enabling mocking in tests
pub trait PathProbe: Send + Sync {
    /// Return true if a file or directory exists at `path`
    fn exists(&self, path: &Path) -> bool;
}

/// Default implementation backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FsProbe {
    pub fn new() -> Self {
        Self
    }
}

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl<P: PathProbe + ?Sized> PathProbe for &P {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// A mock probe that answers from a fixed set of paths and records every probe
/// Available for use in external test crates
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Mock probe for testing
    #[derive(Debug, Clone, Default)]
    pub struct MockProbe {
        /// Recorded probes, in call order
        pub calls: Arc<Mutex<Vec<PathBuf>>>,
        /// Paths reported as existing
        present: Arc<Mutex<HashSet<PathBuf>>>,
    }

    impl MockProbe {
        pub fn new() -> Self {
            Self::default()
        }

        /// Report `path` as existing
        pub fn with_entry(self, path: impl Into<PathBuf>) -> Self {
            self.present.lock().unwrap().insert(path.into());
            self
        }

        /// Get all recorded probes
        pub fn get_calls(&self) -> Vec<PathBuf> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of probes made so far
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Check if a path was probed
        pub fn was_probed(&self, path: &Path) -> bool {
            self.calls.lock().unwrap().iter().any(|p| p == path)
        }
    }

    impl PathProbe for MockProbe {
        fn exists(&self, path: &Path) -> bool {
            self.calls.lock().unwrap().push(path.to_path_buf());
            self.present.lock().unwrap().contains(path)
        }
    }
}
