//! Path resolution between machine-specific and shared backup roots
//!
//! A configuration item lives at the same relative path under two roots.
//! The machine root always wins: if anything exists there, the shared root is
//! never consulted, even when the shared copy is newer or more complete.
//!
//! ## Example Usage
//!
//! ```no_run
//! use shared_config::resolver::{resolve, ResolutionResult};
//!
//! match resolve("display.json", "D:/Backups/WORKSTATION", "D:/Backups/shared")? {
//!     ResolutionResult::Machine(path) => println!("machine: {}", path.display()),
//!     ResolutionResult::Shared(path) => println!("shared: {}", path.display()),
//!     ResolutionResult::NotFound => println!("no backup found"),
//! }
//! # Ok::<(), shared_config::resolver::ResolveError>(())
//! ```

use crate::utils::paths::is_rooted;
use crate::utils::probe::{FsProbe, PathProbe};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// A single lookup of a relative item path under both roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub relative_path: PathBuf,
    pub machine_root: PathBuf,
    pub shared_root: PathBuf,
}

impl ResolutionRequest {
    pub fn new(
        relative_path: impl Into<PathBuf>,
        machine_root: impl Into<PathBuf>,
        shared_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            machine_root: machine_root.into(),
            shared_root: shared_root.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.machine_root.as_os_str().is_empty() {
            return Err(ResolveError::InvalidArgument(
                "machine root must not be empty".to_string(),
            ));
        }

        if self.shared_root.as_os_str().is_empty() {
            return Err(ResolveError::InvalidArgument(
                "shared root must not be empty".to_string(),
            ));
        }

        if self.relative_path.as_os_str().is_empty() {
            return Err(ResolveError::InvalidArgument(
                "relative path must not be empty".to_string(),
            ));
        }

        // Joining a rooted path would silently discard the root
        if is_rooted(&self.relative_path) {
            return Err(ResolveError::InvalidArgument(format!(
                "relative path must not be absolute: {}",
                self.relative_path.display()
            )));
        }

        Ok(())
    }
}

/// Where an item was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    Machine(PathBuf),
    Shared(PathBuf),
    NotFound,
}

impl ResolutionResult {
    /// Resolved absolute path, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Machine(path) | Self::Shared(path) => Some(path),
            Self::NotFound => None,
        }
    }

    pub fn kind(&self) -> ResolutionKind {
        match self {
            Self::Machine(_) => ResolutionKind::Machine,
            Self::Shared(_) => ResolutionKind::Shared,
            Self::NotFound => ResolutionKind::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{} ({})", self.kind(), path.display()),
            None => write!(f, "{}", self.kind()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    Machine,
    Shared,
    NotFound,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Machine => "machine",
            Self::Shared => "shared",
            Self::NotFound => "not_found",
        };
        f.write_str(s)
    }
}

/// Serializable form of a resolution: `{"kind": ..., "path": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub kind: ResolutionKind,
    pub path: Option<String>,
}

impl From<&ResolutionResult> for ResolutionReport {
    fn from(result: &ResolutionResult) -> Self {
        Self {
            kind: result.kind(),
            path: result.path().map(|p| p.display().to_string()),
        }
    }
}

/// Resolver over a pluggable existence probe
#[derive(Debug, Clone, Default)]
pub struct Resolver<P: PathProbe = FsProbe> {
    probe: P,
}

impl Resolver<FsProbe> {
    /// Resolver backed by the real filesystem
    pub fn new() -> Self {
        Self { probe: FsProbe }
    }
}

impl<P: PathProbe> Resolver<P> {
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    /// Resolve one item: machine root first, then shared root
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<ResolutionResult> {
        request.validate()?;

        let candidate_machine = request.machine_root.join(&request.relative_path);
        if self.probe.exists(&candidate_machine) {
            debug!("Resolved {:?} under machine root", request.relative_path);
            return Ok(ResolutionResult::Machine(candidate_machine));
        }

        let candidate_shared = request.shared_root.join(&request.relative_path);
        if self.probe.exists(&candidate_shared) {
            debug!("Resolved {:?} under shared root", request.relative_path);
            return Ok(ResolutionResult::Shared(candidate_shared));
        }

        debug!("No entry for {:?} under either root", request.relative_path);
        Ok(ResolutionResult::NotFound)
    }

    /// Resolve several requests in order, stopping at the first invalid one
    pub fn resolve_all<'a, I>(&self, requests: I) -> Result<Vec<ResolutionResult>>
    where
        I: IntoIterator<Item = &'a ResolutionRequest>,
    {
        requests.into_iter().map(|r| self.resolve(r)).collect()
    }
}

/// Resolve `relative_path` against the real filesystem
pub fn resolve(
    relative_path: impl AsRef<Path>,
    machine_root: impl AsRef<Path>,
    shared_root: impl AsRef<Path>,
) -> Result<ResolutionResult> {
    let request = ResolutionRequest::new(
        relative_path.as_ref(),
        machine_root.as_ref(),
        shared_root.as_ref(),
    );
    Resolver::new().resolve(&request)
}
