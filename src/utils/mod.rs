pub mod paths;

// Trait-based abstraction for testability
pub mod probe;

// Re-export commonly used types and traits (used by test crate)
pub use paths::expand_tilde;
pub use probe::{FsProbe, PathProbe};
