//! Shared Config Library
//!
//! Resolves configuration items between a machine-specific backup root and a
//! shared backup root, and deep-merges configuration documents over defaults.

pub mod config;
pub mod managers;
pub mod merge;
pub mod resolver;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, resolve_roots, Config, ItemConfig, ResolvedRoots};
pub use managers::items::{ItemManager, LoadedItem};
pub use managers::logging::{init_console_logging, init_logging, LogGuard, LoggingConfig};
pub use merge::{merge, merge_layers, merge_values, ConfigValue, Mapping, MergeError};
pub use resolver::{resolve, ResolutionReport, ResolutionRequest, ResolutionResult, ResolveError, Resolver};
