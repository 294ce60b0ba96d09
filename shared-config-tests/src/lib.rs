//! Test utilities for shared-config
//!
//! This crate provides shared test utilities, fixtures and helper functions
//! for testing the shared-config library.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_utils::{ConfigBuilder, TestContext};
//!
//! #[test]
//! fn my_test() {
//!     let builder = ConfigBuilder::minimal().add_item("display", "display.json");
//!     builder.write_machine_file("display.json", r#"{"Theme": "Dark"}"#);
//!     let (config, _temp_dir) = builder.persist();
//!     // ... test code
//! }
//! ```

pub mod config_builder;
pub mod fixtures;
pub mod test_context;

// Re-export commonly used items
pub use config_builder::ConfigBuilder;
pub use fixtures::*;
pub use test_context::{ResultAssertions, TestContext};

// Re-export types from the main crate for convenience
pub use shared_config::config::{Config, GlobalConfig, ItemConfig, ResolvedRoots};
pub use shared_config::merge::{ConfigValue, Mapping};
pub use shared_config::resolver::{ResolutionKind, ResolutionRequest, ResolutionResult, Resolver};

// Re-export mock implementations from the main crate
pub use shared_config::utils::probe::mock::MockProbe;
pub use shared_config::utils::probe::PathProbe;
