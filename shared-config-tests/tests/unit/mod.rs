//! Unit tests for shared-config
//!
//! These tests exercise the library modules directly with temporary roots.

mod config;
mod resolver;
