//! Integration test suite for modgraph
//!
//! End-to-end tests that run the compiled `modgraph` binary against manifests
//! written to temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolve**: `resolve` output in text and JSON, single and all targets
//! - **validate**: `validate` diagnostics and strict mode
//! - **tree**: `tree` rendering and depth limits
//! - **surface**: `surface` output
//! - **context_layering**: flags, environment and `[build]` precedence
//! - **errors**: exit codes and user-facing error messages

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod context_layering;
mod errors;
mod surface;
mod validate;
