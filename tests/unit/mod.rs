//! Unit test suite for modgraph
//!
//! Library-level tests through the public API only.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod descriptor_api;
mod gasp_scenario;
mod manifest_loading;
mod resolution_properties;
