//! Test utilities for modgraph
//!
//! Shared logging setup and manifest fixtures for unit and integration tests.
//! Enabled for the crate's own tests and, through the `test-utils` feature, for
//! the test suites under `tests/`.
//!
//! # Example
//!
//! ```rust,no_run
//! use modgraph_cli::test_utils::{ManifestFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let dir = tempfile::TempDir::new().unwrap();
//! let path = ManifestFixture::gasp().write_to(dir.path()).unwrap();
//! assert!(path.ends_with("modgraph.toml"));
//! ```

pub mod fixtures;

pub use fixtures::{GASP_MANIFEST, ManifestFixture, gasp_builder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. An explicit `level` wins; otherwise
/// `RUST_LOG` is used when set, and without either nothing is logged.
///
/// ```bash
/// RUST_LOG=modgraph_cli=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
