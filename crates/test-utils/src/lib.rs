//! Shared test utilities for the rasterframe workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Band grid generators
//! - Catalog item fixtures in JSON form
//! - Approximate float assertions
//! - One-shot tracing setup
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures, item_json};
//! ```

use std::sync::Once;

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert every value of a slice is within `epsilon` of `expected`.
///
/// ```ignore
/// assert_all_approx_eq!(ndvi.data(), 0.6, 1e-12);
/// ```
#[macro_export]
macro_rules! assert_all_approx_eq {
    ($values:expr, $expected:expr, $epsilon:expr) => {{
        for value in $values.iter() {
            $crate::assert_approx_eq!(*value, $expected, $epsilon);
        }
    }};
}
