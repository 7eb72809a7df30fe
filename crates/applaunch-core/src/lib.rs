//! # applaunch-core - Core Domain Types
//!
//! Foundation crate for App Launcher. Provides domain types, error handling,
//! logging setup, and application identifier validation and detection.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Platform`] - Android or iOS
//! - [`Device`] - A target device as reported by `adb` / `idb`
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Identifiers (`identifier`, `detection`)
//! - [`is_valid()`] / [`find_identifier()`] - Reverse-domain identifier grammar
//! - [`detect()`] - Find the identifier declared in Gradle / Xcode project files
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use applaunch_core::prelude::*;
//! ```

pub mod detection;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod prelude;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use detection::detect;
pub use error::{Error, Result, ResultExt};
pub use identifier::{find_identifier, is_valid};
pub use types::{Device, Platform};
