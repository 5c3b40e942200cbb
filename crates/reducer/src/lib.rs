//! # Failtrace Reducer
//!
//! Turns raw, noisy CI log text into a compact log that keeps the failure.
//!
//! ## Pipeline
//!
//! ```text
//! Raw log
//!     │
//!     ├──> Strip terminal escapes (CSI / OSC / ESC x), carriage-return overwrites
//!     │
//!     ├──> Strip leading ISO-8601 timestamps
//!     │
//!     ├──> Drop CI metadata directives (##[group], ::debug::, travis_fold, ...)
//!     │
//!     ├──> Squash blank runs, collapse repeated lines ("... (repeated N times)")
//!     │
//!     └──> Section selection
//!          ├─> Keep failing sections only (Azure / GitLab markers)
//!          └─> Tail-truncate, hoisting failure lines ahead of an omission marker
//! ```
//!
//! ## Example
//!
//! ```rust
//! use failtrace_reducer::{NoiseReducer, ReducerConfig};
//!
//! let reducer = NoiseReducer::new(ReducerConfig::default()).unwrap();
//! let cleaned = reducer.reduce("2024-01-01T10:00:00.1Z \x1b[31mError: boom\x1b[0m");
//! assert_eq!(cleaned, "Error: boom");
//! ```

mod collapse;
mod config;
mod error;
mod markers;
mod reducer;
mod sections;
mod strip;

pub use config::ReducerConfig;
pub use error::{ReducerError, Result};
pub use markers::{is_failure_signal, is_metadata_line, parse_section_marker, SectionMarker};
pub use reducer::{reduce, NoiseReducer, ReductionStats};
pub use strip::{strip_ansi, strip_timestamp};
