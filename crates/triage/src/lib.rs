//! # Failtrace Triage
//!
//! Runs the full failure triage over one CI log: noise reduction first, then
//! file reference extraction over the cleaned text.
//!
//! ```text
//! raw bytes ──> UTF-8 decode ──> NoiseReducer ──> cleaned log ──┬──> TriageReport.cleaned_log
//!                                                               └──> Extractor + LinkBuilder
//!                                                                     └──> TriageReport.affected_files
//! ```
//!
//! ## Example
//!
//! ```rust
//! use failtrace_extractor::LinkBuilder;
//! use failtrace_triage::{JobMetadata, Pipeline, TriageConfig};
//!
//! let links = LinkBuilder::new(None, Some("octo/app"), Some("abc1234")).unwrap();
//! let pipeline = Pipeline::new(TriageConfig::default(), links).unwrap();
//!
//! let report = pipeline.run(
//!     "2024-01-01T00:00:00Z src/calc.py:42: AssertionError",
//!     &JobMetadata::new("test", "pytest"),
//! );
//! assert_eq!(report.cleaned_log, "src/calc.py:42: AssertionError");
//! assert_eq!(report.affected_files[0].location(), "src/calc.py:42");
//! ```

mod config;
mod error;
mod job;
mod pipeline;
mod report;

pub use config::TriageConfig;
pub use error::{Result, TriageError};
pub use job::{format_duration, JobMetadata};
pub use pipeline::Pipeline;
pub use report::TriageReport;
