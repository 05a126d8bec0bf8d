//! Core engine.
//!
//! - `extract`: parse source files and collect message declarations
//! - `diff`: compare declarations with locale stores
//! - `store`: load and save per-locale translation files
//! - `compile`: flatten stores into per-locale bundles
//! - `pipeline`: one complete sync run over a project

pub mod collation;
pub mod compile;
pub mod context;
pub mod data;
pub mod diff;
pub mod extract;
pub mod file_scanner;
pub mod json_writer;
pub mod parsers;
pub mod pipeline;
pub mod store;

pub use context::SyncContext;
pub use data::{MessageDeclaration, SkipReason, SkippedCallSite, SourceContext, SourceLocation};
pub use pipeline::{SyncOptions, SyncOutcome, run_sync};
