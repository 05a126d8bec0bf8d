//! Lingo - message extraction and compilation for react-intl projects
//!
//! Lingo scans JavaScript/TypeScript sources for message declarations
//! (`formatMessage`, `defineMessages`, `<FormattedMessage>`), keeps the
//! reference locale's translation store in sync with them, and compiles a
//! flat bundle for every configured locale.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, reporting)
//! - `config`: Configuration file loading and validation
//! - `core`: Scan, diff, store and compile pipeline
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
