//! Core data types shared by the scanner, the differ and the reporter.
//!
//! - `declaration`: message declarations extracted from source
//! - `source`: source code location types (SourceContext, SourceLocation)

pub mod declaration;
pub mod source;

pub use declaration::{MessageDeclaration, SkipReason, SkippedCallSite};
pub use source::{SourceContext, SourceLocation};
