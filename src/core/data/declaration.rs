use std::fmt;

use super::SourceContext;

/// A message declared at a call site, e.g.
/// `intl.formatMessage({ id: "nav.about", defaultMessage: "about" })`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDeclaration {
    pub id: String,
    pub default_message: String,
    pub description: Option<String>,
    pub context: SourceContext,
}

impl MessageDeclaration {
    /// Two declarations agree when they would write the same store value.
    pub fn same_content(&self, other: &Self) -> bool {
        self.id == other.id && self.default_message == other.default_message
    }
}

/// Why a call site could not be turned into a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkipReason {
    /// A `defaultMessage` without any `id`.
    MissingId,
    /// `id` is not a literal: `formatMessage({ id: key, ... })`
    DynamicId,
    /// `defaultMessage` is not a literal: `defaultMessage={label}`
    DynamicDefaultMessage,
    /// Literal `id` but no `defaultMessage` at all.
    MissingDefaultMessage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingId => write!(f, "id is missing"),
            SkipReason::DynamicId => write!(f, "id is not a string literal"),
            SkipReason::DynamicDefaultMessage => {
                write!(f, "defaultMessage is not a string literal")
            }
            SkipReason::MissingDefaultMessage => write!(f, "defaultMessage is missing"),
        }
    }
}

/// A recognised call site that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCallSite {
    pub context: SourceContext,
    pub reason: SkipReason,
    /// The literal id, when there was one.
    pub id: Option<String>,
}
