//! IR verifier.

use alloc::{string::String, vec::Vec};

use crate::{code::Code, entity::Block};

mod cfg;
mod format;
mod layout;

pub use cfg::verify_cfg;
pub use format::verify_format;
pub use layout::verify_layout;

/// Verifier error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierError {
    /// Error message describing what's wrong
    pub message: String,
    /// Optional location information (e.g., "block0")
    pub location: Option<String>,
}

impl VerifierError {
    pub fn new(message: String) -> Self {
        Self {
            message,
            location: None,
        }
    }

    pub fn with_location(message: String, location: String) -> Self {
        Self {
            message,
            location: Some(location),
        }
    }
}

impl core::fmt::Display for VerifierError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl core::error::Error for VerifierError {}

/// Verify that `code` is well-formed.
///
/// Runs every check and returns all errors found, not just the first.
pub fn verify(code: &Code) -> Result<(), Vec<VerifierError>> {
    let mut errors = Vec::new();

    verify_layout(code, &mut errors);
    verify_format(code, &mut errors);
    verify_cfg(code, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether `block` is a valid block currently placed in the layout.
pub(crate) fn is_laid_out(code: &Code, block: Block) -> bool {
    code.is_valid_block(block) && code.layout().get(code[block].index) == Some(&block)
}
