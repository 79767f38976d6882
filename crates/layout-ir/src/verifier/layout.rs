//! Layout and entrypoint verification.

use alloc::{format, vec::Vec};

use super::is_laid_out;
use crate::{code::Code, entity_map::EntitySet, VerifierError};

/// Verify the layout and the entrypoints
///
/// Checks:
/// - There is at least one entrypoint and every entrypoint is laid out
/// - No block appears twice in the layout
/// - Every laid out block records its own position
pub fn verify_layout(code: &Code, errors: &mut Vec<VerifierError>) {
    if code.num_entrypoints() == 0 {
        errors.push(VerifierError::new(format!(
            "code @{} has no entrypoint",
            code.name
        )));
    }
    for (i, entry) in code.entrypoints().iter().enumerate() {
        if !is_laid_out(code, entry.block) {
            errors.push(VerifierError::with_location(
                format!("entrypoint {} is not in the layout", i),
                format!("{}", entry.block),
            ));
        }
    }

    let mut seen = EntitySet::with_capacity(code.num_block_entities());
    for (position, block) in code.blocks().enumerate() {
        if !code.is_valid_block(block) {
            errors.push(VerifierError::new(format!(
                "layout refers to unknown {}",
                block
            )));
            continue;
        }
        if !seen.insert(block) {
            errors.push(VerifierError::with_location(
                "block appears more than once in the layout".into(),
                format!("{}", block),
            ));
        }
        let index = code[block].index;
        if index != position {
            errors.push(VerifierError::with_location(
                format!("block is at position {} but records index {}", position, index),
                format!("{}", block),
            ));
        }
    }
}
