//! CFG (Control Flow Graph) verification.

use alloc::{format, vec::Vec};

use super::is_laid_out;
use crate::{code::Code, entity::Block, VerifierError};

/// Verify CFG integrity
///
/// Checks:
/// - Every successor edge targets a block in the layout
/// - Predecessor lists hold exactly the blocks with an edge into the block
pub fn verify_cfg(code: &Code, errors: &mut Vec<VerifierError>) {
    verify_successors(code, errors);
    verify_predecessors(code, errors);
}

fn verify_successors(code: &Code, errors: &mut Vec<VerifierError>) {
    for block in code.blocks() {
        if !code.is_valid_block(block) {
            continue;
        }
        for succ in code.successors(block) {
            if !is_laid_out(code, succ.block) {
                errors.push(VerifierError::with_location(
                    format!("successor {} is not in the layout", succ.block),
                    format!("{}", block),
                ));
            }
        }
    }
}

fn verify_predecessors(code: &Code, errors: &mut Vec<VerifierError>) {
    for block in code.blocks() {
        if !code.is_valid_block(block) {
            continue;
        }
        let mut expected: Vec<Block> = Vec::new();
        for pred in code.blocks() {
            if code.is_valid_block(pred)
                && code.successors(pred).iter().any(|succ| succ.block == block)
            {
                expected.push(pred);
            }
        }

        let actual = code.predecessors(block);
        for pred in &expected {
            if !actual.contains(pred) {
                errors.push(VerifierError::with_location(
                    format!("missing predecessor {}", pred),
                    format!("{}", block),
                ));
            }
        }
        for (i, pred) in actual.iter().enumerate() {
            if !expected.contains(pred) {
                errors.push(VerifierError::with_location(
                    format!("{} is listed as a predecessor but has no edge here", pred),
                    format!("{}", block),
                ));
            } else if actual[..i].contains(pred) {
                errors.push(VerifierError::with_location(
                    format!("predecessor {} is listed twice", pred),
                    format!("{}", block),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;
    use crate::block::FrequentedBlock;

    #[test]
    fn test_consistent_predecessors() {
        let mut code = Code::new("cfg".to_string());
        let a = code.create_block(1.0);
        let b = code.create_block(1.0);
        code.set_successors(a, vec![FrequentedBlock::normal(b)]);
        code.recompute_predecessors();

        let mut errors = Vec::new();
        verify_cfg(&code, &mut errors);
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_stale_predecessors() {
        let mut code = Code::new("cfg".to_string());
        let a = code.create_block(1.0);
        let b = code.create_block(1.0);
        let c = code.create_block(1.0);
        code.set_successors(a, vec![FrequentedBlock::normal(b)]);
        code.recompute_predecessors();
        code.set_successors(a, vec![FrequentedBlock::normal(c)]);

        let mut errors = Vec::new();
        verify_cfg(&code, &mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.message.contains("has no edge here")));
        assert!(errors.iter().any(|e| e.message == "missing predecessor block0"));
    }

    #[test]
    fn test_successor_outside_layout() {
        let mut code = Code::new("cfg".to_string());
        let a = code.create_block(1.0);
        let b = code.create_block(1.0);
        code.set_successors(a, vec![FrequentedBlock::normal(b)]);
        code.set_block_order(vec![a]);

        let mut errors = Vec::new();
        verify_cfg(&code, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location.as_deref(), Some("block0"));
    }
}
