//! Instruction format verification.

use alloc::{format, vec::Vec};

use crate::{code::Code, VerifierError};

/// Verify block contents
///
/// Checks:
/// - Every block ends with exactly one terminal, and nothing else is terminal
/// - The number of successors matches the terminal
/// - A branch's first argument is a condition of the branch's kind
pub fn verify_format(code: &Code, errors: &mut Vec<VerifierError>) {
    for block in code.blocks() {
        if !code.is_valid_block(block) {
            continue;
        }
        let data = &code[block];
        let location = || format!("{}", block);

        let Some(last) = data.last_inst() else {
            errors.push(VerifierError::with_location(
                "block is empty".into(),
                location(),
            ));
            continue;
        };

        for (i, inst) in data.insts[..data.insts.len() - 1].iter().enumerate() {
            if inst.opcode.is_terminal() {
                errors.push(VerifierError::with_location(
                    format!("terminal {} at inst {} is not last", inst.opcode, i),
                    location(),
                ));
            }
        }

        if !last.opcode.is_terminal() {
            errors.push(VerifierError::with_location(
                format!("block does not end with a terminal: {}", last),
                location(),
            ));
            continue;
        }

        let expected = last.opcode.num_successors();
        if data.num_successors() != expected {
            errors.push(VerifierError::with_location(
                format!(
                    "{} expects {} successors, got {}",
                    last.opcode,
                    expected,
                    data.num_successors()
                ),
                location(),
            ));
        }

        if let Some(kind) = last.opcode.condition_kind() {
            let actual = last.args.first().and_then(|arg| arg.condition_kind());
            if actual != Some(kind) {
                errors.push(VerifierError::with_location(
                    format!("{} needs a {:?} condition as its first argument", last.opcode, kind),
                    location(),
                ));
            }
        }
    }
}
