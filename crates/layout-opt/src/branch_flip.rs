//! Branch polarity fix-up.

use layout_ir::{Arg, Block, Code, Opcode};
use log::trace;

/// Branches whose condition may be inverted to swap their targets.
///
/// Listed one by one: a new branch opcode only takes part once it is added
/// here.
fn is_flippable_branch(opcode: Opcode) -> bool {
    matches!(
        opcode,
        Opcode::Branch8
            | Opcode::Branch32
            | Opcode::Branch64
            | Opcode::BranchTest8
            | Opcode::BranchTest32
            | Opcode::BranchTest64
            | Opcode::BranchFloat
            | Opcode::BranchDouble
            | Opcode::BranchAdd32
            | Opcode::BranchAdd64
            | Opcode::BranchMul32
            | Opcode::BranchMul64
            | Opcode::BranchSub32
            | Opcode::BranchSub64
            | Opcode::BranchNeg32
            | Opcode::BranchNeg64
            | Opcode::BranchAtomicStrongCAS8
            | Opcode::BranchAtomicStrongCAS16
            | Opcode::BranchAtomicStrongCAS32
            | Opcode::BranchAtomicStrongCAS64
    )
}

/// The inverted condition of `block`'s branch, if the branch should be
/// flipped: its taken target is the next block in the layout and its
/// condition can be inverted.
fn flipped_condition(code: &Code, block: Block) -> Option<Arg> {
    let branch = code.last_inst(block)?;
    if !is_flippable_branch(branch.opcode) {
        return None;
    }
    let taken = code.successors(block).first()?.block;
    if code.find_next_block(block) != Some(taken) {
        return None;
    }
    branch.args.first()?.inverted()
}

/// Flip branches whose taken target immediately follows them, so the
/// not-taken path becomes the fallthrough. Returns the number of branches
/// flipped.
///
/// Expects the layout positions to be current (see `Code::set_block_order`).
pub fn flip_branches(code: &mut Code) -> usize {
    let mut flipped = 0;
    for position in 0..code.num_blocks() {
        let block = code.layout()[position];
        let Some(inverted) = flipped_condition(code, block) else {
            continue;
        };

        trace!("{}: flipping branch at {} to {}", code.name, block, inverted);
        code.swap_successors(block);
        if let Some(branch) = code.last_inst_mut(block) {
            branch.args[0] = inverted;
        }
        flipped += 1;
    }
    flipped
}
