//! Block order computation.
//!
//! Blocks are placed in two phases:
//! 1. Hot phase: starting from the primary entrypoint, grow chains of
//!    fallthroughs through non-rare edges. The successor of the block just
//!    placed is preferred, falling back to the oldest queued block when a
//!    chain ends. A few CFG shapes get a dedicated order (see `shapes`).
//! 2. Cold phase: everything only reachable through rare edges or rare
//!    entrypoints is placed afterwards, most frequent first.
//!
//! Blocks unreachable from every entrypoint are left out.

use alloc::vec::Vec;

use layout_ir::{Block, Code, EntitySet, FrequentedBlock};
use log::trace;

use crate::{
    shapes::{detect_diamond, detect_exclusive_successor, detect_triangle},
    sorted_successors::SortedSuccessors,
    worklist::{BlockWorklist, ChainWorklist},
};

/// Staging buffers for the two phases.
#[derive(Debug, Default)]
struct Staging {
    hot: SortedSuccessors,
    slow: SortedSuccessors,
}

impl Staging {
    fn append(&mut self, successor: FrequentedBlock) {
        if successor.is_rare() {
            self.slow.append(successor.block);
        } else {
            self.hot.append(successor.block);
        }
    }
}

fn check_unplaced(visited: &EntitySet<Block>, block: Block) {
    if cfg!(any(debug_assertions, feature = "verify-layout")) {
        assert!(!visited.contains(block), "{} popped after being placed", block);
    }
}

/// Try the shape detectors in order, returning the name of the one that
/// matched.
fn detect_shape(
    code: &Code,
    block: Block,
    worklist: &mut ChainWorklist,
    visited: &EntitySet<Block>,
) -> Option<&'static str> {
    if detect_triangle(code, block, worklist, visited) {
        Some("triangle")
    } else if detect_diamond(code, block, worklist, visited) {
        Some("diamond")
    } else if detect_exclusive_successor(code, block, worklist, visited) {
        Some("exclusive successor")
    } else {
        None
    }
}

/// Compute the emission order of the blocks of `code`.
///
/// The primary entrypoint comes first. Every block reachable from an
/// entrypoint appears exactly once.
///
/// # Panics
///
/// Panics if `code` has no entrypoint.
pub fn blocks_in_optimized_order(code: &Code) -> Vec<Block> {
    assert!(
        code.num_entrypoints() != 0,
        "code @{} has no entrypoints",
        code.name
    );

    let mut order = Vec::with_capacity(code.num_blocks());
    let mut staging = Staging::default();
    let mut chain_worklist = ChainWorklist::new();
    let mut visited = EntitySet::with_capacity(code.num_block_entities());

    for &entrypoint in &code.entrypoints()[1..] {
        staging.append(entrypoint);
    }

    // The primary entrypoint is queued on its own so it is placed first.
    chain_worklist.append(code.entrypoint(0).block);

    while let Some(block) = chain_worklist.pop(&visited) {
        check_unplaced(&visited, block);
        visited.insert(block);
        order.push(block);

        let len_before = chain_worklist.len();

        match detect_shape(code, block, &mut chain_worklist, &visited) {
            Some(shape) => trace!("{}: {} shape at {}", code.name, shape, block),
            None => {
                for &successor in code.successors(block) {
                    if !visited.contains(successor.block) {
                        staging.append(successor);
                    }
                }
            }
        }
        staging.hot.process(code, &mut chain_worklist);

        if chain_worklist.len() == len_before {
            trace!("{}: chain ends at {}", code.name, block);
            chain_worklist.mark_start_new_chain();
        }
    }

    let hot_blocks = order.len();

    let mut slow_worklist = BlockWorklist::new();
    staging.slow.process(code, &mut slow_worklist);

    while let Some(block) = slow_worklist.pop() {
        if !visited.insert(block) {
            continue;
        }
        order.push(block);

        for &successor in code.successors(block) {
            staging.slow.append(successor.block);
        }
        staging.slow.process(code, &mut slow_worklist);
    }

    trace!(
        "{}: placed {} hot and {} cold blocks",
        code.name,
        hot_blocks,
        order.len() - hot_blocks
    );

    assert!(chain_worklist.is_empty(), "chain worklist not drained");
    assert!(slow_worklist.is_empty(), "cold worklist not drained");

    order
}
