//! Basic block layout for the backend.
//!
//! Orders the blocks of a `Code` so that hot paths fall through, rare paths
//! sink to the end and well-known CFG shapes get a compact layout, then
//! flips two-way branches whose taken target ended up right behind them.

#![no_std]

extern crate alloc;

mod block_order;
mod branch_flip;
mod shapes;
mod sorted_successors;
mod worklist;

pub use block_order::blocks_in_optimized_order;
pub use branch_flip::flip_branches;
pub use shapes::{detect_diamond, detect_exclusive_successor, detect_triangle};
pub use sorted_successors::{BlockSink, SortedSuccessors};
pub use worklist::{BlockWorklist, ChainWorklist};

use layout_ir::Code;
use log::debug;

/// What `optimize_block_order` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockOrderStats {
    /// Blocks in the new layout.
    pub blocks_placed: usize,
    /// Blocks unreachable from every entrypoint, removed from the layout.
    pub blocks_dropped: usize,
    /// Two-way branches inverted so that their taken target is not next.
    pub branches_flipped: usize,
}

/// Lay out the blocks of `code` in optimized order and fix up branch
/// polarity.
///
/// Every block gets its new layout position. Blocks that no entrypoint
/// reaches leave the layout.
///
/// # Panics
///
/// Panics if `code` has no entrypoint. With the `verify-layout` feature,
/// also panics if the result fails verification.
pub fn optimize_block_order(code: &mut Code) -> BlockOrderStats {
    debug!(
        "optimize_block_order: @{} with {} blocks",
        code.name,
        code.num_blocks()
    );

    let order = blocks_in_optimized_order(code);
    let blocks_placed = order.len();
    let blocks_dropped = code.set_block_order(order);
    let branches_flipped = flip_branches(code);

    let stats = BlockOrderStats {
        blocks_placed,
        blocks_dropped,
        branches_flipped,
    };
    debug!("optimize_block_order: @{} done: {:?}", code.name, stats);

    if cfg!(feature = "verify-layout") {
        if let Err(errors) = layout_ir::verify(code) {
            panic!("@{} fails verification after layout: {:?}", code.name, errors);
        }
    }

    stats
}
